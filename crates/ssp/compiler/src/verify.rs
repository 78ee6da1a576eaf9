// Dotlanth
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.


//! Instance-wide verification
//!
//! Checks that symbols and values are defined once, that every operand is
//! defined somewhere in the instance, that dependence records are well
//! ordered, and that every name reference resolves to an entity of the
//! expected kind.

use crate::codec::validate_dependences;
use crate::document::{AttrParam, Instance, SymbolKind};
use crate::error::{SspError, SspResult};
use crate::parser::common::utils;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use tracing::{debug, instrument};

/// Symbols of one instance. Operator types and operations share the namespace.
#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: HashMap<String, SymbolKind>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the table for an instance, rejecting redefinitions
    pub fn from_instance(instance: &Instance) -> SspResult<Self> {
        let mut table = Self::new();
        for opr in &instance.operator_types {
            table.define(&opr.name, SymbolKind::OperatorType)?;
        }
        for name in instance.operations.iter().filter_map(|op| op.name.as_deref()) {
            table.define(name, SymbolKind::Operation)?;
        }
        Ok(table)
    }

    pub fn define(&mut self, name: &str, kind: SymbolKind) -> SspResult<()> {
        match self.symbols.entry(name.to_string()) {
            Entry::Occupied(_) => Err(SspError::DuplicateSymbol {
                name: utils::symbol_name(name),
            }),
            Entry::Vacant(slot) => {
                slot.insert(kind);
                Ok(())
            }
        }
    }

    pub fn lookup(&self, name: &str) -> Option<SymbolKind> {
        self.symbols.get(name).copied()
    }

    /// Resolve a reference made from `context`, requiring the `expected` kind
    pub fn resolve(&self, context: &str, name: &str, expected: SymbolKind) -> SspResult<()> {
        match self.lookup(name) {
            Some(found) if found == expected => Ok(()),
            Some(found) => Err(SspError::WrongReferenceKind {
                context: context.to_string(),
                name: utils::symbol_name(name),
                expected,
                found,
            }),
            None => Err(SspError::unknown_reference(context, utils::symbol_name(name), expected)),
        }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Verify a whole instance. The first violation found is returned.
#[instrument(skip_all, fields(instance = %instance.name))]
pub fn verify_instance(instance: &Instance) -> SspResult<()> {
    let symbols = SymbolTable::from_instance(instance)?;

    let mut values = HashSet::new();
    for name in instance.operations.iter().flat_map(|op| &op.results) {
        if !values.insert(name.as_str()) {
            return Err(SspError::DuplicateValue { name: name.clone() });
        }
    }

    for (position, op) in instance.operations.iter().enumerate() {
        let context = op.describe(position);

        if let Some(name) = op.operands.iter().find(|name| !values.contains(name.as_str())) {
            return Err(SspError::UndefinedValue {
                operation: context,
                name: name.clone(),
            });
        }

        validate_dependences(&context, op.num_operands(), &op.dependences)?;

        for source in op.dependences.iter().filter_map(|record| record.slot.source_name()) {
            symbols.resolve(&context, source, SymbolKind::Operation)?;
        }

        let links = op.properties.iter().flatten().filter(|attr| attr.is("ssp", "link"));
        for target in links.flat_map(|attr| &attr.params).filter_map(AttrParam::as_symbol) {
            symbols.resolve(&context, target, SymbolKind::OperatorType)?;
        }
    }

    debug!(symbols = symbols.len(), values = values.len(), "verified instance");
    Ok(())
}
