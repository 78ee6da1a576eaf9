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


//! Node dependence codec
//!
//! An operation's parenthesized operand list mixes two kinds of entries:
//! `%value` entries are concrete operands (data dependences) and `@symbol`
//! entries name the source of an auxiliary dependence. Every entry occupies
//! one slot, counted left to right. Data entries only produce a
//! [`DependenceRecord`] when they carry properties; symbol entries always do.
//!
//! A well-formed record list has data slots that are strictly increasing and
//! below the operand count, followed by auxiliary slots that start at the
//! operand count and increase by one.

pub mod printer;

pub use printer::{InstancePrinter, PrinterConfig};

use crate::document::{DependenceRecord, DependenceSlot, PropertyAttr, format_properties};
use crate::error::{SspError, SspResult};
use crate::parser::common::utils;
use std::fmt;

/// One entry of an operation's operand list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependenceEntry {
    /// `%name [props]`
    Value { name: String, properties: Option<Vec<PropertyAttr>> },
    /// `@name [props]`
    Symbol { name: String, properties: Option<Vec<PropertyAttr>> },
}

impl fmt::Display for DependenceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let properties = match self {
            DependenceEntry::Value { name, properties } => {
                write!(f, "%{}", name)?;
                properties
            }
            DependenceEntry::Symbol { name, properties } => {
                write!(f, "{}", utils::symbol_name(name))?;
                properties
            }
        };
        if let Some(properties) = properties {
            write!(f, " {}", format_properties(properties))?;
        }
        Ok(())
    }
}

/// Operand value names and dependence records decoded from an operand list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedDependences {
    pub operands: Vec<String>,
    pub records: Vec<DependenceRecord>,
}

/// Split an operand list into concrete operands and dependence records
pub fn decode_dependences(entries: Vec<DependenceEntry>) -> DecodedDependences {
    let mut decoded = DecodedDependences::default();

    for (slot, entry) in entries.into_iter().enumerate() {
        let slot = slot as u32;
        match entry {
            DependenceEntry::Value { name, properties } => {
                decoded.operands.push(name);
                if properties.is_some() {
                    decoded.records.push(DependenceRecord::data(slot, properties));
                }
            }
            DependenceEntry::Symbol { name, properties } => {
                decoded.records.push(DependenceRecord::named(slot, name, properties));
            }
        }
    }

    decoded
}

/// Rebuild the operand list: every operand in slot order with the properties of
/// its data record, then every auxiliary record in slot order
pub fn encode_dependences(operands: &[String], records: &[DependenceRecord]) -> Vec<DependenceEntry> {
    let mut entries = Vec::with_capacity(operands.len() + records.len());

    for (slot, name) in operands.iter().enumerate() {
        let properties = records
            .iter()
            .find(|record| record.slot == DependenceSlot::Data(slot as u32))
            .and_then(|record| record.properties.clone());
        entries.push(DependenceEntry::Value { name: name.clone(), properties });
    }

    for record in records {
        if let DependenceSlot::Named { source, .. } = &record.slot {
            entries.push(DependenceEntry::Symbol {
                name: source.clone(),
                properties: record.properties.clone(),
            });
        }
    }

    entries
}

/// Format an operand list as `(a, b, ...)`
pub fn format_entries(entries: &[DependenceEntry]) -> String {
    let items: Vec<String> = entries.iter().map(ToString::to_string).collect();
    format!("({})", items.join(", "))
}

/// Check the slot ordering of an operation's dependence records
pub fn validate_dependences(operation: &str, num_operands: u32, records: &[DependenceRecord]) -> SspResult<()> {
    let mut last: Option<u32> = None;

    for record in records {
        let index = record.slot.index();
        let after_last = last.is_none_or(|last| index > last);

        match &record.slot {
            DependenceSlot::Data(_) => {
                if index >= num_operands {
                    return Err(SspError::invalid_dependence(
                        operation,
                        format!("operand index {} is out of bounds ({} operands)", index, num_operands),
                    ));
                }
                if !after_last {
                    return Err(SspError::invalid_dependence(
                        operation,
                        format!("operand index {} is not in increasing order", index),
                    ));
                }
            }
            DependenceSlot::Named { source, .. } => {
                if index < num_operands {
                    return Err(SspError::invalid_dependence(
                        operation,
                        format!("auxiliary dependence from {} is interleaved with operands", utils::symbol_name(source)),
                    ));
                }
                let consecutive = last.is_some_and(|last| index == last + 1) || (after_last && index == num_operands);
                if !consecutive {
                    return Err(SspError::invalid_dependence(
                        operation,
                        format!("auxiliary dependence from {} has non-consecutive index {}", utils::symbol_name(source), index),
                    ));
                }
            }
        }

        last = Some(index);
    }

    Ok(())
}
