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


//! Document form of a scheduling problem instance
//!
//! An [`Instance`] is what the parser produces and the printer consumes. The
//! loader turns it into a [`Problem`](ssp_core::Problem) and the saver builds
//! one back from a problem.

pub mod attribute;
pub mod dependence;

pub use attribute::{AttrParam, PropertyAttr, format_properties};
pub use dependence::{DependenceRecord, DependenceSlot};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of entity a symbol names. Operator types and operations share one namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolKind {
    OperatorType,
    Operation,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolKind::OperatorType => write!(f, "operator type"),
            SymbolKind::Operation => write!(f, "operation"),
        }
    }
}

/// A problem instance
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Instance {
    pub name: String,
    /// Problem kind, e.g. `Problem` or `ModuloProblem`
    pub problem: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<PropertyAttr>>,
    pub operator_types: Vec<OperatorTypeDecl>,
    pub operations: Vec<OperationDecl>,
}

impl Instance {
    pub fn new(name: impl Into<String>, problem: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            problem: problem.into(),
            ..Self::default()
        }
    }

    /// Find an operation by symbol name, returning its position
    pub fn find_operation(&self, name: &str) -> Option<(usize, &OperationDecl)> {
        self.operations.iter().enumerate().find(|(_, op)| op.name.as_deref() == Some(name))
    }

    pub fn find_operator_type(&self, name: &str) -> Option<&OperatorTypeDecl> {
        self.operator_types.iter().find(|opr| opr.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorTypeDecl {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<PropertyAttr>>,
}

impl OperatorTypeDecl {
    pub fn new(name: impl Into<String>, properties: Option<Vec<PropertyAttr>>) -> Self {
        Self {
            name: name.into(),
            properties,
        }
    }
}

/// An operation declaration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OperationDecl {
    /// Value names defined by this operation, one per result
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub results: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Value names consumed by this operation, one per operand
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub operands: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependences: Vec<DependenceRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<PropertyAttr>>,
    /// Trailing `{key = value}` dictionary, carried along but not interpreted
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<NamedAttr>,
}

impl OperationDecl {
    pub fn num_operands(&self) -> u32 {
        self.operands.len() as u32
    }

    /// Human readable name for diagnostics: `@name`, or `operation #k` when unnamed
    pub fn describe(&self, position: usize) -> String {
        match &self.name {
            Some(name) => crate::parser::common::utils::symbol_name(name),
            None => format!("operation #{}", position),
        }
    }
}

/// Entry of an operation's attribute dictionary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedAttr {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<AttrParam>,
}

impl NamedAttr {
    pub fn new(name: impl Into<String>, value: Option<AttrParam>) -> Self {
        Self { name: name.into(), value }
    }
}

impl fmt::Display for NamedAttr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{} = {}", self.name, value),
            None => write!(f, "{}", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_lookup() {
        let mut instance = Instance::new("fig2", "Problem");
        instance.operator_types.push(OperatorTypeDecl::new("slow", None));
        instance.operations.push(OperationDecl::default());
        instance.operations.push(OperationDecl {
            name: Some("op1".to_string()),
            ..OperationDecl::default()
        });

        assert_eq!(instance.find_operation("op1").map(|(i, _)| i), Some(1));
        assert!(instance.find_operation("slow").is_none());
        assert!(instance.find_operator_type("slow").is_some());
    }

    #[test]
    fn test_operation_describe() {
        let unnamed = OperationDecl::default();
        assert_eq!(unnamed.describe(4), "operation #4");

        let named = OperationDecl {
            name: Some("load a".to_string()),
            ..OperationDecl::default()
        };
        assert_eq!(named.describe(0), "@\"load a\"");
    }

    #[test]
    fn test_instance_json() {
        let mut instance = Instance::new("fig2", "Problem");
        instance.operations.push(OperationDecl {
            name: Some("op2".to_string()),
            dependences: vec![DependenceRecord::named(0, "op0", None)],
            ..OperationDecl::default()
        });

        let json = serde_json::to_string(&instance).unwrap();
        let back: Instance = serde_json::from_str(&json).unwrap();
        assert_eq!(back, instance);
    }
}
