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


//! Canonical text rendering of an [`Instance`]

use super::{encode_dependences, format_entries};
use crate::document::{Instance, OperationDecl, OperatorTypeDecl, PropertyAttr, format_properties};
use crate::parser::common::utils;

/// Printer configuration
#[derive(Debug, Clone)]
pub struct PrinterConfig {
    /// Spaces per nesting level
    pub indent: usize,
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self { indent: 2 }
    }
}

impl PrinterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}

/// Renders instances in the form accepted by the parser
#[derive(Debug, Clone, Default)]
pub struct InstancePrinter {
    config: PrinterConfig,
}

impl InstancePrinter {
    pub fn new(config: PrinterConfig) -> Self {
        Self { config }
    }

    pub fn print(&self, instance: &Instance) -> String {
        let mut output = String::new();
        let indent_str = " ".repeat(self.config.indent);

        output.push_str(&format!("instance {} of \"{}\"", utils::symbol_name(&instance.name), utils::escape_string(&instance.problem)));
        push_properties(&mut output, instance.properties.as_deref());
        output.push_str(" {\n");

        for opr in &instance.operator_types {
            output.push_str(&format!("{}{}\n", indent_str, self.print_operator_type(opr)));
        }
        for op in &instance.operations {
            output.push_str(&format!("{}{}\n", indent_str, self.print_operation(op)));
        }

        output.push_str("}\n");
        output
    }

    pub fn print_operator_type(&self, opr: &OperatorTypeDecl) -> String {
        let mut line = format!("operator_type {}", utils::symbol_name(&opr.name));
        push_properties(&mut line, opr.properties.as_deref());
        line
    }

    pub fn print_operation(&self, op: &OperationDecl) -> String {
        let mut line = String::new();

        if !op.results.is_empty() {
            let results: Vec<String> = op.results.iter().map(|name| format!("%{}", name)).collect();
            line.push_str(&format!("{} = ", results.join(", ")));
        }

        line.push_str("operation");
        if let Some(name) = &op.name {
            line.push_str(&format!(" {}", utils::symbol_name(name)));
        }
        line.push_str(&format_entries(&encode_dependences(&op.operands, &op.dependences)));
        push_properties(&mut line, op.properties.as_deref());

        if !op.attributes.is_empty() {
            let attributes: Vec<String> = op.attributes.iter().map(ToString::to_string).collect();
            line.push_str(&format!(" {{{}}}", attributes.join(", ")));
        }

        line
    }
}

fn push_properties(output: &mut String, properties: Option<&[PropertyAttr]>) {
    if let Some(properties) = properties {
        output.push(' ');
        output.push_str(&format_properties(properties));
    }
}
