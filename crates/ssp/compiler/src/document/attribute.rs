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


//! Encoded property values
//!
//! A property is written `#dialect.mnemonic` optionally followed by a
//! parameter list `<p, ...>`. Parameters are integers, symbol references,
//! strings or nested attributes.

use crate::parser::common::utils;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An encoded property value, opaque to everything but the property kinds
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertyAttr {
    pub dialect: String,
    pub mnemonic: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<AttrParam>,
}

impl PropertyAttr {
    pub fn new(dialect: impl Into<String>, mnemonic: impl Into<String>, params: Vec<AttrParam>) -> Self {
        Self {
            dialect: dialect.into(),
            mnemonic: mnemonic.into(),
            params,
        }
    }

    /// Check the `#dialect.mnemonic` prefix
    pub fn is(&self, dialect: &str, mnemonic: &str) -> bool {
        self.dialect == dialect && self.mnemonic == mnemonic
    }

    /// The parameter of a single-parameter attribute
    pub fn single_param(&self) -> Option<&AttrParam> {
        match self.params.as_slice() {
            [param] => Some(param),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyAttr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}.{}", self.dialect, self.mnemonic)?;
        if !self.params.is_empty() {
            write!(f, "<")?;
            for (i, param) in self.params.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", param)?;
            }
            write!(f, ">")?;
        }
        Ok(())
    }
}

/// Attribute parameter
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttrParam {
    Integer(i64),
    Symbol(String),
    String(String),
    Attr(Box<PropertyAttr>),
}

impl AttrParam {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            AttrParam::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            AttrParam::Symbol(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for AttrParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrParam::Integer(value) => write!(f, "{}", value),
            AttrParam::Symbol(name) => write!(f, "{}", utils::symbol_name(name)),
            AttrParam::String(value) => write!(f, "\"{}\"", utils::escape_string(value)),
            AttrParam::Attr(attr) => write!(f, "{}", attr),
        }
    }
}

/// Render a property list as `[a, b]`
pub fn format_properties(properties: &[PropertyAttr]) -> String {
    let items: Vec<String> = properties.iter().map(ToString::to_string).collect();
    format!("[{}]", items.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_display() {
        let link = PropertyAttr::new("ssp", "link", vec![AttrParam::Symbol("slow".to_string())]);
        assert_eq!(link.to_string(), "#ssp.link<@slow>");

        let nested = PropertyAttr::new(
            "test",
            "pair",
            vec![AttrParam::Integer(-1), AttrParam::Attr(Box::new(PropertyAttr::new("test", "unit", vec![])))],
        );
        assert_eq!(nested.to_string(), "#test.pair<-1, #test.unit>");

        let quoted = PropertyAttr::new("test", "name", vec![AttrParam::Symbol("a b".to_string()), AttrParam::String("x\"y".to_string())]);
        assert_eq!(quoted.to_string(), r#"#test.name<@"a b", "x\"y">"#);
    }

    #[test]
    fn test_single_param() {
        let attr = PropertyAttr::new("ssp", "latency", vec![AttrParam::Integer(3)]);
        assert!(attr.is("ssp", "latency"));
        assert_eq!(attr.single_param().and_then(AttrParam::as_integer), Some(3));

        let attr = PropertyAttr::new("ssp", "latency", vec![]);
        assert_eq!(attr.single_param(), None);
    }

    #[test]
    fn test_format_properties() {
        let list = vec![
            PropertyAttr::new("ssp", "latency", vec![AttrParam::Integer(1)]),
            PropertyAttr::new("ssp", "limit", vec![AttrParam::Integer(2)]),
        ];
        assert_eq!(format_properties(&list), "[#ssp.latency<1>, #ssp.limit<2>]");
        assert_eq!(format_properties(&[]), "[]");
    }
}
