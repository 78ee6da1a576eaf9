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


//! Dependence records of an operation

use super::attribute::PropertyAttr;
use serde::{Deserialize, Serialize};

/// Slot a dependence record addresses.
///
/// `Data` slots are concrete operand indices. `Named` slots come after all
/// operands and identify their source operation by symbol name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependenceSlot {
    Data(u32),
    Named { index: u32, source: String },
}

impl DependenceSlot {
    pub fn index(&self) -> u32 {
        match self {
            DependenceSlot::Data(index) | DependenceSlot::Named { index, .. } => *index,
        }
    }

    pub fn source_name(&self) -> Option<&str> {
        match self {
            DependenceSlot::Data(_) => None,
            DependenceSlot::Named { source, .. } => Some(source),
        }
    }

    pub fn is_named(&self) -> bool {
        matches!(self, DependenceSlot::Named { .. })
    }
}

/// A dependence record with its optional property list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependenceRecord {
    pub slot: DependenceSlot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<PropertyAttr>>,
}

impl DependenceRecord {
    pub fn data(index: u32, properties: Option<Vec<PropertyAttr>>) -> Self {
        Self {
            slot: DependenceSlot::Data(index),
            properties,
        }
    }

    pub fn named(index: u32, source: impl Into<String>, properties: Option<Vec<PropertyAttr>>) -> Self {
        Self {
            slot: DependenceSlot::Named {
                index,
                source: source.into(),
            },
            properties,
        }
    }
}
