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


//! Dependences between operations

use super::OperationId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Edge of the scheduling graph
///
/// Data edges follow a concrete input slot of the destination. Auxiliary edges
/// only order two operations and carry no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Dependence {
    Data {
        source: OperationId,
        result: u32,
        destination: OperationId,
        operand: u32,
    },
    Auxiliary {
        source: OperationId,
        destination: OperationId,
    },
}

impl Dependence {
    pub fn auxiliary(source: OperationId, destination: OperationId) -> Self {
        Self::Auxiliary { source, destination }
    }

    pub fn source(&self) -> OperationId {
        match self {
            Self::Data { source, .. } | Self::Auxiliary { source, .. } => *source,
        }
    }

    pub fn destination(&self) -> OperationId {
        match self {
            Self::Data { destination, .. } | Self::Auxiliary { destination, .. } => *destination,
        }
    }

    /// Operand slot of the destination, for data edges only
    pub fn destination_index(&self) -> Option<u32> {
        match self {
            Self::Data { operand, .. } => Some(*operand),
            Self::Auxiliary { .. } => None,
        }
    }

    pub fn is_data(&self) -> bool {
        matches!(self, Self::Data { .. })
    }

    pub fn is_auxiliary(&self) -> bool {
        matches!(self, Self::Auxiliary { .. })
    }
}

impl fmt::Display for Dependence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Data { source, result, destination, operand } => {
                write!(f, "{}:{} -> {}[{}]", source, result, destination, operand)
            }
            Self::Auxiliary { source, destination } => write!(f, "{} -> {} (aux)", source, destination),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dependence_accessors() {
        let a = OperationId::new(0);
        let b = OperationId::new(1);
        let data = Dependence::Data {
            source: a,
            result: 0,
            destination: b,
            operand: 2,
        };
        assert!(data.is_data());
        assert_eq!(data.destination_index(), Some(2));
        assert_eq!(data.to_string(), "operation#0:0 -> operation#1[2]");

        let aux = Dependence::auxiliary(b, a);
        assert!(aux.is_auxiliary());
        assert_eq!((aux.source(), aux.destination()), (b, a));
        assert_eq!(aux.destination_index(), None);
    }

    #[test]
    fn test_dependence_json_is_tagged() {
        let aux = Dependence::auxiliary(OperationId::new(3), OperationId::new(4));
        let json = serde_json::to_value(aux).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "auxiliary", "source": 3, "destination": 4}));
    }
}
