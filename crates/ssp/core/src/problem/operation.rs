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


//! Operation handles and concrete input slots

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle to an operation registered in a [`Problem`](super::Problem)
///
/// Handles are assigned in insertion order, so `index()` is the position of the
/// operation in [`Problem::operations`](super::Problem::operations).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OperationId(u32);

impl OperationId {
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "operation#{}", self.0)
    }
}

/// A concrete input slot: the `result`-th output of `source`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Operand {
    pub source: OperationId,
    pub result: u32,
}

impl Operand {
    pub fn new(source: OperationId, result: u32) -> Self {
        Self { source, result }
    }
}

/// Node of the scheduling graph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    pub(crate) num_results: u32,
    pub(crate) operands: Vec<Operand>,
    /// Whether `operands` has been wired yet
    pub(crate) connected: bool,
    /// Auxiliary predecessors, in insertion order
    pub(crate) aux_sources: Vec<OperationId>,
}

impl Operation {
    pub fn num_results(&self) -> u32 {
        self.num_results
    }

    pub fn num_operands(&self) -> u32 {
        self.operands.len() as u32
    }

    pub fn operands(&self) -> &[Operand] {
        &self.operands
    }

    pub fn auxiliary_sources(&self) -> &[OperationId] {
        &self.aux_sources
    }
}
