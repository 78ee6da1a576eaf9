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


//! Static scheduling problem model
//!
//! This crate provides the graph model that the scheduling-problem compiler
//! loads documents into and saves documents from: operator types, operations
//! with concrete input slots, data and auxiliary dependences, and the property
//! tables attached to each of them.

pub mod error;
pub mod problem;

pub use error::{ProblemError, ProblemResult};
pub use problem::{Dependence, Operand, Operation, OperationId, OperatorType, Problem};
