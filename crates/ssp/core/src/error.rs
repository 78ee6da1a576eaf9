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


//! Errors raised by the scheduling problem model

use crate::problem::{Dependence, OperationId, OperatorType};
use thiserror::Error;

/// Errors that can occur while building or checking a [`Problem`](crate::Problem)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProblemError {
    #[error("Unknown operation {0}")]
    UnknownOperation(OperationId),

    #[error("Operand {operand} of {operation} is out of range ({num_operands} operands)")]
    OperandOutOfRange { operation: OperationId, operand: u32, num_operands: u32 },

    #[error("Result {result} of {operation} is out of range ({num_results} results)")]
    ResultOutOfRange { operation: OperationId, result: u32, num_results: u32 },

    #[error("Operands of {0} are already connected")]
    OperandsAlreadySet(OperationId),

    #[error("Duplicate auxiliary dependence from {from} to {to}")]
    DuplicateDependence { from: OperationId, to: OperationId },

    #[error("Dependence {0} is not part of the problem")]
    UnknownDependence(Dependence),

    #[error("Operation {0} is not linked to an operator type")]
    UnlinkedOperation(OperationId),

    #[error("Operation {operation} is linked to unregistered operator type {operator_type}")]
    UnregisteredOperatorType { operation: OperationId, operator_type: OperatorType },

    #[error("Operator type {0} has no latency")]
    MissingLatency(OperatorType),

    #[error("Dependence cycle without positive distance through {0}")]
    ZeroDistanceCycle(OperationId),
}

/// Result type alias for problem model operations
pub type ProblemResult<T> = Result<T, ProblemError>;
