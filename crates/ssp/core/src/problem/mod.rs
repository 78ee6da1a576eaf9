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


//! The in-memory scheduling problem graph
//!
//! A [`Problem`] owns operator types, operations and their dependences, plus the
//! property tables the scheduling problem family attaches to them:
//!
//! - instance: initiation interval
//! - operator type: latency, limit
//! - operation: linked operator type, start time
//! - dependence: distance
//!
//! Data dependences are implicit: an operation's operands are its incoming data
//! edges. Auxiliary dependences are inserted explicitly.

mod check;
mod dependence;
mod operation;
mod operator;

pub use dependence::Dependence;
pub use operation::{Operand, Operation, OperationId};
pub use operator::OperatorType;

use crate::error::{ProblemError, ProblemResult};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;
use tracing::trace;

#[derive(Debug, Clone, Default)]
pub struct Problem {
    instance_name: String,
    problem_name: String,
    operator_types: Vec<OperatorType>,
    operations: Vec<Operation>,

    initiation_interval: Option<u32>,
    latency: HashMap<OperatorType, u32>,
    limit: HashMap<OperatorType, u32>,
    linked_operator_type: HashMap<OperationId, OperatorType>,
    start_time: HashMap<OperationId, u32>,
    distance: HashMap<Dependence, u32>,
}

impl Problem {
    /// Create an empty problem bound to an instance name and a problem kind
    pub fn new(instance_name: impl Into<String>, problem_name: impl Into<String>) -> Self {
        Self {
            instance_name: instance_name.into(),
            problem_name: problem_name.into(),
            ..Self::default()
        }
    }

    pub fn instance_name(&self) -> &str {
        &self.instance_name
    }

    pub fn problem_name(&self) -> &str {
        &self.problem_name
    }

    // --- Operator types ---

    /// Register an operator type. Returns `false` if it was already known.
    pub fn insert_operator_type(&mut self, opr: OperatorType) -> bool {
        if self.has_operator_type(&opr) {
            return false;
        }
        self.operator_types.push(opr);
        true
    }

    pub fn has_operator_type(&self, opr: &OperatorType) -> bool {
        self.operator_types.contains(opr)
    }

    pub fn operator_types(&self) -> &[OperatorType] {
        &self.operator_types
    }

    // --- Operations ---

    /// Register a new operation producing `num_results` values
    pub fn insert_operation(&mut self, num_results: u32) -> OperationId {
        let id = OperationId::new(self.operations.len() as u32);
        self.operations.push(Operation {
            num_results,
            ..Operation::default()
        });
        id
    }

    pub fn operation(&self, op: OperationId) -> ProblemResult<&Operation> {
        self.operations.get(op.index()).ok_or(ProblemError::UnknownOperation(op))
    }

    fn operation_mut(&mut self, op: OperationId) -> ProblemResult<&mut Operation> {
        self.operations.get_mut(op.index()).ok_or(ProblemError::UnknownOperation(op))
    }

    pub fn has_operation(&self, op: OperationId) -> bool {
        op.index() < self.operations.len()
    }

    /// Operations in insertion order
    pub fn operations(&self) -> impl ExactSizeIterator<Item = OperationId> + use<> {
        (0..self.operations.len() as u32).map(OperationId::new)
    }

    pub fn num_operations(&self) -> usize {
        self.operations.len()
    }

    /// Wire the concrete inputs of `op`. Every source must already be registered.
    pub fn set_operands(&mut self, op: OperationId, operands: Vec<Operand>) -> ProblemResult<()> {
        for operand in &operands {
            let source = self.operation(operand.source)?;
            if operand.result >= source.num_results {
                return Err(ProblemError::ResultOutOfRange {
                    operation: operand.source,
                    result: operand.result,
                    num_results: source.num_results,
                });
            }
        }

        let node = self.operation_mut(op)?;
        if node.connected {
            return Err(ProblemError::OperandsAlreadySet(op));
        }
        node.operands = operands;
        node.connected = true;
        Ok(())
    }

    // --- Dependences ---

    /// The data dependence feeding operand `slot` of `op`
    pub fn data_dependence(&self, op: OperationId, slot: u32) -> ProblemResult<Dependence> {
        let node = self.operation(op)?;
        let operand = node.operands.get(slot as usize).ok_or(ProblemError::OperandOutOfRange {
            operation: op,
            operand: slot,
            num_operands: node.num_operands(),
        })?;
        Ok(Dependence::Data {
            source: operand.source,
            result: operand.result,
            destination: op,
            operand: slot,
        })
    }

    /// Insert a dependence.
    ///
    /// Auxiliary edges are appended to the destination's edge list; duplicates and
    /// unknown endpoints are rejected. Data edges already exist through operands,
    /// so inserting one only succeeds if it names an existing operand exactly.
    pub fn insert_dependence(&mut self, dep: Dependence) -> ProblemResult<()> {
        match dep {
            Dependence::Data { destination, operand, .. } => {
                if self.data_dependence(destination, operand)? != dep {
                    return Err(ProblemError::UnknownDependence(dep));
                }
                Ok(())
            }
            Dependence::Auxiliary { source, destination } => {
                self.operation(source)?;
                let node = self.operation_mut(destination)?;
                if node.aux_sources.contains(&source) {
                    return Err(ProblemError::DuplicateDependence { from: source, to: destination });
                }
                node.aux_sources.push(source);
                trace!(%source, %destination, "inserted auxiliary dependence");
                Ok(())
            }
        }
    }

    pub fn contains_dependence(&self, dep: &Dependence) -> bool {
        match *dep {
            Dependence::Data { destination, operand, .. } => self.data_dependence(destination, operand).is_ok_and(|d| d == *dep),
            Dependence::Auxiliary { source, destination } => self
                .operations
                .get(destination.index())
                .is_some_and(|node| node.aux_sources.contains(&source)),
        }
    }

    /// Incoming dependences of `op`: data edges in operand order, then auxiliary
    /// edges in insertion order. Unknown operations have no dependences.
    pub fn dependences(&self, op: OperationId) -> impl Iterator<Item = Dependence> + '_ {
        let node = self.operations.get(op.index());
        let data = node.into_iter().flat_map(move |node| {
            node.operands.iter().enumerate().map(move |(slot, operand)| Dependence::Data {
                source: operand.source,
                result: operand.result,
                destination: op,
                operand: slot as u32,
            })
        });
        let aux = node
            .into_iter()
            .flat_map(move |node| node.aux_sources.iter().map(move |&source| Dependence::auxiliary(source, op)));
        data.chain(aux)
    }

    /// Every dependence whose source is `op`, in destination order
    pub fn outgoing_dependences(&self, op: OperationId) -> Vec<Dependence> {
        self.operations()
            .flat_map(|dst| self.dependences(dst))
            .filter(|dep| dep.source() == op)
            .collect()
    }

    /// Graph view of the problem. Node `i` holds the `i`-th operation.
    pub fn dependence_graph(&self) -> DiGraph<OperationId, Dependence> {
        let mut graph = DiGraph::with_capacity(self.operations.len(), 0);
        for op in self.operations() {
            graph.add_node(op);
        }
        for op in self.operations() {
            for dep in self.dependences(op) {
                graph.add_edge(NodeIndex::new(dep.source().index()), NodeIndex::new(op.index()), dep);
            }
        }
        graph
    }

    // --- Instance properties ---

    pub fn initiation_interval(&self) -> Option<u32> {
        self.initiation_interval
    }

    pub fn set_initiation_interval(&mut self, ii: u32) {
        self.initiation_interval = Some(ii);
    }

    // --- Operator type properties ---

    pub fn latency(&self, opr: &OperatorType) -> Option<u32> {
        self.latency.get(opr).copied()
    }

    pub fn set_latency(&mut self, opr: OperatorType, latency: u32) {
        self.latency.insert(opr, latency);
    }

    pub fn limit(&self, opr: &OperatorType) -> Option<u32> {
        self.limit.get(opr).copied()
    }

    pub fn set_limit(&mut self, opr: OperatorType, limit: u32) {
        self.limit.insert(opr, limit);
    }

    // --- Operation properties ---

    pub fn linked_operator_type(&self, op: OperationId) -> Option<&OperatorType> {
        self.linked_operator_type.get(&op)
    }

    pub fn set_linked_operator_type(&mut self, op: OperationId, opr: OperatorType) -> ProblemResult<()> {
        self.operation(op)?;
        self.linked_operator_type.insert(op, opr);
        Ok(())
    }

    pub fn start_time(&self, op: OperationId) -> Option<u32> {
        self.start_time.get(&op).copied()
    }

    pub fn set_start_time(&mut self, op: OperationId, time: u32) -> ProblemResult<()> {
        self.operation(op)?;
        self.start_time.insert(op, time);
        Ok(())
    }

    // --- Dependence properties ---

    pub fn distance(&self, dep: &Dependence) -> Option<u32> {
        self.distance.get(dep).copied()
    }

    pub fn set_distance(&mut self, dep: Dependence, distance: u32) -> ProblemResult<()> {
        if !self.contains_dependence(&dep) {
            return Err(ProblemError::UnknownDependence(dep));
        }
        self.distance.insert(dep, distance);
        Ok(())
    }
}
