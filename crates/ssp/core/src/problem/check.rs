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


//! Readiness checks run before handing a problem to a scheduler

use super::{Problem, ProblemError, ProblemResult};
use petgraph::algo::toposort;
use petgraph::graph::DiGraph;
use tracing::debug;

impl Problem {
    /// Check that the problem is complete enough to be scheduled.
    ///
    /// Every operation must be linked to a registered operator type with a known
    /// latency, and dependences without a positive distance must not form a cycle.
    pub fn check(&self) -> ProblemResult<()> {
        for op in self.operations() {
            let opr = self.linked_operator_type(op).ok_or(ProblemError::UnlinkedOperation(op))?;
            if !self.has_operator_type(opr) {
                return Err(ProblemError::UnregisteredOperatorType {
                    operation: op,
                    operator_type: opr.clone(),
                });
            }
            if self.latency(opr).is_none() {
                return Err(ProblemError::MissingLatency(opr.clone()));
            }
        }

        let mut graph = self.dependence_graph();
        graph.retain_edges(|g, edge| g.edge_weight(edge).is_some_and(|dep| self.distance(dep).unwrap_or(0) == 0));
        self.check_acyclic(&graph)
    }

    fn check_acyclic<E>(&self, graph: &DiGraph<super::OperationId, E>) -> ProblemResult<()> {
        match toposort(graph, None) {
            Ok(order) => {
                debug!(operations = order.len(), "dependence graph is acyclic");
                Ok(())
            }
            Err(cycle) => Err(ProblemError::ZeroDistanceCycle(graph[cycle.node_id()])),
        }
    }
}
