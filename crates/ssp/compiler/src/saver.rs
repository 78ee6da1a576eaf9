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


//! Problem saver: [`Problem`] to document form

use crate::document::{DependenceRecord, Instance, OperationDecl, OperatorTypeDecl};
use crate::error::{SspError, SspResult};
use crate::parser::common::utils;
use crate::properties::ProblemKinds;
use ssp_core::{Dependence, OperationId, Problem, ProblemError};
use std::collections::{HashMap, HashSet};
use tracing::{debug, instrument};

/// Saver configuration
#[derive(Debug, Clone)]
pub struct SaverConfig {
    /// Prefix of synthesized operation names
    pub name_prefix: String,
}

impl Default for SaverConfig {
    fn default() -> Self {
        Self {
            name_prefix: "Op".to_string(),
        }
    }
}

impl SaverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.name_prefix = prefix.into();
        self
    }
}

/// Names given to operations during one save.
///
/// An operation gets a name when the caller supplies one or when an auxiliary
/// dependence has to refer to it. Operations share the symbol namespace with
/// operator types, so no operation name may equal an operator type name.
/// Synthesized names never collide with a name the caller supplies for any
/// operation, nor with one assigned earlier.
#[derive(Debug, Default)]
pub struct NameTable {
    names: HashMap<OperationId, String>,
    taken: HashSet<String>,
}

impl NameTable {
    pub fn build<F>(problem: &Problem, name_fn: &F, config: &SaverConfig) -> SspResult<Self>
    where
        F: Fn(OperationId) -> Option<String>,
    {
        let mut supplied = HashMap::new();
        let mut reserved: HashSet<String> = problem.operator_types().iter().map(|opr| opr.name().to_string()).collect();
        for op in problem.operations() {
            if let Some(name) = name_fn(op) {
                if !reserved.insert(name.clone()) {
                    return Err(SspError::DuplicateName {
                        name: utils::symbol_name(&name),
                    });
                }
                supplied.insert(op, name);
            }
        }

        let mut table = Self::default();
        for op in problem.operations() {
            if let Some(name) = supplied.get(&op) {
                table.assign(op, name.clone());
            }

            for dep in problem.dependences(op).filter(Dependence::is_auxiliary) {
                let source = dep.source();
                if table.contains(source) {
                    continue;
                }
                let name = match supplied.get(&source) {
                    Some(name) => name.clone(),
                    None => {
                        let name = table.synthesize(&config.name_prefix, &reserved);
                        debug!(%source, name = %name, "synthesized operation name");
                        name
                    }
                };
                table.assign(source, name);
            }
        }

        Ok(table)
    }

    fn assign(&mut self, op: OperationId, name: String) {
        self.taken.insert(name.clone());
        self.names.insert(op, name);
    }

    fn synthesize(&self, prefix: &str, reserved: &HashSet<String>) -> String {
        let mut counter = self.names.len();
        loop {
            let candidate = format!("{}{}", prefix, counter);
            if !reserved.contains(&candidate) && !self.taken.contains(&candidate) {
                return candidate;
            }
            counter += 1;
        }
    }

    pub fn contains(&self, op: OperationId) -> bool {
        self.names.contains_key(&op)
    }

    pub fn get(&self, op: OperationId) -> Option<&str> {
        self.names.get(&op).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Save a problem with the default configuration
pub fn save_problem<F>(problem: &Problem, instance_name: &str, problem_name: &str, name_fn: F, kinds: &ProblemKinds) -> SspResult<Instance>
where
    F: Fn(OperationId) -> Option<String>,
{
    save_problem_with(problem, instance_name, problem_name, name_fn, kinds, &SaverConfig::default())
}

/// Build an instance from a problem.
///
/// Names are assigned for every operation before any operation is emitted.
/// Result values are named `%0, %1, ...` in operation order.
#[instrument(skip_all, fields(instance = instance_name, problem = problem_name))]
pub fn save_problem_with<F>(
    problem: &Problem,
    instance_name: &str,
    problem_name: &str,
    name_fn: F,
    kinds: &ProblemKinds,
    config: &SaverConfig,
) -> SspResult<Instance>
where
    F: Fn(OperationId) -> Option<String>,
{
    let mut instance = Instance::new(instance_name, problem_name);
    instance.properties = kinds.instance.encode(problem, &());

    for opr in problem.operator_types() {
        instance.operator_types.push(OperatorTypeDecl::new(opr.name(), kinds.operator_type.encode(problem, opr)));
    }

    let names = NameTable::build(problem, &name_fn, config)?;

    let mut first_value = Vec::with_capacity(problem.num_operations());
    let mut next_value = 0u32;
    for op in problem.operations() {
        first_value.push(next_value);
        next_value += problem.operation(op).map_err(|e| SspError::model("saving", e))?.num_results();
    }
    let value_name = |op: OperationId, result: u32| (first_value[op.index()] + result).to_string();

    for op in problem.operations() {
        let node = problem.operation(op).map_err(|e| SspError::model("saving", e))?;

        let mut dependences = Vec::new();
        let mut aux_index = node.num_operands();
        for dep in problem.dependences(op) {
            let properties = kinds.dependence.encode(problem, &dep);
            match dep {
                Dependence::Data { operand, .. } => {
                    if properties.is_some() {
                        dependences.push(DependenceRecord::data(operand, properties));
                    }
                }
                Dependence::Auxiliary { source, .. } => {
                    let Some(source_name) = names.get(source) else {
                        return Err(SspError::model(format!("saving {}", dep), ProblemError::UnknownOperation(source)));
                    };
                    dependences.push(DependenceRecord::named(aux_index, source_name, properties));
                    aux_index += 1;
                }
            }
        }

        instance.operations.push(OperationDecl {
            results: (0..node.num_results()).map(|result| value_name(op, result)).collect(),
            name: names.get(op).map(str::to_string),
            operands: node.operands().iter().map(|operand| value_name(operand.source, operand.result)).collect(),
            dependences,
            properties: kinds.operation.encode(problem, &op),
            attributes: Vec::new(),
        });
    }

    debug!(operations = instance.operations.len(), named = names.len(), "saved problem");
    Ok(instance)
}
