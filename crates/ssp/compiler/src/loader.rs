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


//! Problem loader: document form to [`Problem`]

use crate::codec::validate_dependences;
use crate::document::{DependenceSlot, Instance, SymbolKind};
use crate::error::{SspError, SspResult};
use crate::parser::common::utils;
use crate::properties::ProblemKinds;
use ssp_core::{Dependence, Operand, OperationId, OperatorType, Problem};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Build a problem from an instance.
///
/// Operator types and operations are inserted in document order, so operation
/// `i` of the problem is the `i`-th operation of the instance. All operations
/// are registered before any dependence is resolved, which lets a dependence
/// name an operation declared further down.
#[instrument(skip_all, fields(instance = %instance.name, problem = %instance.problem))]
pub fn load_problem(instance: &Instance, kinds: &ProblemKinds) -> SspResult<Problem> {
    let mut problem = Problem::new(&instance.name, &instance.problem);

    kinds.instance.decode(&mut problem, &(), instance.properties.as_deref())?;

    for decl in &instance.operator_types {
        let opr = OperatorType::new(&decl.name);
        if !problem.insert_operator_type(opr.clone()) {
            return Err(SspError::DuplicateSymbol {
                name: utils::symbol_name(&decl.name),
            });
        }
        kinds.operator_type.decode(&mut problem, &opr, decl.properties.as_deref())?;
    }

    let mut operations = Vec::with_capacity(instance.operations.len());
    let mut by_name: HashMap<&str, OperationId> = HashMap::new();
    let mut values: HashMap<&str, Operand> = HashMap::new();

    for decl in &instance.operations {
        let op = problem.insert_operation(decl.results.len() as u32);
        if let Some(name) = decl.name.as_deref() {
            if by_name.insert(name, op).is_some() || problem.has_operator_type(&OperatorType::new(name)) {
                return Err(SspError::DuplicateSymbol {
                    name: utils::symbol_name(name),
                });
            }
        }
        for (result, value) in decl.results.iter().enumerate() {
            if values.insert(value, Operand::new(op, result as u32)).is_some() {
                return Err(SspError::DuplicateValue { name: value.clone() });
            }
        }
        kinds.operation.decode(&mut problem, &op, decl.properties.as_deref())?;
        operations.push(op);
    }

    for (position, (decl, &op)) in instance.operations.iter().zip(&operations).enumerate() {
        let context = decl.describe(position);

        let operands = decl
            .operands
            .iter()
            .map(|value| {
                values.get(value.as_str()).copied().ok_or_else(|| SspError::UndefinedValue {
                    operation: context.clone(),
                    name: value.clone(),
                })
            })
            .collect::<SspResult<Vec<_>>>()?;
        problem.set_operands(op, operands).map_err(|e| SspError::model(format!("operands of {}", context), e))?;

        validate_dependences(&context, decl.num_operands(), &decl.dependences)?;

        for record in &decl.dependences {
            let dep = match &record.slot {
                DependenceSlot::Data(index) => problem
                    .data_dependence(op, *index)
                    .map_err(|e| SspError::model(format!("dependence {} of {}", index, context), e))?,
                DependenceSlot::Named { source, .. } => {
                    let Some(&source_op) = by_name.get(source.as_str()) else {
                        return Err(unresolved_source(instance, &context, source));
                    };
                    Dependence::auxiliary(source_op, op)
                }
            };

            problem
                .insert_dependence(dep)
                .map_err(|e| SspError::model(format!("dependence {} of {}", record.slot.index(), context), e))?;
            debug!(%dep, "inserted dependence");

            kinds.dependence.decode(&mut problem, &dep, record.properties.as_deref())?;
        }
    }

    Ok(problem)
}

fn unresolved_source(instance: &Instance, context: &str, source: &str) -> SspError {
    if instance.find_operator_type(source).is_some() {
        SspError::WrongReferenceKind {
            context: context.to_string(),
            name: utils::symbol_name(source),
            expected: SymbolKind::Operation,
            found: SymbolKind::OperatorType,
        }
    } else {
        SspError::unknown_reference(context, utils::symbol_name(source), SymbolKind::Operation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;
    use crate::parser::parse_instance;

    fn load(source: &str) -> SspResult<Problem> {
        let instance = parse_instance(source)?;
        let kinds = ProblemKinds::for_problem_name(&instance.problem).unwrap_or_default();
        load_problem(&instance, &kinds)
    }

    #[test]
    fn test_load_preserves_declaration_order() {
        let problem = load(
            r#"instance @x of "CyclicProblem" [#ssp.II<2>] {
  operator_type @b [#ssp.latency<1>]
  operator_type @a [#ssp.latency<2>]
  %v = operation @late(%w)
  %w = operation @early() [#ssp.link<@a>, #ssp.start_time<4>]
}"#,
        )
        .unwrap();

        assert_eq!(problem.instance_name(), "x");
        assert_eq!(problem.problem_name(), "CyclicProblem");
        assert_eq!(problem.initiation_interval(), Some(2));
        assert_eq!(problem.operator_types(), &[OperatorType::new("b"), OperatorType::new("a")]);
        assert_eq!(problem.latency(&OperatorType::new("a")), Some(2));

        let ops: Vec<_> = problem.operations().collect();
        assert_eq!(ops.len(), 2);
        assert_eq!(problem.start_time(ops[1]), Some(4));
        assert_eq!(problem.linked_operator_type(ops[1]), Some(&OperatorType::new("a")));
        assert_eq!(problem.operation(ops[0]).unwrap().operands(), &[Operand::new(ops[1], 0)]);
    }

    #[test]
    fn test_load_dependence_properties() {
        let problem = load(
            r#"instance @x of "CyclicProblem" {
  %0 = operation @a(%0 [#ssp.distance<1>], @b [#ssp.distance<3>])
  operation @b()
}"#,
        )
        .unwrap();

        let a = OperationId::new(0);
        let b = OperationId::new(1);
        let deps: Vec<_> = problem.dependences(a).collect();
        assert_eq!(deps.len(), 2);
        assert_eq!(problem.distance(&deps[0]), Some(1));
        assert_eq!(deps[1], Dependence::auxiliary(b, a));
        assert_eq!(problem.distance(&deps[1]), Some(3));
    }

    #[test]
    fn test_unresolved_reference_is_fatal() {
        let err = load("instance @x of \"Problem\" { operation @a(@ghost) }").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Reference);
        assert_eq!(err, SspError::unknown_reference("@a", "@ghost", SymbolKind::Operation));

        let err = load("instance @x of \"Problem\" { operator_type @t operation @a(@t) }").unwrap_err();
        assert!(matches!(err, SspError::WrongReferenceKind { .. }));
    }

    #[test]
    fn test_unrecognized_property_is_fatal() {
        let err = load("instance @x of \"Problem\" { operator_type @t [#ssp.limit<1>] }").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Property);
    }

    #[test]
    fn test_model_rejections_are_fatal() {
        let err = load("instance @x of \"Problem\" { operation @a() operation @b(@a, @a) }").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Model);
        assert!(err.to_string().contains("@b"));

        let err = load("instance @x of \"Problem\" { operator_type @t operator_type @t }").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Reference);
    }

    #[test]
    fn test_operation_named_like_operator_type() {
        let err = load("instance @x of \"Problem\" { operator_type @t operation @t() }").unwrap_err();
        assert_eq!(err, SspError::DuplicateSymbol { name: "@t".to_string() });
        assert_eq!(err.category(), ErrorCategory::Reference);
    }

    #[test]
    fn test_undefined_value() {
        let err = load("instance @x of \"Problem\" { operation @a(%nothing) }").unwrap_err();
        assert!(matches!(err, SspError::UndefinedValue { .. }));
    }
}
