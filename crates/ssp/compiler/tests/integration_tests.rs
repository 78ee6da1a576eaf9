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


//! Integration tests for the text -> instance -> problem -> instance -> text pipeline

use proptest::prelude::*;
use ssp_compiler::codec::{encode_dependences, format_entries, validate_dependences};
use ssp_compiler::document::{AttrParam, PropertyAttr};
use ssp_compiler::properties::{LatencyKind, PropertyKind};
use ssp_compiler::{
    ErrorCategory, Instance, InstancePrinter, ProblemKinds, PropertyKinds, SspResult, load_problem, parse_instance, save_problem,
    verify_instance,
};
use ssp_core::{Dependence, Operand, OperationId, OperatorType, Problem};
use test_case::test_case;

const FIG2: &str = r#"instance @fig2 of "Problem" {
  operator_type @slow [#ssp.latency<3>]
  operator_type @fast [#ssp.latency<1>]
  %0 = operation @op0() [#ssp.link<@slow>]
  operation @op1(%0) [#ssp.link<@fast>]
  operation @op2(@op0) [#ssp.link<@fast>]
}
"#;

const MODULO: &str = r#"instance @loop of "ModuloProblem" [#ssp.II<2>] {
  operator_type @mem [#ssp.latency<2>, #ssp.limit<1>]
  operator_type @alu [#ssp.latency<1>]
  %0 = operation @load(@store [#ssp.distance<1>]) [#ssp.link<@mem>, #ssp.start_time<0>]
  %1 = operation @add(%0, %1 [#ssp.distance<1>]) [#ssp.link<@alu>, #ssp.start_time<2>]
  operation @store(%1) [#ssp.link<@mem>, #ssp.start_time<3>]
}
"#;

fn load_text(source: &str) -> SspResult<(Instance, Problem)> {
    let instance = parse_instance(source)?;
    verify_instance(&instance)?;
    let kinds = ProblemKinds::for_problem_name(&instance.problem).unwrap_or_default();
    let problem = load_problem(&instance, &kinds)?;
    Ok((instance, problem))
}

/// Name every operation the way the source instance did
fn original_names(instance: &Instance) -> impl Fn(OperationId) -> Option<String> + '_ {
    move |op| instance.operations.get(op.index()).and_then(|decl| decl.name.clone())
}

fn save_text(problem: &Problem, name_fn: impl Fn(OperationId) -> Option<String>) -> String {
    let kinds = ProblemKinds::for_problem_name(problem.problem_name()).unwrap_or_default();
    let instance = save_problem(problem, problem.instance_name(), problem.problem_name(), name_fn, &kinds).expect("Saving should succeed");
    InstancePrinter::default().print(&instance)
}

type OperationSummary = (Vec<Operand>, Vec<(Dependence, Option<u32>)>, Option<OperatorType>, Option<u32>);

/// Everything observable about a problem, in problem order
fn summary(problem: &Problem) -> (Vec<(OperatorType, Option<u32>, Option<u32>)>, Vec<OperationSummary>, Option<u32>) {
    let operator_types = problem
        .operator_types()
        .iter()
        .map(|opr| (opr.clone(), problem.latency(opr), problem.limit(opr)))
        .collect();
    let operations = problem
        .operations()
        .map(|op| {
            let operands = problem.operation(op).map(|node| node.operands().to_vec()).unwrap_or_default();
            let deps = problem.dependences(op).map(|dep| (dep, problem.distance(&dep))).collect();
            (operands, deps, problem.linked_operator_type(op).cloned(), problem.start_time(op))
        })
        .collect();
    (operator_types, operations, problem.initiation_interval())
}

#[test]
fn test_fig2_dependences() {
    let (_, problem) = load_text(FIG2).expect("Loading should succeed");
    let [op0, op1, op2] = [0, 1, 2].map(OperationId::new);

    let outgoing = problem.outgoing_dependences(op0);
    assert_eq!(
        outgoing,
        vec![
            Dependence::Data {
                source: op0,
                result: 0,
                destination: op1,
                operand: 0
            },
            Dependence::auxiliary(op0, op2),
        ]
    );

    let op2_node = problem.operation(op2).unwrap();
    assert_eq!(op2_node.num_operands(), 0);
    assert_eq!(op2_node.auxiliary_sources(), &[op0]);
    assert!(problem.check().is_ok());
}

#[test]
fn test_fig2_save_with_one_name() {
    let (_, problem) = load_text(FIG2).unwrap();
    let kinds = ProblemKinds::problem();
    let name_fn = |op: OperationId| (op.index() == 0).then(|| "op0".to_string());
    let saved = save_problem(&problem, "fig2", "Problem", name_fn, &kinds).unwrap();

    let dependence_lists: Vec<String> = saved
        .operations
        .iter()
        .map(|op| format_entries(&encode_dependences(&op.operands, &op.dependences)))
        .collect();
    assert_eq!(dependence_lists, vec!["()", "(%0)", "(@op0)"]);
    assert_eq!(saved.operations[0].name.as_deref(), Some("op0"));
    assert_eq!(saved.operations[1].name, None);
}

#[test_case(FIG2 ; "plain problem")]
#[test_case(MODULO ; "modulo problem")]
fn test_canonical_text_round_trip(source: &str) {
    let (instance, problem) = load_text(source).unwrap();
    assert_eq!(InstancePrinter::default().print(&instance), source);
    assert_eq!(save_text(&problem, original_names(&instance)), source);
}

#[test]
fn test_round_trip_with_foreign_value_names() {
    let source = r#"
instance @x of "CyclicProblem" [#ssp.II<4>] {
  operator_type @t [#ssp.latency<1>]
  // values named out of order
  %b = operation @first(%a [#ssp.distance<2>], @third, @second) [#ssp.link<@t>]
  %a = operation @second(%b)
  operation @third(%a, %b) {origin = "test"}
}"#;
    let (instance, problem) = load_text(source).unwrap();
    let saved = save_text(&problem, original_names(&instance));
    let (_, reloaded) = load_text(&saved).unwrap();
    assert_eq!(summary(&reloaded), summary(&problem));
}

#[test]
fn test_unresolved_reference_produces_no_problem() {
    let instance = parse_instance("instance @x of \"Problem\" { operation @a() operation @b(@a, @c) }").unwrap();
    let err = load_problem(&instance, &ProblemKinds::problem()).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Reference);
    assert!(err.to_string().contains("@c"));
}

#[test_case("Problem", "instance" ; "instance interval on plain problem")]
#[test_case("Problem", "dependence" ; "distance on plain problem")]
#[test_case("CyclicProblem", "limit" ; "limit on cyclic problem")]
fn test_preset_rejects_foreign_properties(problem: &str, what: &str) {
    let body = match what {
        "instance" => "[#ssp.II<1>] { }".to_string(),
        "dependence" => "{ %0 = operation() operation(%0 [#ssp.distance<1>]) }".to_string(),
        _ => "{ operator_type @t [#ssp.limit<1>] }".to_string(),
    };
    let source = format!("instance @x of \"{}\" {}", problem, body);
    let err = load_text(&source).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Property);
}

/// Reads `#ssp.latency<n>` as a limit
struct LatencyAsLimit;

impl PropertyKind<OperatorType> for LatencyAsLimit {
    fn name(&self) -> &'static str {
        "latency-as-limit"
    }

    fn accepts(&self, attr: &PropertyAttr) -> bool {
        LatencyKind.accepts(attr)
    }

    fn install(&self, problem: &mut Problem, point: &OperatorType, attr: &PropertyAttr) -> SspResult<()> {
        if let Some(value) = attr.single_param().and_then(AttrParam::as_integer) {
            problem.set_limit(point.clone(), value as u32);
        }
        Ok(())
    }

    fn query(&self, _problem: &Problem, _point: &OperatorType) -> Option<PropertyAttr> {
        None
    }
}

#[test]
fn test_first_match_dispatch_during_load() {
    let instance = parse_instance("instance @x of \"Problem\" { operator_type @t [#ssp.latency<5>] }").unwrap();
    let t = OperatorType::new("t");

    let mut kinds = ProblemKinds::problem();
    kinds.operator_type = PropertyKinds::new().with(LatencyKind).with(LatencyAsLimit);
    let problem = load_problem(&instance, &kinds).unwrap();
    assert_eq!((problem.latency(&t), problem.limit(&t)), (Some(5), None));

    kinds.operator_type = PropertyKinds::new().with(LatencyAsLimit).with(LatencyKind);
    let problem = load_problem(&instance, &kinds).unwrap();
    assert_eq!((problem.latency(&t), problem.limit(&t)), (None, Some(5)));
}

#[test]
fn test_synthesized_names_are_unique() {
    let mut problem = Problem::new("fan", "Problem");
    let sink = problem.insert_operation(0);
    let sources: Vec<_> = (0..6).map(|_| problem.insert_operation(0)).collect();
    for &source in &sources {
        problem.insert_dependence(Dependence::auxiliary(source, sink)).unwrap();
    }

    // caller-supplied names overlapping the synthesized scheme
    let name_fn = |op: OperationId| match op.index() {
        0 => Some("Op1".to_string()),
        3 => Some("Op4".to_string()),
        _ => None,
    };
    let saved = save_problem(&problem, "fan", "Problem", name_fn, &ProblemKinds::problem()).unwrap();

    let names: Vec<String> = saved.operations.iter().filter_map(|op| op.name.clone()).collect();
    assert_eq!(names.len(), 7);
    let mut unique = names.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), names.len());
    assert_eq!(saved.operations[0].name.as_deref(), Some("Op1"));
    assert_eq!(saved.operations[3].name.as_deref(), Some("Op4"));
    assert!(verify_instance(&saved).is_ok());
}

#[test]
fn test_check_rejects_zero_distance_cycle() {
    let source = r#"instance @x of "CyclicProblem" {
  operator_type @t [#ssp.latency<1>]
  %0 = operation @a(@b) [#ssp.link<@t>]
  operation @b(%0) [#ssp.link<@t>]
}"#;
    let (_, problem) = load_text(source).unwrap();
    assert!(problem.check().is_err());
}

/// Random problem: per operation, operand sources, auxiliary sources and a distance flag
fn problem_shapes() -> impl Strategy<Value = Vec<(Vec<usize>, Vec<usize>, bool)>> {
    (1usize..7).prop_flat_map(|n| {
        prop::collection::vec(
            (prop::collection::vec(0..n, 0..3), prop::collection::vec(0..n, 0..3), any::<bool>()),
            n,
        )
    })
}

fn build_problem(shape: &[(Vec<usize>, Vec<usize>, bool)]) -> Problem {
    let mut problem = Problem::new("random", "CyclicProblem");
    let ops: Vec<_> = shape.iter().map(|_| problem.insert_operation(1)).collect();
    for (op, (operands, aux, with_distance)) in ops.iter().zip(shape) {
        let operands = operands.iter().map(|&i| Operand::new(ops[i], 0)).collect();
        problem.set_operands(*op, operands).unwrap();
        for &i in aux {
            let _ = problem.insert_dependence(Dependence::auxiliary(ops[i], *op));
        }
        if *with_distance {
            let deps: Vec<_> = problem.dependences(*op).collect();
            for (k, dep) in deps.into_iter().enumerate() {
                problem.set_distance(dep, k as u32).unwrap();
            }
        }
    }
    problem
}

proptest! {
    #[test]
    fn prop_saved_records_keep_slot_order(shape in problem_shapes()) {
        let problem = build_problem(&shape);
        let kinds = ProblemKinds::cyclic_problem();
        let saved = save_problem(&problem, "random", "CyclicProblem", |_| None, &kinds).unwrap();

        for (position, op) in saved.operations.iter().enumerate() {
            prop_assert!(validate_dependences(&op.describe(position), op.num_operands(), &op.dependences).is_ok());
        }

        let reloaded = load_problem(&saved, &kinds).unwrap();
        prop_assert_eq!(summary(&reloaded), summary(&problem));
    }
}
