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


//! Built-in `#ssp.*` property kinds

use super::PropertyKind;
use crate::document::{AttrParam, PropertyAttr};
use crate::error::{SspError, SspResult};
use ssp_core::{Dependence, OperationId, OperatorType, Problem};

const DIALECT: &str = "ssp";

/// The non-negative integer parameter of `#ssp.<mnemonic><n>`
fn integer_param(attr: &PropertyAttr, mnemonic: &str) -> Option<u32> {
    if !attr.is(DIALECT, mnemonic) {
        return None;
    }
    attr.single_param()
        .and_then(AttrParam::as_integer)
        .and_then(|value| u32::try_from(value).ok())
}

fn integer_attr(mnemonic: &str, value: u32) -> PropertyAttr {
    PropertyAttr::new(DIALECT, mnemonic, vec![AttrParam::Integer(i64::from(value))])
}

fn expect_integer(attr: &PropertyAttr, mnemonic: &str, point: String) -> SspResult<u32> {
    integer_param(attr, mnemonic).ok_or_else(|| SspError::unrecognized_property(point, attr))
}

/// `#ssp.link<@opr>`: the operator type an operation is bound to
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkKind;

impl LinkKind {
    fn target(attr: &PropertyAttr) -> Option<&str> {
        if !attr.is(DIALECT, "link") {
            return None;
        }
        attr.single_param().and_then(AttrParam::as_symbol)
    }
}

impl PropertyKind<OperationId> for LinkKind {
    fn name(&self) -> &'static str {
        "link"
    }

    fn accepts(&self, attr: &PropertyAttr) -> bool {
        Self::target(attr).is_some()
    }

    fn install(&self, problem: &mut Problem, point: &OperationId, attr: &PropertyAttr) -> SspResult<()> {
        let target = Self::target(attr).ok_or_else(|| SspError::unrecognized_property(point.to_string(), attr))?;
        problem
            .set_linked_operator_type(*point, OperatorType::new(target))
            .map_err(|e| SspError::model(format!("linking {}", point), e))
    }

    fn query(&self, problem: &Problem, point: &OperationId) -> Option<PropertyAttr> {
        let opr = problem.linked_operator_type(*point)?;
        Some(PropertyAttr::new(DIALECT, "link", vec![AttrParam::Symbol(opr.name().to_string())]))
    }
}

/// `#ssp.start_time<n>`
#[derive(Debug, Clone, Copy, Default)]
pub struct StartTimeKind;

impl PropertyKind<OperationId> for StartTimeKind {
    fn name(&self) -> &'static str {
        "start_time"
    }

    fn accepts(&self, attr: &PropertyAttr) -> bool {
        integer_param(attr, "start_time").is_some()
    }

    fn install(&self, problem: &mut Problem, point: &OperationId, attr: &PropertyAttr) -> SspResult<()> {
        let time = expect_integer(attr, "start_time", point.to_string())?;
        problem
            .set_start_time(*point, time)
            .map_err(|e| SspError::model(format!("scheduling {}", point), e))
    }

    fn query(&self, problem: &Problem, point: &OperationId) -> Option<PropertyAttr> {
        problem.start_time(*point).map(|time| integer_attr("start_time", time))
    }
}

/// `#ssp.latency<n>`
#[derive(Debug, Clone, Copy, Default)]
pub struct LatencyKind;

impl PropertyKind<OperatorType> for LatencyKind {
    fn name(&self) -> &'static str {
        "latency"
    }

    fn accepts(&self, attr: &PropertyAttr) -> bool {
        integer_param(attr, "latency").is_some()
    }

    fn install(&self, problem: &mut Problem, point: &OperatorType, attr: &PropertyAttr) -> SspResult<()> {
        let latency = expect_integer(attr, "latency", point.to_string())?;
        problem.set_latency(point.clone(), latency);
        Ok(())
    }

    fn query(&self, problem: &Problem, point: &OperatorType) -> Option<PropertyAttr> {
        problem.latency(point).map(|latency| integer_attr("latency", latency))
    }
}

/// `#ssp.limit<n>`: how many operations may use an operator type per time step
#[derive(Debug, Clone, Copy, Default)]
pub struct LimitKind;

impl PropertyKind<OperatorType> for LimitKind {
    fn name(&self) -> &'static str {
        "limit"
    }

    fn accepts(&self, attr: &PropertyAttr) -> bool {
        integer_param(attr, "limit").is_some()
    }

    fn install(&self, problem: &mut Problem, point: &OperatorType, attr: &PropertyAttr) -> SspResult<()> {
        let limit = expect_integer(attr, "limit", point.to_string())?;
        problem.set_limit(point.clone(), limit);
        Ok(())
    }

    fn query(&self, problem: &Problem, point: &OperatorType) -> Option<PropertyAttr> {
        problem.limit(point).map(|limit| integer_attr("limit", limit))
    }
}

/// `#ssp.distance<n>`
#[derive(Debug, Clone, Copy, Default)]
pub struct DistanceKind;

impl PropertyKind<Dependence> for DistanceKind {
    fn name(&self) -> &'static str {
        "distance"
    }

    fn accepts(&self, attr: &PropertyAttr) -> bool {
        integer_param(attr, "distance").is_some()
    }

    fn install(&self, problem: &mut Problem, point: &Dependence, attr: &PropertyAttr) -> SspResult<()> {
        let distance = expect_integer(attr, "distance", point.to_string())?;
        problem.set_distance(*point, distance).map_err(|e| SspError::model("setting distance", e))
    }

    fn query(&self, problem: &Problem, point: &Dependence) -> Option<PropertyAttr> {
        problem.distance(point).map(|distance| integer_attr("distance", distance))
    }
}

/// `#ssp.II<n>`
#[derive(Debug, Clone, Copy, Default)]
pub struct InitiationIntervalKind;

impl PropertyKind<()> for InitiationIntervalKind {
    fn name(&self) -> &'static str {
        "initiation_interval"
    }

    fn accepts(&self, attr: &PropertyAttr) -> bool {
        integer_param(attr, "II").is_some()
    }

    fn install(&self, problem: &mut Problem, _point: &(), attr: &PropertyAttr) -> SspResult<()> {
        let ii = expect_integer(attr, "II", "instance".to_string())?;
        problem.set_initiation_interval(ii);
        Ok(())
    }

    fn query(&self, problem: &Problem, _point: &()) -> Option<PropertyAttr> {
        problem.initiation_interval().map(|ii| integer_attr("II", ii))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ssp_core::Operand;

    fn attr(mnemonic: &str, param: AttrParam) -> PropertyAttr {
        PropertyAttr::new(DIALECT, mnemonic, vec![param])
    }

    #[test]
    fn test_integer_kinds_reject_malformed_values() {
        assert!(LatencyKind.accepts(&attr("latency", AttrParam::Integer(0))));
        assert!(!LatencyKind.accepts(&attr("latency", AttrParam::Integer(-1))));
        assert!(!LatencyKind.accepts(&attr("latency", AttrParam::Integer(i64::from(u32::MAX) + 1))));
        assert!(!LatencyKind.accepts(&attr("latency", AttrParam::Symbol("x".to_string()))));
        assert!(!LatencyKind.accepts(&PropertyAttr::new("other", "latency", vec![AttrParam::Integer(1)])));
        assert!(!LatencyKind.accepts(&PropertyAttr::new(DIALECT, "latency", vec![])));
        assert!(!LimitKind.accepts(&attr("latency", AttrParam::Integer(1))));
    }

    #[test]
    fn test_operation_kinds() {
        let mut problem = Problem::new("p", "Problem");
        let op = problem.insert_operation(0);

        LinkKind.install(&mut problem, &op, &attr("link", AttrParam::Symbol("alu".to_string()))).unwrap();
        StartTimeKind.install(&mut problem, &op, &attr("start_time", AttrParam::Integer(5))).unwrap();

        assert_eq!(problem.linked_operator_type(op), Some(&OperatorType::new("alu")));
        assert_eq!(StartTimeKind.query(&problem, &op).unwrap().to_string(), "#ssp.start_time<5>");
        assert_eq!(LinkKind.query(&problem, &op).unwrap().to_string(), "#ssp.link<@alu>");
        assert!(!LinkKind.accepts(&attr("link", AttrParam::Integer(1))));
    }

    #[test]
    fn test_distance_requires_existing_dependence() {
        let mut problem = Problem::new("p", "CyclicProblem");
        let a = problem.insert_operation(1);
        let b = problem.insert_operation(0);
        problem.set_operands(a, vec![]).unwrap();
        problem.set_operands(b, vec![Operand::new(a, 0)]).unwrap();

        let data = problem.data_dependence(b, 0).unwrap();
        DistanceKind.install(&mut problem, &data, &attr("distance", AttrParam::Integer(2))).unwrap();
        assert_eq!(problem.distance(&data), Some(2));

        let missing = Dependence::auxiliary(b, a);
        let err = DistanceKind.install(&mut problem, &missing, &attr("distance", AttrParam::Integer(1))).unwrap_err();
        assert!(matches!(err, SspError::Model { .. }));
    }

    #[test]
    fn test_initiation_interval() {
        let mut problem = Problem::new("p", "ModuloProblem");
        assert_eq!(InitiationIntervalKind.query(&problem, &()), None);
        InitiationIntervalKind.install(&mut problem, &(), &attr("II", AttrParam::Integer(4))).unwrap();
        assert_eq!(InitiationIntervalKind.query(&problem, &()).unwrap().to_string(), "#ssp.II<4>");
    }
}
