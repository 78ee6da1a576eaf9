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


//! Property dispatch
//!
//! A [`PropertyKinds`] list names the property kinds a caller recognizes at one
//! attachment point. Decoding tries the kinds in list order for every encoded
//! value and applies the first one that accepts it. Encoding asks every kind,
//! in list order, whether the property is present.

pub mod kinds;

pub use kinds::{DistanceKind, InitiationIntervalKind, LatencyKind, LimitKind, LinkKind, StartTimeKind};

use crate::document::PropertyAttr;
use crate::error::{SspError, SspResult};
use ssp_core::{Dependence, OperationId, OperatorType, Problem};
use std::fmt;
use tracing::trace;

/// Something a property can be attached to
pub trait AttachmentPoint {
    /// Human readable description for diagnostics
    fn describe(&self) -> String;
}

impl AttachmentPoint for () {
    fn describe(&self) -> String {
        "instance".to_string()
    }
}

impl AttachmentPoint for OperatorType {
    fn describe(&self) -> String {
        format!("operator type {}", self)
    }
}

impl AttachmentPoint for OperationId {
    fn describe(&self) -> String {
        self.to_string()
    }
}

impl AttachmentPoint for Dependence {
    fn describe(&self) -> String {
        format!("dependence {}", self)
    }
}

/// A recognized property kind at attachment point `T`
pub trait PropertyKind<T> {
    /// Kind name for diagnostics
    fn name(&self) -> &'static str;

    /// Whether this kind decodes `attr`
    fn accepts(&self, attr: &PropertyAttr) -> bool;

    /// Apply an accepted value to the problem
    fn install(&self, problem: &mut Problem, point: &T, attr: &PropertyAttr) -> SspResult<()>;

    /// Encode the property if the problem has it at `point`
    fn query(&self, problem: &Problem, point: &T) -> Option<PropertyAttr>;
}

/// Ordered list of property kinds for one attachment point
pub struct PropertyKinds<T> {
    kinds: Vec<Box<dyn PropertyKind<T>>>,
}

impl<T> Default for PropertyKinds<T> {
    fn default() -> Self {
        Self { kinds: Vec::new() }
    }
}

impl<T: AttachmentPoint> PropertyKinds<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a kind; earlier kinds take precedence
    pub fn with(mut self, kind: impl PropertyKind<T> + 'static) -> Self {
        self.push(kind);
        self
    }

    pub fn push(&mut self, kind: impl PropertyKind<T> + 'static) {
        self.kinds.push(Box::new(kind));
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.kinds.iter().map(|kind| kind.name()).collect()
    }

    /// Apply every encoded value to `problem`. Values no kind accepts are an error.
    pub fn decode(&self, problem: &mut Problem, point: &T, encoded: Option<&[PropertyAttr]>) -> SspResult<()> {
        for attr in encoded.unwrap_or_default() {
            let Some(kind) = self.kinds.iter().find(|kind| kind.accepts(attr)) else {
                return Err(SspError::unrecognized_property(point.describe(), attr));
            };
            trace!(kind = kind.name(), property = %attr, "decoding property");
            kind.install(problem, point, attr)?;
        }
        Ok(())
    }

    /// Query every kind in order. `None` when no property is present.
    pub fn encode(&self, problem: &Problem, point: &T) -> Option<Vec<PropertyAttr>> {
        let encoded: Vec<PropertyAttr> = self.kinds.iter().filter_map(|kind| kind.query(problem, point)).collect();
        if encoded.is_empty() { None } else { Some(encoded) }
    }
}

impl<T> fmt::Debug for PropertyKinds<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.kinds.iter().map(|kind| kind.name())).finish()
    }
}

/// Kind lists for all four attachment points
#[derive(Debug, Default)]
pub struct ProblemKinds {
    pub operation: PropertyKinds<OperationId>,
    pub operator_type: PropertyKinds<OperatorType>,
    pub dependence: PropertyKinds<Dependence>,
    pub instance: PropertyKinds<()>,
}

impl ProblemKinds {
    /// Operator types with latencies, operations linked and scheduled
    pub fn problem() -> Self {
        Self {
            operation: PropertyKinds::new().with(LinkKind).with(StartTimeKind),
            operator_type: PropertyKinds::new().with(LatencyKind),
            dependence: PropertyKinds::new(),
            instance: PropertyKinds::new(),
        }
    }

    /// Adds dependence distances and an initiation interval
    pub fn cyclic_problem() -> Self {
        let mut kinds = Self::problem();
        kinds.dependence.push(DistanceKind);
        kinds.instance.push(InitiationIntervalKind);
        kinds
    }

    /// Adds operator type limits
    pub fn shared_operators_problem() -> Self {
        let mut kinds = Self::problem();
        kinds.operator_type.push(LimitKind);
        kinds
    }

    pub fn modulo_problem() -> Self {
        let mut kinds = Self::cyclic_problem();
        kinds.operator_type.push(LimitKind);
        kinds
    }

    /// Kind lists for a problem name as written in an instance header
    pub fn for_problem_name(name: &str) -> Option<Self> {
        match name {
            "Problem" => Some(Self::problem()),
            "CyclicProblem" => Some(Self::cyclic_problem()),
            "SharedOperatorsProblem" => Some(Self::shared_operators_problem()),
            "ModuloProblem" => Some(Self::modulo_problem()),
            _ => None,
        }
    }
}
