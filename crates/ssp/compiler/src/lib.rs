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


//! Static scheduling problem compiler
//!
//! Converts between the textual/document form of a scheduling problem
//! instance and the [`Problem`](ssp_core::Problem) model:
//!
//! - [`parser`]: text to [`Instance`](document::Instance)
//! - [`codec`]: per-operation dependence encoding and the canonical printer
//! - [`verify`]: symbol, value and reference checks
//! - [`properties`]: property dispatch for the four attachment points
//! - [`loader`] / [`saver`]: instance to problem and back

pub mod codec;
pub mod document;
pub mod error;
pub mod loader;
pub mod parser;
pub mod properties;
pub mod saver;
pub mod verify;

pub use codec::{InstancePrinter, PrinterConfig};
pub use document::Instance;
pub use error::{ErrorCategory, SspError, SspResult};
pub use loader::load_problem;
pub use parser::{ParserConfig, parse_instance, parse_instance_with};
pub use properties::{ProblemKinds, PropertyKind, PropertyKinds};
pub use saver::{SaverConfig, save_problem, save_problem_with};
pub use verify::verify_instance;
