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


//! `ssp check`: load an instance and check the resulting problem

use super::{kinds_for, read_instance};
use anyhow::{Context, Result};
use clap::Parser;
use ssp_compiler::{load_problem, verify_instance};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Input instance file
    pub input: PathBuf,
}

/// Load the instance into a problem and run the problem's own checks
pub fn run_check(args: &CheckArgs) -> Result<String> {
    let instance = read_instance(&args.input)?;
    verify_instance(&instance)?;
    let kinds = kinds_for(&instance)?;
    let problem = load_problem(&instance, &kinds).context("Failed to load problem")?;
    problem.check().with_context(|| format!("Problem @{} is not well formed", problem.instance_name()))?;

    let num_dependences: usize = problem.operations().map(|op| problem.dependences(op).count()).sum();
    info!(instance = problem.instance_name(), dependences = num_dependences, "problem checked");
    Ok(format!(
        "@{} ({}): ok ({} operations, {} dependences)",
        problem.instance_name(),
        problem.problem_name(),
        problem.num_operations(),
        num_dependences
    ))
}
