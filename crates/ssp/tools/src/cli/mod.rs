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


//! Subcommands of the `ssp` tool

pub mod check;
pub mod format;
pub mod roundtrip;
pub mod verify;

use anyhow::{Context, Result, anyhow};
use ssp_compiler::{Instance, ProblemKinds, SspError, parse_instance};
use std::fs;
use std::path::Path;

/// Read and parse an instance file
pub fn read_instance(path: &Path) -> Result<Instance> {
    let source = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    parse_instance(&source).map_err(|err| match err {
        SspError::Parse(parse) => anyhow!(parse.render(&path.display().to_string())),
        other => anyhow::Error::new(other).context(format!("Failed to parse {}", path.display())),
    })
}

/// Property kinds matching the instance's problem name
pub fn kinds_for(instance: &Instance) -> Result<ProblemKinds> {
    ProblemKinds::for_problem_name(&instance.problem)
        .with_context(|| format!("Unknown problem kind \"{}\" in instance @{}", instance.problem, instance.name))
}

/// Write to `output`, or to stdout when no file is given
pub fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => fs::write(path, content).with_context(|| format!("Failed to write {}", path.display())),
        None => {
            print!("{}", content);
            Ok(())
        }
    }
}
