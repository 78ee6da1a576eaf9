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


//! `ssp verify`: symbol, value and dependence checks on an instance

use super::read_instance;
use anyhow::{Context, Result};
use clap::Parser;
use ssp_compiler::verify_instance;
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct VerifyArgs {
    /// Input instance file
    pub input: PathBuf,
}

/// Verify the instance and return a one-line report
pub fn run_verify(args: &VerifyArgs) -> Result<String> {
    let instance = read_instance(&args.input)?;
    verify_instance(&instance).with_context(|| format!("Verification of {} failed", args.input.display()))?;
    Ok(format!(
        "@{}: ok ({} operator types, {} operations)",
        instance.name,
        instance.operator_types.len(),
        instance.operations.len()
    ))
}
