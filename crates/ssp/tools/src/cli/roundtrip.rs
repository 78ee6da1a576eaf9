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


//! `ssp roundtrip`: load an instance into a problem and save it back

use super::{kinds_for, read_instance, write_output};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use ssp_compiler::{InstancePrinter, SaverConfig, load_problem, save_problem_with, verify_instance};
use ssp_core::OperationId;
use std::path::PathBuf;

/// Output encoding
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Emit {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug)]
pub struct RoundtripArgs {
    /// Input instance file
    pub input: PathBuf,

    /// Output encoding
    #[arg(long, value_enum, default_value_t = Emit::Text)]
    pub emit: Emit,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Drop the instance's operation names and synthesize only the ones needed
    #[arg(long)]
    pub strip_names: bool,

    /// Prefix for synthesized operation names
    #[arg(long, default_value = "Op")]
    pub name_prefix: String,
}

pub fn run_roundtrip(args: &RoundtripArgs) -> Result<()> {
    let instance = read_instance(&args.input)?;
    verify_instance(&instance)?;
    let kinds = kinds_for(&instance)?;
    let problem = load_problem(&instance, &kinds).context("Failed to load problem")?;

    let name_fn = |op: OperationId| {
        if args.strip_names {
            return None;
        }
        instance.operations.get(op.index()).and_then(|decl| decl.name.clone())
    };
    let config = SaverConfig::new().with_name_prefix(&args.name_prefix);
    let saved = save_problem_with(&problem, &instance.name, &instance.problem, name_fn, &kinds, &config).context("Failed to save problem")?;

    let content = match args.emit {
        Emit::Text => InstancePrinter::default().print(&saved),
        Emit::Json => {
            let mut json = serde_json::to_string_pretty(&saved)?;
            json.push('\n');
            json
        }
    };
    write_output(args.output.as_deref(), &content)
}
