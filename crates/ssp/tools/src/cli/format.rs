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


//! `ssp format`: print an instance in canonical form

use super::{read_instance, write_output};
use anyhow::Result;
use clap::Parser;
use ssp_compiler::{InstancePrinter, PrinterConfig};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
pub struct FormatArgs {
    /// Input instance file
    pub input: PathBuf,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Spaces per indentation level
    #[arg(long, default_value = "2")]
    pub indent: usize,
}

pub fn run_format(args: &FormatArgs) -> Result<()> {
    let instance = read_instance(&args.input)?;
    let printer = InstancePrinter::new(PrinterConfig::new().with_indent(args.indent));
    info!(instance = %instance.name, "formatting");
    write_output(args.output.as_deref(), &printer.print(&instance))
}
