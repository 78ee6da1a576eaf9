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


//! `ssp` command-line tool

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use ssp_tools::{CheckArgs, FormatArgs, RoundtripArgs, VerifyArgs, run_check, run_format, run_roundtrip, run_verify};
use tracing::Level;

#[derive(Parser)]
#[command(name = "ssp")]
#[command(about = "Static scheduling problem tools")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print an instance in canonical form
    Format(FormatArgs),
    /// Check symbols, values and dependence records of an instance
    Verify(VerifyArgs),
    /// Load an instance and check the resulting problem
    Check(CheckArgs),
    /// Load an instance and save it back
    Roundtrip(RoundtripArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).with_writer(std::io::stderr).init();

    match cli.command {
        Commands::Format(args) => run_format(&args)?,
        Commands::Verify(args) => println!("{}", run_verify(&args)?),
        Commands::Check(args) => println!("{}", run_check(&args)?),
        Commands::Roundtrip(args) => run_roundtrip(&args)?,
    }

    Ok(())
}
