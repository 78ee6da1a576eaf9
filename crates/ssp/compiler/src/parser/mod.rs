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


//! Parser for the scheduling problem text format
//!
//! - **Common**: positions, tokens, errors and configuration
//! - **Lexer**: tokenization
//! - **Syntax**: recursive descent into an [`Instance`]
//!
//! # Example Usage
//!
//! ```rust
//! use ssp_compiler::parser::{ParserConfig, parse_instance_with};
//!
//! let config = ParserConfig::new().with_max_recursion_depth(16);
//! let instance = parse_instance_with("instance @empty of \"Problem\" {}", config).unwrap();
//! assert_eq!(instance.name, "empty");
//! ```

pub mod common;
pub mod lexer;
pub mod syntax;
pub mod traits;

pub use common::{Delimiter, Keyword, ParseContext, ParseError, ParseErrorKind, ParseResult, ParserConfig, Position, Token, TokenType, position::Span};
pub use lexer::SspLexer;
pub use syntax::InstanceParser;
pub use traits::{Lexer, Parser};

use crate::codec::validate_dependences;
use crate::document::Instance;
use crate::error::SspResult;
use tracing::debug;

/// Create a default parser configuration
pub fn default_config() -> ParserConfig {
    ParserConfig::new()
}

/// Parse an instance with the default configuration
pub fn parse_instance(source: &str) -> SspResult<Instance> {
    parse_instance_with(source, default_config())
}

/// Parse an instance and validate every operation's dependence records
pub fn parse_instance_with(source: &str, config: ParserConfig) -> SspResult<Instance> {
    let instance = InstanceParser::with_config(config).parse(source)?;
    for (position, op) in instance.operations.iter().enumerate() {
        validate_dependences(&op.describe(position), op.num_operands(), &op.dependences)?;
    }
    debug!(instance = %instance.name, operations = instance.operations.len(), "parsed instance");
    Ok(instance)
}
