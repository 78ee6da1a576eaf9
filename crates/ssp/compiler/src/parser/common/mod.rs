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


//! Pieces shared by the lexer, the parser and the printer

pub mod error;
pub mod position;
pub mod token;

pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use position::{Position, SourceCursor, Span};
pub use token::{Delimiter, Keyword, Token, TokenType};

/// Parser options
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// How deep `#d.m<#d.m<...>>` parameters may nest
    pub max_recursion_depth: usize,
    pub allow_comments: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_recursion_depth: 64,
            allow_comments: true,
        }
    }
}

impl ParserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_recursion_depth(self, max_recursion_depth: usize) -> Self {
        Self { max_recursion_depth, ..self }
    }

    /// Accept or reject `//` comments
    pub fn with_comments(self, allow_comments: bool) -> Self {
        Self { allow_comments, ..self }
    }
}

/// Mutable state of one parse run
#[derive(Debug, Clone, Default)]
pub struct ParseContext {
    pub config: ParserConfig,
    depth: usize,
}

impl ParseContext {
    pub fn new(config: ParserConfig) -> Self {
        Self { config, depth: 0 }
    }

    /// Current attribute nesting
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Step into a nested attribute, failing once the configured limit is reached
    pub fn descend(&mut self, position: Position) -> ParseResult<()> {
        let limit = self.config.max_recursion_depth;
        if self.depth >= limit {
            return Err(ParseError::new(
                ParseErrorKind::RecursionLimitExceeded,
                position,
                format!("attribute parameters nest deeper than {} levels", limit),
            ));
        }
        self.depth += 1;
        Ok(())
    }

    pub fn ascend(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn reset(&mut self) {
        self.depth = 0;
    }
}

/// Name and string helpers
pub mod utils {
    pub fn is_identifier_start(c: char) -> bool {
        c == '_' || c.is_ascii_alphabetic()
    }

    pub fn is_identifier_continue(c: char) -> bool {
        is_identifier_start(c) || c.is_ascii_digit() || c == '$' || c == '.'
    }

    /// Whether `name` can be printed after `@` without quotes
    pub fn is_valid_identifier(name: &str) -> bool {
        name.chars().next().is_some_and(is_identifier_start) && name.chars().all(is_identifier_continue)
    }

    /// Inverse of the escapes the lexer accepts inside `"..."`
    pub fn escape_string(s: &str) -> String {
        let mut escaped = String::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '"' | '\\' => {
                    escaped.push('\\');
                    escaped.push(c);
                }
                '\n' => escaped.push_str("\\n"),
                '\r' => escaped.push_str("\\r"),
                '\t' => escaped.push_str("\\t"),
                _ => escaped.push(c),
            }
        }
        escaped
    }

    /// `@name`, or `@"name"` when quoting is needed
    pub fn symbol_name(name: &str) -> String {
        if is_valid_identifier(name) {
            format!("@{}", name)
        } else {
            format!("@\"{}\"", escape_string(name))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builders() {
        let config = ParserConfig::new().with_max_recursion_depth(8).with_comments(false);
        assert_eq!(config.max_recursion_depth, 8);
        assert!(!config.allow_comments);
        assert!(ParserConfig::default().allow_comments);
    }

    #[test]
    fn test_nesting_limit() {
        let mut context = ParseContext::new(ParserConfig::new().with_max_recursion_depth(1));
        context.descend(Position::start()).unwrap();
        let err = context.descend(Position::new(1, 9)).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::RecursionLimitExceeded);
        assert_eq!(err.position, Position::new(1, 9));

        context.ascend();
        context.ascend();
        assert_eq!(context.depth(), 0);
    }

    #[test]
    fn test_identifiers() {
        for name in ["op0", "_x", "a.b$c"] {
            assert!(utils::is_valid_identifier(name), "{}", name);
        }
        for name in ["", "0op", "with-dash", "sp ace"] {
            assert!(!utils::is_valid_identifier(name), "{}", name);
        }
    }

    #[test]
    fn test_symbol_name_quoting() {
        assert_eq!(utils::symbol_name("op0"), "@op0");
        assert_eq!(utils::symbol_name("load a"), "@\"load a\"");
        assert_eq!(utils::symbol_name("q\"x\\"), "@\"q\\\"x\\\\\"");
        assert_eq!(utils::escape_string("a\tb\n"), "a\\tb\\n");
    }
}
