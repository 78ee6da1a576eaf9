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


//! Lexical and syntactic errors

use super::{Position, Token, TokenType};
use std::fmt;
use thiserror::Error;

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Error found while reading instance text, with the position it was found at
#[derive(Error, Debug, Clone, PartialEq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub position: Position,
    pub message: String,
    /// Extra hint shown after the message
    pub note: Option<String>,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, position: Position, message: impl Into<String>) -> Self {
        Self {
            kind,
            position,
            message: message.into(),
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn syntax_error(position: Position, message: impl Into<String>) -> Self {
        Self::new(ParseErrorKind::SyntaxError, position, message)
    }

    /// `token` is not what the grammar allows here
    pub fn unexpected_token(token: &Token, expected: &str) -> Self {
        match token.token_type {
            TokenType::Eof => Self::new(ParseErrorKind::UnexpectedEof, token.span.start, format!("Expected {} before end of input", expected)),
            _ => Self::new(
                ParseErrorKind::UnexpectedToken,
                token.span.start,
                format!("Expected {}, found '{}'", expected, token.lexeme),
            ),
        }
    }

    /// Render as `file:line:col: error[code]: message`
    pub fn render(&self, file_name: &str) -> String {
        let mut rendered = format!("{}:{}: error[{}]: {}", file_name, self.position, self.kind.code(), self.message);
        if let Some(note) = &self.note {
            rendered.push_str(&format!("\n  note: {}", note));
        }
        rendered
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}: {}", self.kind, self.position, self.message)
    }
}

/// Categories of parse errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    SyntaxError,
    UnexpectedToken,
    UnexpectedEof,
    InvalidCharacter,
    InvalidNumber,
    InvalidEscapeSequence,
    UnterminatedString,
    InvalidIdentifier,
    RecursionLimitExceeded,
    /// An operator type declared after the first operation
    MisplacedDeclaration,
    /// A comment while comments are disabled
    CommentNotAllowed,
}

impl ParseErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            ParseErrorKind::SyntaxError => "P001",
            ParseErrorKind::UnexpectedToken => "P002",
            ParseErrorKind::UnexpectedEof => "P003",
            ParseErrorKind::InvalidCharacter => "P004",
            ParseErrorKind::InvalidNumber => "P005",
            ParseErrorKind::InvalidEscapeSequence => "P006",
            ParseErrorKind::UnterminatedString => "P007",
            ParseErrorKind::InvalidIdentifier => "P008",
            ParseErrorKind::RecursionLimitExceeded => "P009",
            ParseErrorKind::MisplacedDeclaration => "P010",
            ParseErrorKind::CommentNotAllowed => "P011",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ParseErrorKind::SyntaxError => "syntax error",
            ParseErrorKind::UnexpectedToken => "unexpected token",
            ParseErrorKind::UnexpectedEof => "unexpected end of input",
            ParseErrorKind::InvalidCharacter => "invalid character",
            ParseErrorKind::InvalidNumber => "invalid integer",
            ParseErrorKind::InvalidEscapeSequence => "invalid escape sequence",
            ParseErrorKind::UnterminatedString => "unterminated string",
            ParseErrorKind::InvalidIdentifier => "invalid name",
            ParseErrorKind::RecursionLimitExceeded => "attribute nesting too deep",
            ParseErrorKind::MisplacedDeclaration => "misplaced declaration",
            ParseErrorKind::CommentNotAllowed => "comment not allowed",
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::common::{Delimiter, Span};

    fn token(token_type: TokenType, lexeme: &str, line: usize, column: usize) -> Token {
        Token::new(token_type, lexeme.to_string(), Span::at(Position::new(line, column)))
    }

    #[test]
    fn test_unexpected_token_message() {
        let found = token(TokenType::Delimiter(Delimiter::RightBrace), "}", 3, 7);
        let error = ParseError::unexpected_token(&found, "a value");
        assert_eq!(error.kind, ParseErrorKind::UnexpectedToken);
        assert_eq!(error.position, Position::new(3, 7));
        assert_eq!(error.to_string(), "unexpected token at 3:7: Expected a value, found '}'");
    }

    #[test]
    fn test_unexpected_end_of_input() {
        let eof = token(TokenType::Eof, "", 9, 1);
        let error = ParseError::unexpected_token(&eof, "'}'");
        assert_eq!(error.kind, ParseErrorKind::UnexpectedEof);
        assert_eq!(error.message, "Expected '}' before end of input");
    }

    #[test]
    fn test_render_with_note() {
        let error = ParseError::new(ParseErrorKind::MisplacedDeclaration, Position::new(4, 3), "operator_type after operation")
            .with_note("declare operator types first");
        assert_eq!(
            error.render("fig2.ssp"),
            "fig2.ssp:4:3: error[P010]: operator_type after operation\n  note: declare operator types first"
        );
    }

    #[test]
    fn test_kind_codes_are_distinct() {
        let kinds = [
            ParseErrorKind::SyntaxError,
            ParseErrorKind::UnexpectedToken,
            ParseErrorKind::UnexpectedEof,
            ParseErrorKind::InvalidCharacter,
            ParseErrorKind::InvalidNumber,
            ParseErrorKind::InvalidEscapeSequence,
            ParseErrorKind::UnterminatedString,
            ParseErrorKind::InvalidIdentifier,
            ParseErrorKind::RecursionLimitExceeded,
            ParseErrorKind::MisplacedDeclaration,
            ParseErrorKind::CommentNotAllowed,
        ];
        let mut codes: Vec<_> = kinds.iter().map(ParseErrorKind::code).collect();
        codes.dedup();
        assert_eq!(codes.len(), kinds.len());
    }
}
