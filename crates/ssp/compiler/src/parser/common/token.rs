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


//! Tokens of the instance text format

use super::position::Span;
use std::fmt;

/// Lexeme with its classification and location
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub token_type: TokenType,
    /// Exact source text, including sigils and quotes
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    pub fn new(token_type: TokenType, lexeme: String, span: Span) -> Self {
        Self { token_type, lexeme, span }
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        matches!(self.token_type, TokenType::Keyword(k) if k == keyword)
    }

    pub fn is_delimiter(&self, delimiter: Delimiter) -> bool {
        matches!(self.token_type, TokenType::Delimiter(d) if d == delimiter)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenType {
    IntegerLiteral(i64),
    /// Unescaped contents of `"..."`
    StringLiteral(String),
    Identifier(String),
    Keyword(Keyword),
    /// `@name` or `@"quoted name"`
    SymbolRef(String),
    /// `%name`
    ValueRef(String),
    /// `#dialect.mnemonic`
    AttributeRef(String),
    Delimiter(Delimiter),
    Comment(String),
    Eof,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self {
            TokenType::IntegerLiteral(_) => "integer",
            TokenType::StringLiteral(_) => "string",
            TokenType::Identifier(_) => "identifier",
            TokenType::Keyword(keyword) => keyword.as_str(),
            TokenType::SymbolRef(_) => "symbol reference",
            TokenType::ValueRef(_) => "value",
            TokenType::AttributeRef(_) => "attribute",
            TokenType::Delimiter(delimiter) => return write!(f, "'{}'", delimiter.as_char()),
            TokenType::Comment(_) => "comment",
            TokenType::Eof => "end of input",
        };
        f.write_str(what)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Instance,
    Of,
    OperatorType,
    Operation,
}

impl Keyword {
    const ALL: [Keyword; 4] = [Keyword::Instance, Keyword::Of, Keyword::OperatorType, Keyword::Operation];

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Instance => "instance",
            Keyword::Of => "of",
            Keyword::OperatorType => "operator_type",
            Keyword::Operation => "operation",
        }
    }

    /// Keyword spelled `word`, if any
    pub fn lookup(word: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|keyword| keyword.as_str() == word)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Single-character punctuation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delimiter {
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    LeftBrace,
    RightBrace,
    LeftAngle,
    RightAngle,
    Comma,
    Equals,
}

impl Delimiter {
    const TABLE: [(char, Delimiter); 10] = [
        ('(', Delimiter::LeftParen),
        (')', Delimiter::RightParen),
        ('[', Delimiter::LeftBracket),
        (']', Delimiter::RightBracket),
        ('{', Delimiter::LeftBrace),
        ('}', Delimiter::RightBrace),
        ('<', Delimiter::LeftAngle),
        ('>', Delimiter::RightAngle),
        (',', Delimiter::Comma),
        ('=', Delimiter::Equals),
    ];

    pub fn from_char(c: char) -> Option<Self> {
        Self::TABLE.iter().find(|(ch, _)| *ch == c).map(|(_, delimiter)| *delimiter)
    }

    pub fn as_char(self) -> char {
        Self::TABLE.iter().find(|(_, delimiter)| *delimiter == self).map_or('?', |(ch, _)| *ch)
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::common::Position;

    #[test]
    fn test_keyword_lookup() {
        for keyword in Keyword::ALL {
            assert_eq!(Keyword::lookup(keyword.as_str()), Some(keyword));
        }
        assert_eq!(Keyword::lookup("op"), None);
        assert_eq!(Keyword::lookup("Operation"), None);
    }

    #[test]
    fn test_delimiter_chars() {
        for c in "()[]{}<>,=".chars() {
            assert_eq!(Delimiter::from_char(c).map(Delimiter::as_char), Some(c));
        }
        assert_eq!(Delimiter::from_char(';'), None);
    }

    #[test]
    fn test_token_predicates() {
        let token = Token::new(TokenType::Keyword(Keyword::Operation), "operation".to_string(), Span::at(Position::start()));
        assert!(token.is_keyword(Keyword::Operation));
        assert!(!token.is_keyword(Keyword::Of));
        assert!(!token.is_delimiter(Delimiter::Comma));
        assert_eq!(TokenType::Delimiter(Delimiter::LeftAngle).to_string(), "'<'");
    }
}
