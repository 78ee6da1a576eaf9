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


//! Lexical analyzer for the scheduling problem text format

use crate::parser::common::{
    Delimiter, Keyword, ParseError, ParseErrorKind, ParseResult, Position, Token, TokenType,
    position::{SourceCursor, Span},
    utils,
};
use crate::parser::traits::Lexer;

/// Tokenizer over a single source text
pub struct SspLexer {
    cursor: SourceCursor,
    at_end: bool,
}

impl SspLexer {
    pub fn new(source: &str) -> Self {
        Self {
            cursor: SourceCursor::new(source),
            at_end: false,
        }
    }

    /// Scan the next token from input
    fn scan_token(&mut self) -> ParseResult<Token> {
        self.cursor.skip_whitespace();
        let start_pos = self.cursor.position();

        let Some(ch) = self.cursor.peek() else {
            return Ok(Token::new(TokenType::Eof, String::new(), Span::at(start_pos)));
        };

        if let Some(delim) = Delimiter::from_char(ch) {
            self.cursor.bump();
            return Ok(self.make_token(TokenType::Delimiter(delim), ch.to_string(), start_pos));
        }

        match ch {
            '/' => self.scan_comment(start_pos),
            '"' => {
                let (value, lexeme) = self.scan_string_literal(start_pos)?;
                Ok(self.make_token(TokenType::StringLiteral(value), lexeme, start_pos))
            }
            '@' => self.scan_symbol_ref(start_pos),
            '%' => self.scan_value_ref(start_pos),
            '#' => self.scan_attribute_ref(start_pos),
            '-' => self.scan_number(start_pos),
            c if c.is_ascii_digit() => self.scan_number(start_pos),
            c if utils::is_identifier_start(c) => Ok(self.scan_identifier_or_keyword(start_pos)),
            _ => Err(ParseError::new(ParseErrorKind::InvalidCharacter, start_pos, format!("Unexpected character '{}'", ch))),
        }
    }

    /// Create a token spanning from `start_pos` to the current position
    fn make_token(&self, token_type: TokenType, lexeme: String, start_pos: Position) -> Token {
        Token::new(token_type, lexeme, self.cursor.span_from(start_pos))
    }

    /// Scan a `//` line comment
    fn scan_comment(&mut self, start_pos: Position) -> ParseResult<Token> {
        self.cursor.bump();
        if self.cursor.bump() != Some('/') {
            return Err(ParseError::new(ParseErrorKind::InvalidCharacter, start_pos, "Expected '//' to start a comment".to_string()));
        }
        let comment = self.cursor.eat_while(|c| c != '\n');
        Ok(self.make_token(TokenType::Comment(comment.clone()), format!("//{}", comment), start_pos))
    }

    /// Scan a quoted string, returning its unescaped value and its lexeme
    fn scan_string_literal(&mut self, start_pos: Position) -> ParseResult<(String, String)> {
        self.cursor.bump();
        let mut value = String::new();
        let mut lexeme = String::from("\"");

        loop {
            let Some(ch) = self.cursor.bump() else {
                return Err(ParseError::new(ParseErrorKind::UnterminatedString, start_pos, "Unterminated string literal".to_string()));
            };
            lexeme.push(ch);
            match ch {
                '"' => break,
                '\\' => {
                    let Some(escaped) = self.cursor.bump() else {
                        return Err(ParseError::new(ParseErrorKind::UnterminatedString, start_pos, "Unterminated string literal".to_string()));
                    };
                    lexeme.push(escaped);
                    match escaped {
                        'n' => value.push('\n'),
                        'r' => value.push('\r'),
                        't' => value.push('\t'),
                        '\\' => value.push('\\'),
                        '"' => value.push('"'),
                        _ => {
                            return Err(ParseError::new(
                                ParseErrorKind::InvalidEscapeSequence,
                                self.cursor.position(),
                                format!("Invalid escape sequence: \\{}", escaped),
                            ));
                        }
                    }
                }
                _ => value.push(ch),
            }
        }

        Ok((value, lexeme))
    }

    /// Scan `@name` or `@"quoted name"`
    fn scan_symbol_ref(&mut self, start_pos: Position) -> ParseResult<Token> {
        self.cursor.bump();
        if self.cursor.peek() == Some('"') {
            let (name, quoted) = self.scan_string_literal(start_pos)?;
            return Ok(self.make_token(TokenType::SymbolRef(name), format!("@{}", quoted), start_pos));
        }

        if !self.cursor.peek().is_some_and(utils::is_identifier_start) {
            return Err(ParseError::new(ParseErrorKind::InvalidIdentifier, start_pos, "Expected a symbol name after '@'".to_string()));
        }
        let name = self.cursor.eat_while(utils::is_identifier_continue);
        Ok(self.make_token(TokenType::SymbolRef(name.clone()), format!("@{}", name), start_pos))
    }

    /// Scan `%name`
    fn scan_value_ref(&mut self, start_pos: Position) -> ParseResult<Token> {
        self.cursor.bump();
        let name = self.cursor.eat_while(utils::is_identifier_continue);
        if name.is_empty() {
            return Err(ParseError::new(ParseErrorKind::InvalidIdentifier, start_pos, "Expected a value name after '%'".to_string()));
        }
        Ok(self.make_token(TokenType::ValueRef(name.clone()), format!("%{}", name), start_pos))
    }

    /// Scan `#dialect.mnemonic`
    fn scan_attribute_ref(&mut self, start_pos: Position) -> ParseResult<Token> {
        self.cursor.bump();
        let name = if self.cursor.peek().is_some_and(utils::is_identifier_start) {
            self.cursor.eat_while(utils::is_identifier_continue)
        } else {
            String::new()
        };

        match name.split_once('.') {
            Some((dialect, mnemonic)) if !dialect.is_empty() && !mnemonic.is_empty() => {
                Ok(self.make_token(TokenType::AttributeRef(name.clone()), format!("#{}", name), start_pos))
            }
            _ => Err(ParseError::new(
                ParseErrorKind::InvalidIdentifier,
                start_pos,
                format!("Expected '#dialect.mnemonic', found '#{}'", name),
            )),
        }
    }

    /// Scan a (possibly negative) integer literal
    fn scan_number(&mut self, start_pos: Position) -> ParseResult<Token> {
        let mut lexeme = String::new();
        if self.cursor.peek() == Some('-') {
            self.cursor.bump();
            lexeme.push('-');
        }
        let digits = self.cursor.eat_while(|c| c.is_ascii_digit());
        lexeme.push_str(&digits);

        if digits.is_empty() {
            return Err(ParseError::new(ParseErrorKind::InvalidNumber, start_pos, "Expected digits after '-'".to_string()));
        }

        match lexeme.parse::<i64>() {
            Ok(value) => Ok(self.make_token(TokenType::IntegerLiteral(value), lexeme, start_pos)),
            Err(_) => Err(ParseError::new(ParseErrorKind::InvalidNumber, start_pos, format!("Invalid integer literal: {}", lexeme))),
        }
    }

    /// Scan identifier or keyword
    fn scan_identifier_or_keyword(&mut self, start_pos: Position) -> Token {
        let lexeme = self.cursor.eat_while(utils::is_identifier_continue);
        let token_type = match Keyword::lookup(&lexeme) {
            Some(keyword) => TokenType::Keyword(keyword),
            None => TokenType::Identifier(lexeme.clone()),
        };
        self.make_token(token_type, lexeme, start_pos)
    }
}

impl Lexer for SspLexer {
    fn next_token(&mut self) -> ParseResult<Token> {
        if self.at_end {
            let pos = self.cursor.position();
            return Ok(Token::new(TokenType::Eof, String::new(), Span::at(pos)));
        }

        let token = self.scan_token()?;
        if matches!(token.token_type, TokenType::Eof) {
            self.at_end = true;
        }
        Ok(token)
    }

    fn has_more_tokens(&self) -> bool {
        !self.at_end
    }

    fn position(&self) -> Position {
        self.cursor.position()
    }

    fn reset(&mut self) {
        self.cursor.rewind();
        self.at_end = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn types(source: &str) -> Vec<TokenType> {
        SspLexer::new(source).tokenize().unwrap().into_iter().map(|t| t.token_type).collect()
    }

    #[test]
    fn test_tokenize_empty() {
        assert_eq!(types(""), vec![TokenType::Eof]);
    }

    #[test]
    fn test_tokenize_operation_line() {
        let tokens = types("%1 = operation @op1(%0 [#ssp.distance<1>], @op2)");
        assert_eq!(
            tokens,
            vec![
                TokenType::ValueRef("1".to_string()),
                TokenType::Delimiter(Delimiter::Equals),
                TokenType::Keyword(Keyword::Operation),
                TokenType::SymbolRef("op1".to_string()),
                TokenType::Delimiter(Delimiter::LeftParen),
                TokenType::ValueRef("0".to_string()),
                TokenType::Delimiter(Delimiter::LeftBracket),
                TokenType::AttributeRef("ssp.distance".to_string()),
                TokenType::Delimiter(Delimiter::LeftAngle),
                TokenType::IntegerLiteral(1),
                TokenType::Delimiter(Delimiter::RightAngle),
                TokenType::Delimiter(Delimiter::RightBracket),
                TokenType::Delimiter(Delimiter::Comma),
                TokenType::SymbolRef("op2".to_string()),
                TokenType::Delimiter(Delimiter::RightParen),
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn test_tokenize_quoted_symbols_and_strings() {
        let tokens = types(r#"@"load a" "x\"y" -12"#);
        assert_eq!(tokens[0], TokenType::SymbolRef("load a".to_string()));
        assert_eq!(tokens[1], TokenType::StringLiteral("x\"y".to_string()));
        assert_eq!(tokens[2], TokenType::IntegerLiteral(-12));
    }

    #[test]
    fn test_tokenize_keywords_and_comments() {
        let tokens = types("instance // trailing\noperator_type foo");
        assert_eq!(tokens[0], TokenType::Keyword(Keyword::Instance));
        assert_eq!(tokens[1], TokenType::Comment(" trailing".to_string()));
        assert_eq!(tokens[2], TokenType::Keyword(Keyword::OperatorType));
        assert_eq!(tokens[3], TokenType::Identifier("foo".to_string()));
    }

    #[test]
    fn test_token_spans_track_lines() {
        let tokens = SspLexer::new("instance\n  @x").tokenize().unwrap();
        assert_eq!(tokens[1].span.start, Position::new(2, 3));
        assert_eq!(tokens[1].span.end, Position::new(2, 5));
    }

    #[test]
    fn test_error_handling() {
        assert_eq!(SspLexer::new(r#""unterminated"#).tokenize().unwrap_err().kind, ParseErrorKind::UnterminatedString);
        assert_eq!(SspLexer::new("!").tokenize().unwrap_err().kind, ParseErrorKind::InvalidCharacter);
        assert_eq!(SspLexer::new("#ssp").tokenize().unwrap_err().kind, ParseErrorKind::InvalidIdentifier);
        assert_eq!(SspLexer::new("@0").tokenize().unwrap_err().kind, ParseErrorKind::InvalidIdentifier);
        assert_eq!(SspLexer::new("%").tokenize().unwrap_err().kind, ParseErrorKind::InvalidIdentifier);
        assert_eq!(SspLexer::new("99999999999999999999").tokenize().unwrap_err().kind, ParseErrorKind::InvalidNumber);
        assert_eq!(SspLexer::new(r#""\q""#).tokenize().unwrap_err().kind, ParseErrorKind::InvalidEscapeSequence);
    }

    #[test]
    fn test_lexer_reset() {
        let mut lexer = SspLexer::new("operation");
        assert!(lexer.next_token().unwrap().is_keyword(Keyword::Operation));
        assert!(matches!(lexer.next_token().unwrap().token_type, TokenType::Eof));
        assert!(!lexer.has_more_tokens());

        lexer.reset();
        assert!(lexer.has_more_tokens());
        assert!(lexer.next_token().unwrap().is_keyword(Keyword::Operation));
    }
}
