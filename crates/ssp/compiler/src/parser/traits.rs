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


//! Seams between the lexer, the parser and their callers

use super::common::{ParseResult, Position, Token, TokenType};

/// Turns a whole input into `Output`
pub trait Parser {
    type Output;

    fn parse(&mut self, input: &str) -> ParseResult<Self::Output>;

    /// Where the parser currently stands in the input
    fn position(&self) -> Position;

    fn name(&self) -> &'static str;
}

/// Token stream over one input
pub trait Lexer {
    /// Next token. Once `Eof` has been returned, keeps returning `Eof`.
    fn next_token(&mut self) -> ParseResult<Token>;

    fn has_more_tokens(&self) -> bool;

    fn position(&self) -> Position;

    /// Start over from the first character
    fn reset(&mut self);

    /// Every remaining token, ending with `Eof`
    fn tokenize(&mut self) -> ParseResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.token_type == TokenType::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }
}
