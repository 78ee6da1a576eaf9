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


//! Line/column positions and the character cursor the lexer reads through

use std::fmt;

/// 1-based line and column of a character in instance text
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// First character of the input
    pub fn start() -> Self {
        Self { line: 1, column: 1 }
    }

    /// Position of the character after `ch`
    pub fn step(self, ch: char) -> Self {
        match ch {
            '\n' => Self { line: self.line + 1, column: 1 },
            _ => Self { column: self.column + 1, ..self },
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Half-open range `[start, end)` of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Zero-width span, used for end of input
    pub fn at(position: Position) -> Self {
        Self::new(position, position)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.line == self.end.line {
            write!(f, "{}..{}", self.start, self.end.column)
        } else {
            write!(f, "{}..{}", self.start, self.end)
        }
    }
}

/// Cursor over the characters of the input
#[derive(Debug, Clone)]
pub struct SourceCursor {
    chars: Vec<char>,
    offset: usize,
    position: Position,
}

impl SourceCursor {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            offset: 0,
            position: Position::start(),
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn is_exhausted(&self) -> bool {
        self.offset >= self.chars.len()
    }

    /// Character `n` places ahead, without consuming anything
    pub fn peek_nth(&self, n: usize) -> Option<char> {
        self.chars.get(self.offset + n).copied()
    }

    pub fn peek(&self) -> Option<char> {
        self.peek_nth(0)
    }

    /// Consume one character
    pub fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.offset += 1;
        self.position = self.position.step(ch);
        Some(ch)
    }

    pub fn eat_while(&mut self, mut accept: impl FnMut(char) -> bool) -> String {
        let begin = self.offset;
        while self.peek().is_some_and(&mut accept) {
            self.bump();
        }
        self.chars[begin..self.offset].iter().collect()
    }

    pub fn skip_whitespace(&mut self) {
        self.eat_while(char::is_whitespace);
    }

    pub fn rewind(&mut self) {
        self.offset = 0;
        self.position = Position::start();
    }

    pub fn span_from(&self, start: Position) -> Span {
        Span::new(start, self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_over_newline() {
        let pos = Position::start().step('x').step('y');
        assert_eq!(pos, Position::new(1, 3));
        assert_eq!(pos.step('\n'), Position::new(2, 1));
    }

    #[test]
    fn test_cursor_reads_lines() {
        let mut cursor = SourceCursor::new("%a\n  @é");
        assert_eq!(cursor.peek_nth(1), Some('a'));
        assert_eq!(cursor.eat_while(|c| c != '\n'), "%a");
        assert_eq!(cursor.position(), Position::new(1, 3));
        cursor.skip_whitespace();
        assert_eq!(cursor.position(), Position::new(2, 3));
        assert_eq!(cursor.bump(), Some('@'));
        assert_eq!(cursor.bump(), Some('é'));
        assert!(cursor.is_exhausted());
        assert_eq!(cursor.bump(), None);

        cursor.rewind();
        assert_eq!(cursor.peek(), Some('%'));
        assert_eq!(cursor.position(), Position::start());
    }

    #[test]
    fn test_span_display() {
        assert_eq!(Span::new(Position::new(1, 4), Position::new(1, 9)).to_string(), "1:4..9");
        assert_eq!(Span::new(Position::new(1, 4), Position::new(3, 2)).to_string(), "1:4..3:2");
    }
}
