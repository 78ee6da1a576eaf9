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


//! Recursive-descent parser producing an [`Instance`]

use super::common::{Delimiter, Keyword, ParseContext, ParseError, ParseErrorKind, ParseResult, ParserConfig, Position, Token, TokenType, position::Span};
use super::lexer::SspLexer;
use super::traits::{Lexer, Parser};
use crate::codec::{DependenceEntry, decode_dependences};
use crate::document::{AttrParam, Instance, NamedAttr, OperationDecl, OperatorTypeDecl, PropertyAttr};

/// Parser for a single `instance` block
pub struct InstanceParser {
    tokens: Vec<Token>,
    current: usize,
    context: ParseContext,
}

impl Default for InstanceParser {
    fn default() -> Self {
        Self::new()
    }
}

impl InstanceParser {
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            tokens: vec![eof_token(Position::start())],
            current: 0,
            context: ParseContext::new(config),
        }
    }

    /// Tokenize the input, dropping comments
    fn load(&mut self, input: &str) -> ParseResult<()> {
        let mut tokens = Vec::new();
        for token in SspLexer::new(input).tokenize()? {
            if let TokenType::Comment(_) = token.token_type {
                if !self.context.config.allow_comments {
                    return Err(ParseError::new(ParseErrorKind::CommentNotAllowed, token.span.start, "Comments are disabled for this parser"));
                }
                continue;
            }
            tokens.push(token);
        }
        self.tokens = tokens;
        self.current = 0;
        Ok(())
    }

    fn current_token(&self) -> &Token {
        // The lexer always terminates the stream with `Eof`
        &self.tokens[self.current.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token {
        let token = self.current_token().clone();
        if self.current < self.tokens.len() - 1 {
            self.current += 1;
        }
        token
    }

    fn check_delimiter(&self, delimiter: Delimiter) -> bool {
        self.current_token().is_delimiter(delimiter)
    }

    fn check_keyword(&self, keyword: Keyword) -> bool {
        self.current_token().is_keyword(keyword)
    }

    fn consume_delimiter(&mut self, delimiter: Delimiter) -> bool {
        if self.check_delimiter(delimiter) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Error for the current token, which did not match `expected`
    fn unexpected(&self, expected: &str) -> ParseError {
        ParseError::unexpected_token(self.current_token(), expected)
    }

    fn expect_delimiter(&mut self, delimiter: Delimiter) -> ParseResult<Token> {
        if self.check_delimiter(delimiter) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(&format!("'{}'", delimiter)))
        }
    }

    fn expect_keyword(&mut self, keyword: Keyword) -> ParseResult<Token> {
        if self.check_keyword(keyword) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(&format!("'{}'", keyword)))
        }
    }

    fn expect_symbol(&mut self, what: &str) -> ParseResult<String> {
        match &self.current_token().token_type {
            TokenType::SymbolRef(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected(what)),
        }
    }

    fn expect_value(&mut self) -> ParseResult<String> {
        match &self.current_token().token_type {
            TokenType::ValueRef(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected("a value")),
        }
    }

    /// instance := 'instance' @name 'of' "problem" props? '{' operator_type* operation* '}'
    fn parse_instance(&mut self) -> ParseResult<Instance> {
        self.expect_keyword(Keyword::Instance)?;
        let name = self.expect_symbol("an instance name")?;
        self.expect_keyword(Keyword::Of)?;
        let problem = match &self.current_token().token_type {
            TokenType::StringLiteral(problem) => {
                let problem = problem.clone();
                self.advance();
                problem
            }
            _ => return Err(self.unexpected("a problem name string")),
        };

        let mut instance = Instance::new(name, problem);
        instance.properties = self.parse_optional_properties()?;
        self.expect_delimiter(Delimiter::LeftBrace)?;

        loop {
            let token = self.current_token();
            if token.is_delimiter(Delimiter::RightBrace) {
                break;
            }
            if token.is_keyword(Keyword::OperatorType) {
                if !instance.operations.is_empty() {
                    return Err(ParseError::new(ParseErrorKind::MisplacedDeclaration, token.span.start, "operator_type after the first operation")
                        .with_note("declare operator types before operations"));
                }
                let opr = self.parse_operator_type()?;
                instance.operator_types.push(opr);
            } else if token.is_keyword(Keyword::Operation) || matches!(token.token_type, TokenType::ValueRef(_)) {
                let op = self.parse_operation()?;
                instance.operations.push(op);
            } else {
                return Err(self.unexpected("'operator_type', 'operation' or '}'"));
            }
        }

        self.expect_delimiter(Delimiter::RightBrace)?;
        if !matches!(self.current_token().token_type, TokenType::Eof) {
            return Err(self.unexpected("end of input"));
        }

        Ok(instance)
    }

    /// operator_type := 'operator_type' @name props?
    fn parse_operator_type(&mut self) -> ParseResult<OperatorTypeDecl> {
        self.expect_keyword(Keyword::OperatorType)?;
        let name = self.expect_symbol("an operator type name")?;
        let properties = self.parse_optional_properties()?;
        Ok(OperatorTypeDecl::new(name, properties))
    }

    /// operation := (%v (',' %v)* '=')? 'operation' @name? '(' entries ')' props? dict?
    fn parse_operation(&mut self) -> ParseResult<OperationDecl> {
        let mut results = Vec::new();
        if matches!(self.current_token().token_type, TokenType::ValueRef(_)) {
            results.push(self.expect_value()?);
            while self.consume_delimiter(Delimiter::Comma) {
                results.push(self.expect_value()?);
            }
            self.expect_delimiter(Delimiter::Equals)?;
        }

        self.expect_keyword(Keyword::Operation)?;
        let name = match &self.current_token().token_type {
            TokenType::SymbolRef(name) => {
                let name = name.clone();
                self.advance();
                Some(name)
            }
            _ => None,
        };

        self.expect_delimiter(Delimiter::LeftParen)?;
        let mut entries = Vec::new();
        if !self.check_delimiter(Delimiter::RightParen) {
            entries.push(self.parse_dependence_entry()?);
            while self.consume_delimiter(Delimiter::Comma) {
                entries.push(self.parse_dependence_entry()?);
            }
        }
        self.expect_delimiter(Delimiter::RightParen)?;

        let decoded = decode_dependences(entries);
        let properties = self.parse_optional_properties()?;
        let attributes = if self.check_delimiter(Delimiter::LeftBrace) { self.parse_attribute_dict()? } else { Vec::new() };

        Ok(OperationDecl {
            results,
            name,
            operands: decoded.operands,
            dependences: decoded.records,
            properties,
            attributes,
        })
    }

    /// entry := (%value | @symbol) props?
    fn parse_dependence_entry(&mut self) -> ParseResult<DependenceEntry> {
        match &self.current_token().token_type {
            TokenType::ValueRef(name) => {
                let name = name.clone();
                self.advance();
                let properties = self.parse_optional_properties()?;
                Ok(DependenceEntry::Value { name, properties })
            }
            TokenType::SymbolRef(name) => {
                let name = name.clone();
                self.advance();
                let properties = self.parse_optional_properties()?;
                Ok(DependenceEntry::Symbol { name, properties })
            }
            _ => Err(self.unexpected("a value or a symbol reference")),
        }
    }

    fn parse_optional_properties(&mut self) -> ParseResult<Option<Vec<PropertyAttr>>> {
        if self.check_delimiter(Delimiter::LeftBracket) { self.parse_property_list().map(Some) } else { Ok(None) }
    }

    /// props := '[' (attr (',' attr)*)? ']'
    fn parse_property_list(&mut self) -> ParseResult<Vec<PropertyAttr>> {
        self.expect_delimiter(Delimiter::LeftBracket)?;
        let mut properties = Vec::new();
        if !self.check_delimiter(Delimiter::RightBracket) {
            properties.push(self.parse_property_attr()?);
            while self.consume_delimiter(Delimiter::Comma) {
                properties.push(self.parse_property_attr()?);
            }
        }
        self.expect_delimiter(Delimiter::RightBracket)?;
        Ok(properties)
    }

    /// attr := #dialect.mnemonic ('<' param (',' param)* '>')?
    fn parse_property_attr(&mut self) -> ParseResult<PropertyAttr> {
        let token = self.current_token().clone();
        let TokenType::AttributeRef(full_name) = &token.token_type else {
            return Err(self.unexpected("a property attribute"));
        };
        let Some((dialect, mnemonic)) = full_name.split_once('.') else {
            return Err(ParseError::new(ParseErrorKind::InvalidIdentifier, token.span.start, format!("Malformed attribute name '{}'", token.lexeme)));
        };
        self.advance();

        self.context.descend(token.span.start)?;
        let mut params = Vec::new();
        if self.consume_delimiter(Delimiter::LeftAngle) {
            params.push(self.parse_attr_param()?);
            while self.consume_delimiter(Delimiter::Comma) {
                params.push(self.parse_attr_param()?);
            }
            self.expect_delimiter(Delimiter::RightAngle)?;
        }
        self.context.ascend();

        Ok(PropertyAttr::new(dialect, mnemonic, params))
    }

    fn parse_attr_param(&mut self) -> ParseResult<AttrParam> {
        let param = match &self.current_token().token_type {
            TokenType::IntegerLiteral(value) => AttrParam::Integer(*value),
            TokenType::SymbolRef(name) => AttrParam::Symbol(name.clone()),
            TokenType::StringLiteral(value) => AttrParam::String(value.clone()),
            TokenType::AttributeRef(_) => return Ok(AttrParam::Attr(Box::new(self.parse_property_attr()?))),
            _ => return Err(self.unexpected("an attribute parameter")),
        };
        self.advance();
        Ok(param)
    }

    /// dict := '{' (key ('=' param)? (',' key ('=' param)?)*)? '}'
    fn parse_attribute_dict(&mut self) -> ParseResult<Vec<NamedAttr>> {
        self.expect_delimiter(Delimiter::LeftBrace)?;
        let mut attributes = Vec::new();
        if !self.check_delimiter(Delimiter::RightBrace) {
            attributes.push(self.parse_named_attr()?);
            while self.consume_delimiter(Delimiter::Comma) {
                attributes.push(self.parse_named_attr()?);
            }
        }
        self.expect_delimiter(Delimiter::RightBrace)?;
        Ok(attributes)
    }

    fn parse_named_attr(&mut self) -> ParseResult<NamedAttr> {
        let name = match &self.current_token().token_type {
            TokenType::Identifier(name) => name.clone(),
            TokenType::Keyword(keyword) => keyword.to_string(),
            _ => return Err(self.unexpected("an attribute name")),
        };
        self.advance();

        let value = if self.consume_delimiter(Delimiter::Equals) { Some(self.parse_attr_param()?) } else { None };
        Ok(NamedAttr::new(name, value))
    }
}

impl Parser for InstanceParser {
    type Output = Instance;

    fn parse(&mut self, input: &str) -> ParseResult<Instance> {
        self.load(input)?;
        self.context.reset();
        self.parse_instance()
    }

    fn position(&self) -> Position {
        self.current_token().span.start
    }

    fn name(&self) -> &'static str {
        "instance"
    }
}

fn eof_token(position: Position) -> Token {
    Token::new(TokenType::Eof, String::new(), Span::at(position))
}
