//! Declaration parsing implementation
//!
//! Variable and function declarations share a `type-name identifier`
//! prefix and are told apart by one token of lookahead past the
//! identifier. The prefix is parsed speculatively from a remembered cursor
//! position; once the declaration form is known, the cursor is reset and
//! the whole production is re-parsed by the dedicated rule. Re-parsing the
//! prefix touches O(1) tokens, so the restart is cheap.
//!
//! ```text
//! declVar    ::= typeName declarator ("," declarator)* ";"
//! declarator ::= IDENT ("[" INT? "]")?
//! declFunc   ::= typeName IDENT "(" (param ("," param)*)? ")" block
//! param      ::= typeName IDENT
//! typeName   ::= "int" | "float" | "double" | "char" | "bool" | "void" | IDENT
//! ```

use crate::lexer::{is_type_keyword, TokenKind};
use crate::parser::parse::{Parser, SyntaxError};

impl Parser {
    /// Type name: a primitive type keyword, or an identifier standing for a
    /// user-defined type. User-defined names are accepted without checking
    /// that they were ever declared; there is no symbol table in this layer.
    pub(crate) fn parse_type_name(&mut self) -> Result<(), SyntaxError> {
        match self.peek_kind() {
            TokenKind::Keyword if is_type_keyword(&self.peek().lexeme) => {
                self.advance();
                Ok(())
            }
            TokenKind::Identifier => {
                self.advance();
                Ok(())
            }
            _ => Err(self.error("expected type name")),
        }
    }

    /// Declaration at a known type keyword: decide variable vs. function by
    /// the token after the identifier, then re-parse from the start.
    pub(crate) fn parse_declaration(&mut self) -> Result<(), SyntaxError> {
        let start = self.position;

        self.parse_type_name()?;
        if !self.match_kind(TokenKind::Identifier) {
            return Err(self.error("expected identifier after type name"));
        }
        let is_function = self.check(TokenKind::LParen);

        self.position = start;
        if is_function {
            self.parse_function_declaration()
        } else {
            self.parse_var_declaration()
        }
    }

    /// Statement starting with an identifier: it may open a declaration
    /// with a user-defined type name, or it may be an expression. Try the
    /// declaration prefix speculatively; if it does not fit, restore the
    /// cursor and parse an expression statement from the same point.
    pub(crate) fn parse_declaration_or_expression(&mut self) -> Result<(), SyntaxError> {
        let start = self.position;

        if self.parse_type_name().is_ok() && self.match_kind(TokenKind::Identifier) {
            let is_function = self.check(TokenKind::LParen);
            self.position = start;
            return if is_function {
                self.parse_function_declaration()
            } else {
                self.parse_var_declaration()
            };
        }

        self.position = start;
        self.parse_expression_statement()
    }

    /// Variable declaration: one or more comma-separated declarators after
    /// the type name, terminated by `;`.
    pub(crate) fn parse_var_declaration(&mut self) -> Result<(), SyntaxError> {
        self.trace("declVar");

        self.parse_type_name()?;
        self.parse_declarator()?;
        while self.match_kind(TokenKind::Comma) {
            self.parse_declarator()?;
        }
        self.expect(TokenKind::Semicolon, "expected ';' after variable declaration")
    }

    /// Declarator: identifier with an optional array suffix whose size, if
    /// present, is an integer literal in any base.
    fn parse_declarator(&mut self) -> Result<(), SyntaxError> {
        if !self.match_kind(TokenKind::Identifier) {
            return Err(self.error("expected identifier in declaration"));
        }

        if self.match_kind(TokenKind::LBracket) {
            if self.peek_kind().is_integer() {
                self.advance();
            }
            self.expect(TokenKind::RBracket, "expected ']' after array size")?;
        }

        Ok(())
    }

    /// Function declaration: `typeName IDENT ( params? ) block`.
    pub(crate) fn parse_function_declaration(&mut self) -> Result<(), SyntaxError> {
        self.trace("declFunc");

        self.parse_type_name()?;
        if !self.match_kind(TokenKind::Identifier) {
            return Err(self.error("expected function name"));
        }

        self.expect(TokenKind::LParen, "expected '(' after function name")?;
        if !self.check(TokenKind::RParen) {
            self.parse_parameter()?;
            while self.match_kind(TokenKind::Comma) {
                self.parse_parameter()?;
            }
        }
        self.expect(TokenKind::RParen, "expected ')' after parameters")?;

        if !self.check(TokenKind::LBrace) {
            return Err(self.error("expected '{' before function body"));
        }
        self.parse_block()
    }

    fn parse_parameter(&mut self) -> Result<(), SyntaxError> {
        self.parse_type_name()?;
        if !self.match_kind(TokenKind::Identifier) {
            return Err(self.error("expected parameter name"));
        }
        Ok(())
    }
}
