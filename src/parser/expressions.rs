//! Expression parsing implementation
//!
//! One method per precedence level, tightest binding at the bottom:
//!
//! ```text
//! expr        ::= exprAssign
//! exprAssign  ::= exprUnary "=" exprAssign | exprOr
//! exprOr      ::= exprAnd ("||" exprAnd)*
//! exprAnd     ::= exprEq ("&&" exprEq)*
//! exprEq      ::= exprRel (("==" | "!=") exprRel)*
//! exprRel     ::= exprAdd (("<" | "<=" | ">" | ">=") exprAdd)*
//! exprAdd     ::= exprMul (("+" | "-") exprMul)*
//! exprMul     ::= exprCast (("*" | "/") exprCast)*
//! exprCast    ::= "(" typeName ")" exprCast | exprUnary
//! exprUnary   ::= ("-" | "!" | "++" | "--") exprUnary | exprPostfix
//! exprPostfix ::= exprPrimary ("[" expr "]" | "." IDENT | "++" | "--")*
//! exprPrimary ::= IDENT ("(" args? ")")? | literal | "(" expr ")"
//! ```
//!
//! `exprAssign` and `exprCast` are the only two productions that are not
//! locally decidable; both speculate and restore the integer cursor on
//! mismatch, never partially committing an advance from a failed
//! alternative.

use crate::lexer::TokenKind;
use crate::parser::parse::{Parser, SyntaxError};

impl Parser {
    /// Parse one expression (top-level entry point).
    pub(crate) fn parse_expression(&mut self) -> Result<(), SyntaxError> {
        self.trace("expr");
        self.parse_assignment()
    }

    /// Assignment, right-associative. Speculatively parse a unary
    /// expression; if `=` follows, commit and recurse for the right-hand
    /// side (a bad right-hand side is then an error, not a reason to retry).
    /// Otherwise restore the cursor and parse the logical-or ladder from
    /// the same starting point.
    fn parse_assignment(&mut self) -> Result<(), SyntaxError> {
        self.trace("exprAssign");
        let start = self.position;

        if self.parse_unary().is_ok() && self.match_kind(TokenKind::Assign) {
            return self.parse_assignment();
        }

        self.position = start;
        self.parse_logical_or()
    }

    /// `||`, left-associative.
    fn parse_logical_or(&mut self) -> Result<(), SyntaxError> {
        self.parse_logical_and()?;
        while self.match_kind(TokenKind::OrOr) {
            self.parse_logical_and()?;
        }
        Ok(())
    }

    /// `&&`, left-associative.
    fn parse_logical_and(&mut self) -> Result<(), SyntaxError> {
        self.parse_equality()?;
        while self.match_kind(TokenKind::AndAnd) {
            self.parse_equality()?;
        }
        Ok(())
    }

    /// `==` `!=`, left-associative.
    fn parse_equality(&mut self) -> Result<(), SyntaxError> {
        self.parse_relational()?;
        while matches!(self.peek_kind(), TokenKind::Eq | TokenKind::NotEq) {
            self.advance();
            self.parse_relational()?;
        }
        Ok(())
    }

    /// `<` `<=` `>` `>=`, left-associative.
    fn parse_relational(&mut self) -> Result<(), SyntaxError> {
        self.parse_additive()?;
        while matches!(
            self.peek_kind(),
            TokenKind::Less | TokenKind::LessEq | TokenKind::Greater | TokenKind::GreaterEq
        ) {
            self.advance();
            self.parse_additive()?;
        }
        Ok(())
    }

    /// `+` `-`, left-associative.
    fn parse_additive(&mut self) -> Result<(), SyntaxError> {
        self.parse_multiplicative()?;
        while matches!(self.peek_kind(), TokenKind::Plus | TokenKind::Minus) {
            self.advance();
            self.parse_multiplicative()?;
        }
        Ok(())
    }

    /// `*` `/`, left-associative.
    fn parse_multiplicative(&mut self) -> Result<(), SyntaxError> {
        self.parse_cast()?;
        while matches!(self.peek_kind(), TokenKind::Star | TokenKind::Slash) {
            self.advance();
            self.parse_cast()?;
        }
        Ok(())
    }

    /// Cast: on `(`, speculatively parse `( typeName )`; if that fits,
    /// commit to the cast and parse the operand as another cast expression
    /// (allowing right-nested casts like `(int)(char)x`). Otherwise restore
    /// the cursor and fall through to unary, whose primary rule handles a
    /// plain parenthesized expression.
    fn parse_cast(&mut self) -> Result<(), SyntaxError> {
        if self.check(TokenKind::LParen) {
            self.trace("exprCast");
            let start = self.position;
            self.advance(); // '('

            if self.parse_type_name().is_ok() && self.match_kind(TokenKind::RParen) {
                return self.parse_cast();
            }

            self.position = start;
        }

        self.parse_unary()
    }

    /// Prefix `-`, `!`, `++`, `--`; right-recursive.
    fn parse_unary(&mut self) -> Result<(), SyntaxError> {
        if matches!(
            self.peek_kind(),
            TokenKind::Minus | TokenKind::Not | TokenKind::Inc | TokenKind::Dec
        ) {
            self.advance();
            return self.parse_unary();
        }
        self.parse_postfix()
    }

    /// Postfix operators: array index, member access, post-increment and
    /// post-decrement, folded left to right.
    fn parse_postfix(&mut self) -> Result<(), SyntaxError> {
        self.parse_primary()?;

        loop {
            match self.peek_kind() {
                TokenKind::LBracket => {
                    self.advance();
                    self.parse_expression()?;
                    self.expect(TokenKind::RBracket, "expected ']' after array index")?;
                }
                TokenKind::Dot => {
                    self.advance();
                    if !self.match_kind(TokenKind::Identifier) {
                        return Err(self.error("expected member name after '.'"));
                    }
                }
                TokenKind::Inc | TokenKind::Dec => {
                    self.advance();
                }
                _ => break,
            }
        }

        Ok(())
    }

    /// Primary: identifier (optionally a call), a literal, or a
    /// parenthesized expression.
    fn parse_primary(&mut self) -> Result<(), SyntaxError> {
        match self.peek_kind() {
            TokenKind::Identifier => {
                self.advance();
                if self.match_kind(TokenKind::LParen) {
                    if !self.check(TokenKind::RParen) {
                        self.parse_expression()?;
                        while self.match_kind(TokenKind::Comma) {
                            self.parse_expression()?;
                        }
                    }
                    self.expect(TokenKind::RParen, "expected ')' after call arguments")?;
                }
                Ok(())
            }
            kind if kind.is_literal() => {
                self.advance();
                Ok(())
            }
            TokenKind::LParen => {
                self.advance();
                self.parse_expression()?;
                self.expect(TokenKind::RParen, "expected ')' after expression")
            }
            _ => Err(self.error("expected expression")),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::tokenize;
    use crate::parser::parse::Parser;

    fn accepts(source: &str) -> bool {
        Parser::new(tokenize(source)).parse().is_ok()
    }

    #[test]
    fn test_precedence_chain() {
        assert!(accepts("r = a + b * c - d / e;"));
        assert!(accepts("ok = a < b && b <= c || !done;"));
        assert!(accepts("eq = x == y != z;"));
    }

    #[test]
    fn test_assignment_is_right_associative() {
        assert!(accepts("a = b = c = 0;"));
    }

    #[test]
    fn test_assignment_lhs_is_unary() {
        assert!(accepts("v[0] = 1;"));
        assert!(accepts("p.x = 2;"));
        assert!(!accepts("a + b = c;"));
    }

    #[test]
    fn test_cast_expression() {
        assert!(accepts("x = (int) y + 1;"));
        assert!(accepts("x = (float) (a + b);"));
        assert!(accepts("x = (int) (char) y;"));
    }

    #[test]
    fn test_parenthesized_expression_is_not_a_cast() {
        // `(a + 1)` fails the `( typeName )` speculation at `+`, so the
        // cursor rewinds and the primary rule consumes the parentheses.
        assert!(accepts("x = (a + 1) * 2;"));
    }

    #[test]
    fn test_unary_and_postfix() {
        assert!(accepts("x = -y;"));
        assert!(accepts("x = !!flag;"));
        assert!(accepts("--count;"));
        assert!(accepts("n++;"));
        assert!(accepts("m[i][j]++;"));
        assert!(accepts("q = p.next.prev;"));
    }

    #[test]
    fn test_calls() {
        assert!(accepts("f();"));
        assert!(accepts("g(1, x + 2, h(3));"));
        assert!(!accepts("g(1,;"));
    }

    #[test]
    fn test_literals() {
        assert!(accepts("x = 42;"));
        assert!(accepts("x = 0x1F;"));
        assert!(accepts("x = 017;"));
        assert!(accepts("x = 3.5e-1;"));
        assert!(accepts("c = 'a';"));
        assert!(accepts("s = \"text\";"));
    }

    #[test]
    fn test_error_token_rejects() {
        // Bare '&' lexes as an error token, which no production accepts.
        assert!(!accepts("x = a & b;"));
    }

    #[test]
    fn test_incomplete_operand_rejects() {
        assert!(!accepts("x = a +;"));
        assert!(!accepts("x = ;"));
        assert!(!accepts("x = (a;"));
    }
}
