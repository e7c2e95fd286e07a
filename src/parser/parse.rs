//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing
//! infrastructure: the error type, cursor helper methods, the optional
//! trace callback, and the program-level parse entry point with its error
//! recovery loop.

use crate::lexer::{Token, TokenKind};
use thiserror::Error;

/// The point at which no production matched: the cursor index into the
/// token sequence and the lexeme found there.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("syntax error at token {index} ('{lexeme}'): {message}")]
pub struct SyntaxError {
    pub index: usize,
    pub lexeme: String,
    pub message: String,
}

/// Optional callback fired on entry to the major grammar productions with
/// the rule name and the cursor position. Purely observational: it is never
/// consulted for parsing decisions.
pub type TraceFn = Box<dyn FnMut(&'static str, usize)>;

/// Synthesized when the cursor runs past the last stored token; the
/// sequence itself carries no end-of-file sentinel.
static EOF_TOKEN: Token = Token {
    kind: TokenKind::Eof,
    lexeme: String::new(),
};

/// Recursive descent parser over an immutable token sequence.
///
/// The cursor is the entire mutable parsing state; a fresh `Parser` is
/// created per parse and never shared.
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    errors: Vec<SyntaxError>,
    trace: Option<TraceFn>,
}

impl Parser {
    /// Create a parser owning the given token sequence.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
            errors: Vec::new(),
            trace: None,
        }
    }

    /// Install a trace callback. Off by default.
    pub fn with_trace(mut self, trace: TraceFn) -> Self {
        self.trace = Some(trace);
        self
    }

    /// Parse the whole token sequence as a program.
    ///
    /// Returns `Ok(())` when every token belongs to some statement, or the
    /// FIRST syntax error otherwise. After an error the parser skips
    /// forward to the next `;` (or stops before a `}`) and keeps going so
    /// that [`Parser::diagnostics`] can report later errors too, but
    /// recovery never changes the verdict.
    ///
    /// The cursor and error list are reset on entry, so parsing the same
    /// sequence twice yields the same verdict and the same error position.
    pub fn parse(&mut self) -> Result<(), SyntaxError> {
        self.position = 0;
        self.errors.clear();

        while !self.at_end() {
            self.skip_comments();
            if self.at_end() {
                break;
            }

            let before = self.position;
            if let Err(err) = self.parse_statement() {
                log::debug!("recovering after {err}");
                self.errors.push(err);
                if self.position == before {
                    // The failing statement consumed nothing; step over the
                    // offending token so recovery always makes progress.
                    self.advance();
                }
                self.synchronize();
            }
        }

        match self.errors.first() {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    /// All syntax errors found during the last [`Parser::parse`] call,
    /// first (= the verdict's error) to last.
    pub fn diagnostics(&self) -> &[SyntaxError] {
        &self.errors
    }

    /// Skip forward to just past the next `;`, or stop before a `}` so the
    /// enclosing block structure stays visible to the next statement.
    fn synchronize(&mut self) {
        while !self.at_end() {
            match self.peek_kind() {
                TokenKind::Semicolon => {
                    self.advance();
                    return;
                }
                TokenKind::RBrace => return,
                _ => {
                    self.advance();
                }
            }
        }
    }

    // ===== Cursor helpers =====

    /// Current token, or the end-of-file sentinel past the last element.
    pub(crate) fn peek(&self) -> &Token {
        self.tokens.get(self.position).unwrap_or(&EOF_TOKEN)
    }

    pub(crate) fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    pub(crate) fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }

    pub(crate) fn at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    /// Consume the current token if it has the given kind.
    pub(crate) fn match_kind(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// True if the current token is the given keyword.
    pub(crate) fn check_keyword(&self, word: &str) -> bool {
        self.peek_kind() == TokenKind::Keyword && self.peek().lexeme == word
    }

    pub(crate) fn expect(
        &mut self,
        kind: TokenKind,
        message: &str,
    ) -> Result<(), SyntaxError> {
        if self.match_kind(kind) {
            Ok(())
        } else {
            Err(self.error(message))
        }
    }

    /// Build a syntax error at the cursor.
    pub(crate) fn error(&self, message: &str) -> SyntaxError {
        SyntaxError {
            index: self.position,
            lexeme: self.peek().lexeme.clone(),
            message: message.to_string(),
        }
    }

    /// Step over comment tokens. Called where the grammar tolerates
    /// comments: between statements and before the `else` lookahead.
    pub(crate) fn skip_comments(&mut self) {
        while self.peek_kind().is_comment() {
            self.advance();
        }
    }

    /// Fire the trace callback, if any.
    pub(crate) fn trace(&mut self, rule: &'static str) {
        if let Some(trace) = &mut self.trace {
            trace(rule, self.position);
        }
    }
}
