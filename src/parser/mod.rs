//! Syntax checker for mini-C token streams
//!
//! A hand-written recursive descent parser with bounded backtracking. The
//! parser consumes the token sequence produced by [`crate::lexer`] and
//! decides whether it forms a syntactically valid program; on rejection it
//! reports the index and lexeme of the first token at which no production
//! matched. No AST or other artifact is built.
//!
//! # Organization
//!
//! Parser methods are split across multiple files using `impl Parser`
//! blocks, allowing each module to extend the Parser with related
//! functionality while sharing the cursor state:
//! - [`parse`]: Parser struct, cursor helpers, error type, and the
//!   program-level parse loop with error recovery
//! - [`declarations`]: variable and function declarations, type names
//! - [`statements`]: blocks, `if`, `for`, `return`, expression statements
//! - [`expressions`]: the expression precedence ladder and its two
//!   backtracking points (assignment vs. fall-through, cast vs.
//!   parenthesized expression)
//!
//! # Backtracking
//!
//! The cursor is a single integer index into the read-only token sequence;
//! speculative parsing saves the integer and restores it on mismatch. Every
//! restore targets a strictly earlier position than the failing attempt, so
//! parsing always terminates.

pub mod declarations;
pub mod expressions;
pub mod parse;
pub mod statements;

pub use parse::{Parser, SyntaxError, TraceFn};
