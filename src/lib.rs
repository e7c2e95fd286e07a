//! # Introduction
//!
//! minicheck is the front end of a compiler for a small, statically-typed,
//! C-like language: it tokenizes source text and validates the token
//! stream against the language grammar, producing an accept/reject verdict
//! with the position of the first syntax error. There is no semantic
//! analysis, no symbol table, and no code generation; the verdict is the
//! whole output.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Parser → accept / reject (+ error position)
//! ```
//!
//! 1. [`lexer`]: converts a fully resident source buffer into an ordered
//!    token sequence. Total: malformed input becomes error-kind tokens and
//!    scanning continues. Comments are kept in the stream.
//! 2. [`parser`]: recursive descent over the token sequence with an
//!    integer cursor; the two constructs that are not locally decidable
//!    (assignment vs. fall-through, cast vs. parenthesized expression) are
//!    resolved by saving and restoring the cursor.
//!
//! ## Example
//!
//! ```
//! use minicheck::lexer::tokenize;
//! use minicheck::parser::Parser;
//!
//! let tokens = tokenize("int main() { return 0; }");
//! assert!(Parser::new(tokens).parse().is_ok());
//! ```

pub mod lexer;
pub mod parser;
