//! Lexer module for Cirru text
//!
//! Works one line at a time. Leading whitespace becomes an indentation depth,
//! the rest of the line goes through a logos tokenizer. Blank lines and
//! comment lines produce no record at all.
//!
//! Nesting between lines is not decided here; the resolver consumes the
//! [`LineRecord`]s and turns depths into parent/child links.

pub mod lexer_impl;
pub mod tokens;

pub use lexer_impl::{lex_line, lex_source, tokenize, LineRecord, SpannedToken};
pub use tokens::Token;
