//! Main module for cirru-lisp library functionality
//!
//! Data flows strictly left to right:
//!
//! ```text
//! lexer -> resolver -> parser::line + parser::builder -> printer
//! ```
//!
//! Every stage is a pure function of its input. Nothing is cached between calls.

pub mod ast;
pub mod config;
pub mod error;
pub mod formats;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod processor;
pub mod resolver;

#[cfg(test)]
pub mod testing;

use crate::cirru::ast::{Document, Node, Position};
use crate::cirru::config::Options;
use crate::cirru::error::{ErrorKind, ParseError};

/// Parse source text with the default options
pub fn parse(source: &str) -> Result<Document, ParseError> {
    parse_with(source, &Options::default())
}

/// Parse source text into a document tree
pub fn parse_with(source: &str, options: &Options) -> Result<Document, ParseError> {
    let records = lexer::lex_source(source, &options.syntax)?;
    let skeleton = resolver::resolve(records)?;
    parser::builder::build_document(skeleton, &options.syntax)
}

/// Convert Cirru text into canonical parenthesized text with the default options
pub fn convert(source: &str) -> Result<String, ParseError> {
    convert_with(source, &Options::default())
}

/// Convert Cirru text into parenthesized text
pub fn convert_with(source: &str, options: &Options) -> Result<String, ParseError> {
    let document = parse_with(source, options)?;
    Ok(printer::print_document(&document, options))
}

/// Parse a source that must hold exactly one top-level expression
pub fn parse_one_liner(source: &str, options: &Options) -> Result<Node, ParseError> {
    let records = lexer::lex_source(source, &options.syntax)?;
    let first_extra_line = records
        .iter()
        .filter(|record| record.depth == 0)
        .nth(1)
        .map(|record| record.line_number);
    let skeleton = resolver::resolve(records)?;
    let found = skeleton.roots.len();
    let mut document = parser::builder::build_document(skeleton, &options.syntax)?;

    if found != 1 {
        return Err(ParseError::new(
            ErrorKind::ExpressionCount { expected: 1, found },
            Position::new(first_extra_line.unwrap_or(1), 1),
        ));
    }

    Ok(document.expressions.remove(0))
}
