//! Parser module for Cirru lines
//!
//! - `line` - chumsky grammar for the tokens of a single line
//! - `builder` - combines parsed lines with the resolver's skeleton into a [`Document`]
//!
//! [`Document`]: crate::cirru::ast::Document

pub mod builder;
pub mod line;

pub use builder::build_document;
pub use line::{parse_line, Segment};
