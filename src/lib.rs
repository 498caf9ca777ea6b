//! # cirru-lisp
//!
//! Converts Cirru notation (indentation-based, with `$` folding) into canonical
//! fully-parenthesized Lisp text.
//!
//! ```text
//! defn fib (n)
//!   if (<= n 2) 1
//!     + (fib $ dec n) (fib $ - n 2)
//! ```
//!
//! converts to
//!
//! ```text
//! (defn fib (n) (if (<= n 2) 1 (+ (fib (dec n)) (fib (- n 2)))))
//! ```
//!
//! The pipeline lives in [`cirru`]: lexer, indentation resolver, line parser,
//! tree builder and printer. [`convert`] runs all of it with default options.

pub mod cirru;

pub use cirru::ast::{Document, Group, GroupKind, Leaf, LeafKind, Node, Position};
pub use cirru::config::{Layout, Options, PrinterOptions, SyntaxOptions};
pub use cirru::error::{ErrorKind, FormatError, IndentationError, ParenError, ParseError};
pub use cirru::{convert, convert_with, parse, parse_one_liner, parse_with};
pub use cirru::printer::{format_document, format_one_liner, print_document, print_node};
