//! Error types for parsing and formatting
//!
//! Every parse error points at a 1-based line and column. Errors abort the
//! whole conversion; there is no partial tree.

use crate::cirru::ast::Position;
use thiserror::Error;

/// What went wrong with a line's leading whitespace
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndentationError {
    #[error("indentation of {width} spaces is not a multiple of {unit}")]
    OddWidth { width: usize, unit: usize },
    #[error("tab in indentation")]
    Tab,
    #[error("unexpected indent: expected depth {expected} at most, found {found}")]
    SkippedLevel { expected: usize, found: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParenError {
    #[error("unexpected closing parenthesis")]
    StrayClose,
    #[error("unclosed parenthesis")]
    UnclosedOpen,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("indentation error: {0}")]
    Indentation(IndentationError),
    #[error("unterminated string")]
    UnterminatedString,
    #[error("invalid escape sequence '\\{0}'")]
    InvalidEscape(char),
    #[error("paren imbalance: {0}")]
    ParenImbalance(ParenError),
    #[error("expected {expected} expression(s), found {found}")]
    ExpressionCount { expected: usize, found: usize },
}

/// A structural error found while parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at line {}, column {}", .position.line, .position.column)]
pub struct ParseError {
    pub kind: ErrorKind,
    pub position: Position,
}

impl ParseError {
    pub fn new(kind: ErrorKind, position: Position) -> Self {
        Self { kind, position }
    }

    pub fn indentation(error: IndentationError, position: Position) -> Self {
        Self::new(ErrorKind::Indentation(error), position)
    }

    pub fn paren(error: ParenError, position: Position) -> Self {
        Self::new(ErrorKind::ParenImbalance(error), position)
    }

    pub fn line(&self) -> usize {
        self.position.line
    }

    /// Short category name, stable enough for scripts and tests
    pub fn category(&self) -> &'static str {
        match self.kind {
            ErrorKind::Indentation(_) => "indentation",
            ErrorKind::UnterminatedString => "unterminated-string",
            ErrorKind::InvalidEscape(_) => "invalid-escape",
            ErrorKind::ParenImbalance(_) => "paren-imbalance",
            ErrorKind::ExpressionCount { .. } => "expression-count",
        }
    }

    /// Render the error with the surrounding source lines and a caret
    ///
    /// ```text
    /// error: unterminated string at line 2, column 6
    ///    1 | defn f ()
    ///    2 |   echo "a
    ///      |      ^
    /// ```
    pub fn render(&self, source: &str) -> String {
        let mut output = format!("error: {}\n", self);
        let lines: Vec<&str> = source.lines().collect();
        if self.position.line == 0 || self.position.line > lines.len() {
            return output;
        }

        let line_idx = self.position.line - 1;
        let start = line_idx.saturating_sub(1);
        for (offset, text) in lines[start..=line_idx].iter().enumerate() {
            output.push_str(&format!("{:4} | {}\n", start + offset + 1, text));
        }
        output.push_str(&format!(
            "     | {}^\n",
            " ".repeat(self.position.column.saturating_sub(1))
        ));
        output
    }
}

/// Errors from writing a tree back as single-line Cirru
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("expected a group at the top level, got leaf {0:?}")]
    ExpectedGroup(String),
    #[error("cannot write an empty expression as a line")]
    EmptyExpression,
}
