//! Position tracking for source code locations

use serde::Serialize;
use std::fmt;

/// A position in source code. Both fields are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Position of a byte offset inside a single line
    ///
    /// Columns count characters, not bytes, so multi-byte text before the
    /// offset still yields the column an editor would show.
    pub fn in_line(line_number: usize, line: &str, byte_offset: usize) -> Self {
        let clamped = byte_offset.min(line.len());
        let column = line
            .char_indices()
            .take_while(|(idx, _)| *idx < clamped)
            .count();
        Self::new(line_number, column + 1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
