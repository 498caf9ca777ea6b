//! Indentation resolver
//!
//! Turns the flat list of line records into a nesting skeleton. Lines live in
//! an arena and refer to each other by index; a stack holds the indices of the
//! lines that are still open, the implicit root sitting below the bottom.

use crate::cirru::ast::Position;
use crate::cirru::error::{IndentationError, ParseError};
use crate::cirru::lexer::LineRecord;

/// Parent/child structure of the source lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skeleton {
    pub lines: Vec<LineRecord>,
    /// Indices of depth-0 lines, in source order
    pub roots: Vec<usize>,
    /// `children[i]` are the indices of the lines nested directly under line `i`
    pub children: Vec<Vec<usize>>,
}

impl Skeleton {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn children_of(&self, index: usize) -> &[usize] {
        self.children.get(index).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Link every line to its parent
///
/// Depth may drop by any amount but may only grow one level at a time.
pub fn resolve(lines: Vec<LineRecord>) -> Result<Skeleton, ParseError> {
    let mut roots = Vec::new();
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); lines.len()];
    let mut open: Vec<usize> = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        while let Some(&top) = open.last() {
            if lines[top].depth >= line.depth {
                open.pop();
            } else {
                break;
            }
        }

        let expected = open.last().map_or(0, |&top| lines[top].depth + 1);
        if line.depth > expected {
            return Err(ParseError::indentation(
                IndentationError::SkippedLevel {
                    expected,
                    found: line.depth,
                },
                Position::new(line.line_number, 1),
            ));
        }

        match open.last() {
            Some(&parent) => children[parent].push(index),
            None => roots.push(index),
        }
        open.push(index);
    }

    tracing::debug!(lines = lines.len(), roots = roots.len(), "resolved indentation");
    Ok(Skeleton {
        lines,
        roots,
        children,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cirru::config::SyntaxOptions;
    use crate::cirru::error::ErrorKind;
    use crate::cirru::lexer::lex_source;

    fn skeleton(source: &str) -> Result<Skeleton, ParseError> {
        resolve(lex_source(source, &SyntaxOptions::default()).unwrap())
    }

    #[test]
    fn test_flat_lines_are_roots() {
        let skeleton = skeleton("a\nb\nc").unwrap();
        assert_eq!(skeleton.roots, vec![0, 1, 2]);
        assert!(skeleton.children.iter().all(Vec::is_empty));
    }

    #[test]
    fn test_nesting_and_dedent() {
        let skeleton = skeleton("a\n  b\n    c\n  d\ne").unwrap();
        assert_eq!(skeleton.roots, vec![0, 4]);
        assert_eq!(skeleton.children_of(0), &[1, 3]);
        assert_eq!(skeleton.children_of(1), &[2]);
        assert_eq!(skeleton.children_of(4), &[] as &[usize]);
    }

    #[test]
    fn test_dedent_by_several_levels() {
        let skeleton = skeleton("a\n  b\n    c\n      d\ne").unwrap();
        assert_eq!(skeleton.roots, vec![0, 4]);
        assert_eq!(skeleton.children_of(2), &[3]);
    }

    #[test]
    fn test_skipped_level() {
        let err = skeleton("a\n      b").unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::Indentation(IndentationError::SkippedLevel {
                expected: 1,
                found: 3
            })
        );
        assert_eq!(err.position, Position::new(2, 1));
    }

    #[test]
    fn test_indented_first_line() {
        let err = skeleton("\n  a").unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::Indentation(IndentationError::SkippedLevel {
                expected: 0,
                found: 1
            })
        );
        assert_eq!(err.line(), 2);
    }

    #[test]
    fn test_empty_source() {
        let skeleton = skeleton("").unwrap();
        assert!(skeleton.is_empty());
        assert!(skeleton.roots.is_empty());
    }
}
