//! Implementation of the Cirru line lexer
//!
//! logos does the character-level work. This module measures indentation,
//! drops blank and comment lines, unescapes string literals and checks that
//! parens balance within each line.

use crate::cirru::ast::Position;
use crate::cirru::config::SyntaxOptions;
use crate::cirru::error::{ErrorKind, IndentationError, ParenError, ParseError};
use crate::cirru::lexer::tokens::{RawToken, Token};
use logos::Logos;
use std::ops::Range;

/// A token with its byte range inside the source line
pub type SpannedToken = (Token, Range<usize>);

/// One non-blank, non-comment source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRecord {
    /// Indentation level, in units of `indent_width` spaces
    pub depth: usize,
    pub tokens: Vec<SpannedToken>,
    /// 1-based
    pub line_number: usize,
    text: String,
}

impl LineRecord {
    /// Position of a byte offset within this line
    pub fn position(&self, byte_offset: usize) -> Position {
        Position::in_line(self.line_number, &self.text, byte_offset)
    }

    /// Position of the token at `index`, or just past the line end
    pub fn token_position(&self, index: usize) -> Position {
        match self.tokens.get(index) {
            Some((_, span)) => self.position(span.start),
            None => self.position(self.text.len()),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Tokenize the content of a single line
///
/// Spans are byte offsets into `line`. Leading whitespace is skipped, so the
/// whole line can be passed in.
pub fn tokenize(
    line: &str,
    line_number: usize,
    syntax: &SyntaxOptions,
) -> Result<Vec<SpannedToken>, ParseError> {
    let mut lexer = RawToken::lexer(line);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let token = match result {
            Ok(RawToken::Open) => Token::Open,
            Ok(RawToken::Close) => Token::Close,
            Ok(RawToken::Word(word)) if syntax.is_fold(&word) => Token::Fold,
            Ok(RawToken::Word(word)) => Token::Symbol(word),
            Ok(RawToken::Quoted(quoted)) => {
                let inner = &quoted[1..quoted.len() - 1];
                let text = unescape(inner).map_err(|(escape, offset)| {
                    ParseError::new(
                        ErrorKind::InvalidEscape(escape),
                        Position::in_line(line_number, line, span.start + 1 + offset),
                    )
                })?;
                Token::Str(text)
            }
            // Only an opening quote without its closing partner can fail
            Err(()) => {
                return Err(ParseError::new(
                    ErrorKind::UnterminatedString,
                    Position::in_line(line_number, line, span.start),
                ))
            }
        };
        tokens.push((token, span));
    }

    Ok(tokens)
}

/// Resolve escape sequences inside a string literal
///
/// On failure returns the offending character and the byte offset of its
/// backslash.
fn unescape(inner: &str) -> Result<String, (char, usize)> {
    let mut text = String::with_capacity(inner.len());
    let mut chars = inner.char_indices();

    while let Some((offset, c)) = chars.next() {
        if c != '\\' {
            text.push(c);
            continue;
        }
        let escaped = match chars.next() {
            Some((_, '"')) => '"',
            Some((_, '\\')) => '\\',
            Some((_, 'n')) => '\n',
            Some((_, 't')) => '\t',
            Some((_, '\'')) => '\'',
            Some((_, other)) => return Err((other, offset)),
            None => return Err(('\\', offset)),
        };
        text.push(escaped);
    }

    Ok(text)
}

fn check_parens(tokens: &[SpannedToken], line_number: usize, line: &str) -> Result<(), ParseError> {
    let mut open = Vec::new();
    for (token, span) in tokens {
        match token {
            Token::Open => open.push(span.start),
            Token::Close => {
                if open.pop().is_none() {
                    return Err(ParseError::paren(
                        ParenError::StrayClose,
                        Position::in_line(line_number, line, span.start),
                    ));
                }
            }
            _ => {}
        }
    }

    match open.first() {
        Some(&outermost) => Err(ParseError::paren(
            ParenError::UnclosedOpen,
            Position::in_line(line_number, line, outermost),
        )),
        None => Ok(()),
    }
}

/// Lex one source line
///
/// Returns `Ok(None)` for blank lines and comment lines. A comment hides only
/// its own line: lines indented under it keep their depth, so commenting out
/// a line that has children leaves them one level too deep for the resolver.
pub fn lex_line(
    line_number: usize,
    line: &str,
    syntax: &SyntaxOptions,
) -> Result<Option<LineRecord>, ParseError> {
    let content = line.trim_start();
    if content.trim_end().is_empty() || syntax.is_comment(content) {
        return Ok(None);
    }

    let leading = &line[..line.len() - content.len()];
    if let Some(tab) = leading.find('\t') {
        return Err(ParseError::indentation(
            IndentationError::Tab,
            Position::in_line(line_number, line, tab),
        ));
    }

    // Other unicode whitespace counts as one column each
    let width = leading.chars().count();
    let unit = syntax.indent_width.max(1);
    if width % unit != 0 {
        return Err(ParseError::indentation(
            IndentationError::OddWidth { width, unit },
            Position::new(line_number, 1),
        ));
    }

    let tokens = tokenize(line, line_number, syntax)?;
    check_parens(&tokens, line_number, line)?;

    let depth = width / unit;
    tracing::trace!(line = line_number, depth, tokens = tokens.len(), "lexed line");

    Ok(Some(LineRecord {
        depth,
        tokens,
        line_number,
        text: line.to_string(),
    }))
}

/// Lex a whole source into line records, in source order
pub fn lex_source(source: &str, syntax: &SyntaxOptions) -> Result<Vec<LineRecord>, ParseError> {
    let mut records = Vec::new();
    for (index, line) in source.lines().enumerate() {
        if let Some(record) = lex_line(index + 1, line, syntax)? {
            records.push(record);
        }
    }
    tracing::debug!(lines = records.len(), "lexed source");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn syntax() -> SyntaxOptions {
        SyntaxOptions::default()
    }

    fn tokens_of(line: &str) -> Vec<Token> {
        tokenize(line, 1, &syntax())
            .unwrap()
            .into_iter()
            .map(|(token, _)| token)
            .collect()
    }

    #[test]
    fn test_simple_tokenization() {
        assert_eq!(
            tokens_of("echo a"),
            vec![Token::Symbol("echo".into()), Token::Symbol("a".into())]
        );
    }

    #[test]
    fn test_fold_only_when_standalone() {
        assert_eq!(
            tokens_of("a $ b $c"),
            vec![
                Token::Symbol("a".into()),
                Token::Fold,
                Token::Symbol("b".into()),
                Token::Symbol("$c".into()),
            ]
        );
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(
            tokens_of(r#""a\"b\\c\nd\te\'f""#),
            vec![Token::Str("a\"b\\c\nd\te'f".into())]
        );
    }

    #[test]
    fn test_string_opacity() {
        assert_eq!(
            tokens_of(r#"a "(b c) $" d"#),
            vec![
                Token::Symbol("a".into()),
                Token::Str("(b c) $".into()),
                Token::Symbol("d".into()),
            ]
        );
    }

    #[test]
    fn test_spans_are_line_offsets() {
        let tokens = tokenize("  a (bc)", 1, &syntax()).unwrap();
        let spans: Vec<_> = tokens.into_iter().map(|(_, span)| span).collect();
        assert_eq!(spans, vec![2..3, 4..5, 5..7, 7..8]);
    }

    #[test]
    fn test_unterminated_string() {
        let err = tokenize(r#"echo "a"#, 1, &syntax()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnterminatedString);
        assert_eq!(err.position, Position::new(1, 6));
    }

    #[test]
    fn test_invalid_escape() {
        let err = tokenize(r#"x "a\qb""#, 3, &syntax()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidEscape('q'));
        assert_eq!(err.position, Position::new(3, 5));
    }

    #[test]
    fn test_lex_line_depth() {
        let record = lex_line(4, "    a b", &syntax()).unwrap().unwrap();
        assert_eq!(record.depth, 2);
        assert_eq!(record.line_number, 4);
        assert_eq!(record.tokens.len(), 2);
        assert_eq!(record.token_position(1), Position::new(4, 7));
        assert_eq!(record.token_position(2), Position::new(4, 8));
    }

    #[test]
    fn test_blank_and_comment_lines() {
        assert_eq!(lex_line(1, "", &syntax()).unwrap(), None);
        assert_eq!(lex_line(1, "    ", &syntax()).unwrap(), None);
        assert_eq!(lex_line(1, "  ; note", &syntax()).unwrap(), None);
        assert!(lex_line(1, "a ; not a comment", &syntax()).unwrap().is_some());
    }

    #[test]
    fn test_comment_does_not_hide_its_children() {
        let records = lex_source("a\n  ; c\n    b", &syntax()).unwrap();
        let summary: Vec<_> = records
            .iter()
            .map(|record| (record.line_number, record.depth))
            .collect();
        assert_eq!(summary, vec![(1, 0), (3, 2)]);
    }

    #[test]
    fn test_tab_indentation() {
        let err = lex_line(2, " \ta", &syntax()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Indentation(IndentationError::Tab));
        assert_eq!(err.position, Position::new(2, 2));
    }

    #[test]
    fn test_odd_indentation() {
        let err = lex_line(2, "   a", &syntax()).unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::Indentation(IndentationError::OddWidth { width: 3, unit: 2 })
        );
    }

    #[test]
    fn test_custom_indent_width() {
        let syntax = SyntaxOptions {
            indent_width: 4,
            ..SyntaxOptions::default()
        };
        let record = lex_line(1, "    a", &syntax).unwrap().unwrap();
        assert_eq!(record.depth, 1);
        assert!(lex_line(1, "  a", &syntax).is_err());
    }

    #[test]
    fn test_stray_close() {
        let err = lex_line(1, "a b) c", &syntax()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ParenImbalance(ParenError::StrayClose));
        assert_eq!(err.position, Position::new(1, 4));
    }

    #[test]
    fn test_unclosed_open_points_at_outermost() {
        let err = lex_line(1, "a (b (c)", &syntax()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ParenImbalance(ParenError::UnclosedOpen));
        assert_eq!(err.position, Position::new(1, 3));
    }

    #[test]
    fn test_lex_source_numbers_lines() {
        let records = lex_source("a\n\n; c\n  b\r\n", &syntax()).unwrap();
        let summary: Vec<_> = records
            .iter()
            .map(|record| (record.line_number, record.depth))
            .collect();
        assert_eq!(summary, vec![(1, 0), (4, 1)]);
        assert_eq!(records[1].text(), "  b");
    }
}
