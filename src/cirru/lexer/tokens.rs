//! Token definitions for Cirru lines
//!
//! [`RawToken`] is what logos recognizes: parens, quoted literals (still
//! escaped) and bare words. The lexer turns those into [`Token`]s, unescaping
//! strings and spotting the fold marker among the words.
use logos::Logos;
use serde::Serialize;
use std::fmt;

/// Raw tokens straight out of logos
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"\s+")]
pub(crate) enum RawToken {
    #[token("(")]
    Open,
    #[token(")")]
    Close,

    // Quotes included, escapes untouched
    #[regex(r#""([^"\\]|\\.)*""#, |lex| lex.slice().to_owned())]
    Quoted(String),

    #[regex(r#"[^\s()"]+"#, |lex| lex.slice().to_owned())]
    Word(String),
}

/// A token of one Cirru line
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "kebab-case")]
pub enum Token {
    Symbol(String),
    /// Unescaped string literal content
    Str(String),
    Open,
    Close,
    Fold,
}

impl Token {
    pub fn is_structural(&self) -> bool {
        matches!(self, Token::Open | Token::Close | Token::Fold)
    }

    /// Text carried by a symbol or string
    pub fn text(&self) -> Option<&str> {
        match self {
            Token::Symbol(text) | Token::Str(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Symbol(text) => write!(f, "<symbol:{}>", text),
            Token::Str(text) => write!(f, "<string:{}>", text),
            Token::Open => f.write_str("<open>"),
            Token::Close => f.write_str("<close>"),
            Token::Fold => f.write_str("<fold>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(source: &str) -> Vec<Result<RawToken, ()>> {
        RawToken::lexer(source).collect()
    }

    #[test]
    fn test_words_and_parens() {
        assert_eq!(
            raw("a (b-c) $"),
            vec![
                Ok(RawToken::Word("a".into())),
                Ok(RawToken::Open),
                Ok(RawToken::Word("b-c".into())),
                Ok(RawToken::Close),
                Ok(RawToken::Word("$".into())),
            ]
        );
    }

    #[test]
    fn test_quoted_keeps_spaces_and_parens() {
        assert_eq!(
            raw(r#"echo "a (b) c""#),
            vec![
                Ok(RawToken::Word("echo".into())),
                Ok(RawToken::Quoted(r#""a (b) c""#.into())),
            ]
        );
    }

    #[test]
    fn test_quoted_with_escaped_quote() {
        assert_eq!(
            raw(r#""say \"hi\"""#),
            vec![Ok(RawToken::Quoted(r#""say \"hi\"""#.into()))]
        );
    }

    #[test]
    fn test_word_stops_at_quote() {
        assert_eq!(
            raw(r#"a"b""#),
            vec![
                Ok(RawToken::Word("a".into())),
                Ok(RawToken::Quoted(r#""b""#.into())),
            ]
        );
    }

    #[test]
    fn test_unterminated_quote_is_error() {
        let tokens = raw(r#"echo "a"#);
        assert_eq!(tokens[0], Ok(RawToken::Word("echo".into())));
        assert!(tokens[1].is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Token::Symbol("a".into()).to_string(), "<symbol:a>");
        assert_eq!(Token::Str("a b".into()).to_string(), "<string:a b>");
        assert_eq!(Token::Fold.to_string(), "<fold>");
        assert!(Token::Open.is_structural());
        assert_eq!(Token::Str("x".into()).text(), Some("x"));
        assert_eq!(Token::Close.text(), None);
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&vec![Token::Symbol("a".into()), Token::Open]).unwrap();
        assert_eq!(json, r#"[{"kind":"symbol","text":"a"},{"kind":"open"}]"#);
    }
}
