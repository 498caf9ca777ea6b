//! Grammar for the tokens of one line
//!
//! ```text
//! segment := item* (FOLD segment)?
//! item    := SYMBOL | STRING | OPEN segment CLOSE
//! ```
//!
//! A fold closes the items before it and opens a group holding everything
//! after it. Child lines of the line are appended to the innermost fold of the
//! top-level chain, see [`Segment::into_items`].

use chumsky::prelude::*;

use crate::cirru::ast::{GroupKind, Node};
use crate::cirru::error::{ParenError, ParseError};
use crate::cirru::lexer::{LineRecord, Token};

/// Type alias for parser error
type ParserError = Simple<Token>;

/// Items of a line (or of a paren group) plus the fold that follows them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub items: Vec<Node>,
    pub fold: Option<Box<Segment>>,
}

impl Segment {
    /// Flatten into a node list, placing `children` at the end of the
    /// innermost fold group (or after the items when there is no fold)
    pub fn into_items(self, children: Vec<Node>) -> Vec<Node> {
        let mut items = self.items;
        match self.fold {
            Some(fold) => items.push(Node::group(GroupKind::Fold, fold.into_items(children))),
            None => items.extend(children),
        }
        items
    }

    pub fn into_group(self, kind: GroupKind) -> Node {
        Node::group(kind, self.into_items(Vec::new()))
    }
}

fn segment() -> impl Parser<Token, Segment, Error = ParserError> + Clone {
    recursive(|segment| {
        let leaf = select! {
            Token::Symbol(text) => Node::symbol(text),
            Token::Str(text) => Node::string(text),
        };

        let paren = segment
            .clone()
            .delimited_by(just(Token::Open), just(Token::Close))
            .map(|inner: Segment| inner.into_group(GroupKind::Paren));

        leaf.or(paren)
            .repeated()
            .then(just(Token::Fold).ignore_then(segment).or_not())
            .map(|(items, fold)| Segment {
                items,
                fold: fold.map(Box::new),
            })
    })
}

fn line() -> impl Parser<Token, Segment, Error = ParserError> {
    segment().then_ignore(end())
}

/// Parse the tokens of `record`, skipping the first `skip` of them
pub fn parse_line(record: &LineRecord, skip: usize) -> Result<Segment, ParseError> {
    let tokens: Vec<Token> = record
        .tokens
        .iter()
        .skip(skip)
        .map(|(token, _)| token.clone())
        .collect();

    line().parse(tokens).map_err(|errors| {
        // Spans are token indices; balance was checked by the lexer, so this
        // is a close paren the grammar could not place.
        let index = errors.first().map_or(0, |error| error.span().start);
        let kind = match record.tokens.get(skip + index) {
            Some((Token::Close, _)) => ParenError::StrayClose,
            _ => ParenError::UnclosedOpen,
        };
        ParseError::paren(kind, record.token_position(skip + index))
    })
}
