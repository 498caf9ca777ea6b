//! Tree factories and assertions shared by unit tests

use crate::cirru::ast::{Document, GroupKind, Node};
use crate::cirru::config::Options;
use crate::cirru::parse_with;

pub fn sym(text: &str) -> Node {
    Node::symbol(text)
}

pub fn string(text: &str) -> Node {
    Node::string(text)
}

/// A paren group; kinds do not matter to shape comparisons
pub fn group(children: Vec<Node>) -> Node {
    Node::group(GroupKind::Paren, children)
}

pub fn parse_ok(source: &str) -> Document {
    parse_with(source, &Options::default())
        .unwrap_or_else(|err| panic!("failed to parse {:?}: {}", source, err))
}

/// Assert that `source` parses to the given top-level expressions, ignoring group kinds
pub fn assert_shape(source: &str, expected: Vec<Node>) {
    let parsed = parse_ok(source);
    let expected = Document::new(expected);
    assert!(
        parsed.same_shape(&expected),
        "shape mismatch for {:?}\n  parsed:   {}\n  expected: {}",
        source,
        parsed,
        expected
    );
}
