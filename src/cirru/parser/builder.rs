//! Tree builder
//!
//! Children always come after their parent in source order, so walking the
//! skeleton backwards guarantees every child node exists before its parent is
//! assembled. Finished nodes wait in a slot per line until the parent takes
//! them.

use crate::cirru::ast::{Document, GroupKind, Node};
use crate::cirru::config::SyntaxOptions;
use crate::cirru::error::ParseError;
use crate::cirru::lexer::Token;
use crate::cirru::parser::line::parse_line;
use crate::cirru::resolver::Skeleton;

/// What a finished line hands to its parent
#[derive(Debug)]
enum LineNode {
    Single(Node),
    /// Items that join the parent directly, from a line led by the splice marker
    Spliced(Vec<Node>),
}

/// Build the expression tree for a resolved source
pub fn build_document(skeleton: Skeleton, syntax: &SyntaxOptions) -> Result<Document, ParseError> {
    let mut slots: Vec<Option<LineNode>> = Vec::with_capacity(skeleton.lines.len());
    slots.resize_with(skeleton.lines.len(), || None);

    for index in (0..skeleton.lines.len()).rev() {
        let record = &skeleton.lines[index];
        let nested = record.depth > 0;
        let spliced = nested
            && matches!(record.tokens.first(), Some((Token::Symbol(first), _)) if syntax.is_splice(first));

        let segment = parse_line(record, usize::from(spliced))?;

        let mut children = Vec::new();
        for &child in skeleton.children_of(index) {
            match slots[child].take() {
                Some(LineNode::Single(node)) => children.push(node),
                Some(LineNode::Spliced(items)) => children.extend(items),
                None => {}
            }
        }
        let has_children = !children.is_empty();
        let mut items = segment.into_items(children);

        let node = if spliced {
            LineNode::Spliced(items)
        } else if nested && items.len() == 1 {
            LineNode::Single(items.remove(0))
        } else if !nested && !has_children && is_lone_paren(&items) {
            LineNode::Single(items.remove(0))
        } else {
            LineNode::Single(Node::group(GroupKind::Indent, items))
        };
        slots[index] = Some(node);
    }

    let expressions: Vec<Node> = skeleton
        .roots
        .iter()
        .filter_map(|&root| match slots[root].take() {
            Some(LineNode::Single(node)) => Some(node),
            Some(LineNode::Spliced(items)) => Some(Node::group(GroupKind::Indent, items)),
            None => None,
        })
        .collect();

    tracing::debug!(expressions = expressions.len(), "built document");
    Ok(Document::new(expressions))
}

fn is_lone_paren(items: &[Node]) -> bool {
    match items {
        [only] => only.as_group().is_some_and(|group| group.kind == GroupKind::Paren),
        _ => false,
    }
}
