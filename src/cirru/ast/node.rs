//! Expression tree node types
//!
//! A tree is made of [`Leaf`] and [`Group`] nodes. Groups remember which syntax
//! produced them ([`GroupKind`]), but every kind prints the same way, so two
//! trees that differ only in group kinds are considered the same shape.
//!
//! Trees are write-once: the builder creates them, the printer only reads them.

use crate::cirru::config::Options;
use crate::cirru::printer;
use std::fmt;

/// Whether a leaf came from a bare symbol or a quoted string literal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeafKind {
    Symbol,
    Str,
}

/// Which syntactic feature produced a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKind {
    /// Explicit `( ... )` on a line
    Paren,
    /// A line together with its more deeply indented lines
    Indent,
    /// Everything after a fold operator, plus the line's children
    Fold,
}

impl GroupKind {
    pub fn name(&self) -> &'static str {
        match self {
            GroupKind::Paren => "paren",
            GroupKind::Indent => "indent",
            GroupKind::Fold => "fold",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Leaf {
    pub text: String,
    pub kind: LeafKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Group {
    pub kind: GroupKind,
    pub children: Vec<Node>,
}

/// A node of the expression tree
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    Leaf(Leaf),
    Group(Group),
}

impl Node {
    pub fn symbol(text: impl Into<String>) -> Self {
        Node::Leaf(Leaf {
            text: text.into(),
            kind: LeafKind::Symbol,
        })
    }

    pub fn string(text: impl Into<String>) -> Self {
        Node::Leaf(Leaf {
            text: text.into(),
            kind: LeafKind::Str,
        })
    }

    pub fn group(kind: GroupKind, children: Vec<Node>) -> Self {
        Node::Group(Group { kind, children })
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Node::Group(_))
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Node::Group(group) => Some(group),
            Node::Leaf(_) => None,
        }
    }

    /// Children of a group, empty for a leaf
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Group(group) => &group.children,
            Node::Leaf(_) => &[],
        }
    }

    /// `true` for `a (b)`, `false` for `a b c` and `a ()`
    pub fn is_nested(&self) -> bool {
        self.children()
            .iter()
            .filter_map(Node::as_group)
            .any(|group| !group.children.is_empty())
    }

    /// Structural equality that ignores group kinds
    ///
    /// Leaf text and leaf kind must match, and groups must have the same
    /// children in the same order.
    pub fn same_shape(&self, other: &Node) -> bool {
        match (self, other) {
            (Node::Leaf(a), Node::Leaf(b)) => a == b,
            (Node::Group(a), Node::Group(b)) => {
                a.children.len() == b.children.len()
                    && a
                        .children
                        .iter()
                        .zip(&b.children)
                        .all(|(x, y)| x.same_shape(y))
            }
            _ => false,
        }
    }

    /// Number of nodes in this subtree, including itself
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(Node::node_count).sum::<usize>()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&printer::print_node(self, &Options::default()))
    }
}

/// The root of a parsed source: one group per top-level line, in source order
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Document {
    pub expressions: Vec<Node>,
}

impl Document {
    pub fn new(expressions: Vec<Node>) -> Self {
        Self { expressions }
    }

    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.expressions.len()
    }

    /// Structural equality that ignores group kinds, see [`Node::same_shape`]
    pub fn same_shape(&self, other: &Document) -> bool {
        self.expressions.len() == other.expressions.len()
            && self
                .expressions
                .iter()
                .zip(&other.expressions)
                .all(|(a, b)| a.same_shape(b))
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&printer::print_document(self, &Options::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(children: Vec<Node>) -> Node {
        Node::group(GroupKind::Paren, children)
    }

    #[test]
    fn test_same_shape_ignores_group_kind() {
        let folded = Node::group(
            GroupKind::Indent,
            vec![
                Node::symbol("a"),
                Node::group(GroupKind::Fold, vec![Node::symbol("b")]),
            ],
        );
        let explicit = list(vec![Node::symbol("a"), list(vec![Node::symbol("b")])]);
        assert!(folded.same_shape(&explicit));
        assert_ne!(folded, explicit);
    }

    #[test]
    fn test_same_shape_respects_leaf_kind() {
        assert!(!Node::symbol("a").same_shape(&Node::string("a")));
    }

    #[test]
    fn test_same_shape_respects_order() {
        let ab = list(vec![Node::symbol("a"), Node::symbol("b")]);
        let ba = list(vec![Node::symbol("b"), Node::symbol("a")]);
        assert!(!ab.same_shape(&ba));
    }

    #[test]
    fn test_is_nested() {
        assert!(list(vec![Node::symbol("a"), list(vec![Node::symbol("b")])]).is_nested());
        assert!(!list(vec![Node::symbol("a"), Node::symbol("b")]).is_nested());
        assert!(!list(vec![Node::symbol("a"), list(vec![])]).is_nested());
        assert!(!Node::symbol("a").is_nested());
    }

    #[test]
    fn test_group_accessors() {
        let tree = list(vec![Node::symbol("a")]);
        assert!(tree.is_group());
        assert_eq!(tree.as_group().map(|g| g.kind), Some(GroupKind::Paren));
        assert!(!Node::symbol("a").is_group());
        assert!(Node::string("a").as_group().is_none());
        assert_eq!(tree.children(), &[Node::symbol("a")]);
    }

    #[test]
    fn test_node_count() {
        let tree = list(vec![Node::symbol("a"), list(vec![Node::symbol("b")])]);
        assert_eq!(tree.node_count(), 4);
    }

    #[test]
    fn test_display_uses_compact_layout() {
        let tree = list(vec![
            Node::symbol("a"),
            Node::string("b c"),
            list(vec![]),
        ]);
        assert_eq!(tree.to_string(), "(a \"b c\" ())");
    }
}
