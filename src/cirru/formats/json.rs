//! Nested-array serialization
//!
//! A leaf serializes as its text, a group as an array of its children and a
//! document as an array of its expressions: `echo "a b"` becomes
//! `[["echo","a b"]]`. Leaf kinds and group kinds are not recorded, so
//! reading back decides per string: text that prints as a bare symbol becomes
//! a symbol, anything else a string leaf. Arrays become paren groups.

use crate::cirru::ast::{Document, GroupKind, Node};
use crate::cirru::printer::is_plain_symbol;
use serde::de::{self, Deserialize, Deserializer, SeqAccess, Visitor};
use serde::ser::{Serialize, Serializer};
use std::fmt;

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Leaf(leaf) => serializer.serialize_str(&leaf.text),
            Node::Group(group) => serializer.collect_seq(&group.children),
        }
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.expressions)
    }
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = Node;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string or an array of nodes")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Node, E> {
        Ok(leaf_from_text(value))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Node, A::Error> {
        let mut children = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(child) = seq.next_element::<Node>()? {
            children.push(child);
        }
        Ok(Node::group(GroupKind::Paren, children))
    }
}

fn leaf_from_text(text: &str) -> Node {
    if is_plain_symbol(text) {
        Node::symbol(text)
    } else {
        Node::string(text)
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NodeVisitor)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<Node>::deserialize(deserializer).map(Document::new)
    }
}

impl Document {
    /// Read a document from a JSON array of expressions
    pub fn from_json_str(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }
}

pub fn from_json_str(source: &str) -> Result<Document, serde_json::Error> {
    Document::from_json_str(source)
}

pub fn to_json_str(document: &Document, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(document)
    } else {
        serde_json::to_string(document)
    }
}

pub fn to_yaml_str(document: &Document) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(document)
}
