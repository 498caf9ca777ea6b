//! Treeviz formatter for expression trees

use crate::cirru::ast::{Document, LeafKind, Node};

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

pub fn to_treeviz_str(doc: &Document) -> String {
    let mut result = String::new();
    append_nodes(&mut result, &doc.expressions, "");
    result
}

fn append_nodes(result: &mut String, nodes: &[Node], prefix: &str) {
    for (i, node) in nodes.iter().enumerate() {
        let is_last = i == nodes.len() - 1;
        append_node(result, node, prefix, is_last);
    }
}

fn append_node(result: &mut String, node: &Node, prefix: &str, is_last: bool) {
    let connector = if is_last { "└─" } else { "├─" };

    match node {
        Node::Leaf(leaf) => {
            let (node_type, label) = match leaf.kind {
                LeafKind::Symbol => ("symbol", truncate(&leaf.text, 30)),
                LeafKind::Str => ("string", format!("{:?}", truncate(&leaf.text, 30))),
            };
            result.push_str(&format!("{}{} {}: {}\n", prefix, connector, node_type, label));
        }
        Node::Group(group) => {
            let count = group.children.len();
            let noun = if count == 1 { "item" } else { "items" };
            result.push_str(&format!(
                "{}{} {}: {} {}\n",
                prefix,
                connector,
                group.kind.name(),
                count,
                noun
            ));
            let new_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
            append_nodes(result, &group.children, &new_prefix);
        }
    }
}
