//! Printer for expression trees
//!
//! Every group kind prints the same way: `(` + space-joined children + `)`.
//! Leaves are printed so that lexing the output gives back the same text.
//!
//! Two layouts are supported. `Compact` keeps each top-level expression on a
//! single line. `Pretty` moves a child group that itself holds a non-empty
//! group onto its own line:
//!
//! ```text
//! (defn f (a)
//!   (let
//!     ((x 1)) (+ x a)))
//! ```
//!
//! [`format_one_liner`] and [`format_document`] go the other way and write
//! trees back as Cirru: a single line per expression, or indented lines.

use crate::cirru::ast::{Document, Leaf, LeafKind, Node};
use crate::cirru::config::{Layout, Options, SyntaxOptions};
use crate::cirru::error::FormatError;
use once_cell::sync::Lazy;
use regex::Regex;

static PLAIN_SYMBOL: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^[^\s()"]+$"#).unwrap());

/// `true` when `text` lexes back as a single bare symbol
pub fn is_plain_symbol(text: &str) -> bool {
    PLAIN_SYMBOL.is_match(text)
}

/// Quote `text` with the escapes the lexer understands
pub fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            other => quoted.push(other),
        }
    }
    quoted.push('"');
    quoted
}

fn print_leaf(leaf: &Leaf, syntax: &SyntaxOptions) -> String {
    match leaf.kind {
        LeafKind::Symbol if is_plain_symbol(&leaf.text) && !syntax.is_fold(&leaf.text) => {
            leaf.text.clone()
        }
        _ => quote(&leaf.text),
    }
}

fn write_node(node: &Node, options: &Options, level: usize, out: &mut String) {
    match node {
        Node::Leaf(leaf) => out.push_str(&print_leaf(leaf, &options.syntax)),
        Node::Group(group) => {
            out.push('(');
            for (idx, child) in group.children.iter().enumerate() {
                if idx > 0 {
                    if options.printer.layout == Layout::Pretty && child.is_nested() {
                        out.push('\n');
                        out.push_str(&" ".repeat((level + 1) * options.syntax.indent_width));
                    } else {
                        out.push(' ');
                    }
                }
                write_node(child, options, level + 1, out);
            }
            out.push(')');
        }
    }
}

/// Print a single node
pub fn print_node(node: &Node, options: &Options) -> String {
    let mut out = String::new();
    write_node(node, options, 0, &mut out);
    out
}

/// Print every top-level expression, joined by the configured separator
///
/// The root itself gets no parens and there is no trailing separator.
pub fn print_document(document: &Document, options: &Options) -> String {
    document
        .expressions
        .iter()
        .map(|expr| print_node(expr, options))
        .collect::<Vec<_>>()
        .join(&options.printer.separator)
}

/// Write a group as one line of Cirru
///
/// The last child, when it is a group, is written after the fold marker
/// instead of in parens, so `(a (b c))` becomes `a $ b c`.
pub fn format_one_liner(node: &Node, options: &Options) -> Result<String, FormatError> {
    match node {
        Node::Leaf(leaf) => Err(FormatError::ExpectedGroup(leaf.text.clone())),
        Node::Group(group) if group.children.is_empty() => Err(FormatError::EmptyExpression),
        Node::Group(group) => Ok(one_liner_items(&group.children, &options.syntax)),
    }
}

fn one_liner_items(children: &[Node], syntax: &SyntaxOptions) -> String {
    let last = children.len().saturating_sub(1);
    children
        .iter()
        .enumerate()
        .map(|(idx, child)| match child {
            Node::Group(group) if idx == last => {
                if group.children.is_empty() {
                    syntax.fold_marker.clone()
                } else {
                    format!(
                        "{} {}",
                        syntax.fold_marker,
                        one_liner_items(&group.children, syntax)
                    )
                }
            }
            _ => inline_node(child, syntax),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn inline_node(node: &Node, syntax: &SyntaxOptions) -> String {
    match node {
        Node::Leaf(leaf) => one_liner_leaf(leaf, syntax),
        Node::Group(group) => format!(
            "({})",
            group
                .children
                .iter()
                .map(|child| inline_node(child, syntax))
                .collect::<Vec<_>>()
                .join(" ")
        ),
    }
}

fn one_liner_leaf(leaf: &Leaf, syntax: &SyntaxOptions) -> String {
    let needs_quotes = match leaf.kind {
        LeafKind::Str => true,
        LeafKind::Symbol => {
            !is_plain_symbol(&leaf.text)
                || syntax.is_fold(&leaf.text)
                || syntax.is_splice(&leaf.text)
                || syntax.is_comment(&leaf.text)
        }
    };
    if needs_quotes {
        quote(&leaf.text)
    } else {
        leaf.text.clone()
    }
}

/// Write a document as indented Cirru text
///
/// Leaves and flat groups stay on their parent's line. A nested group that
/// ends a line after a leaf follows the fold marker. Other nested groups move
/// to child lines, and a run of leaves after them shares one splice line.
/// Parsing the output gives back a tree of the same shape.
///
/// ```text
/// defn fib (n)
///   if (<= n 2) 1 $ +
///     fib (dec n)
///     fib (- n 2)
/// ```
pub fn format_document(document: &Document, options: &Options) -> Result<String, FormatError> {
    let mut writer = CirruWriter {
        syntax: &options.syntax,
        use_inline: options.printer.use_inline,
        lines: Vec::new(),
    };
    for expr in &document.expressions {
        writer.write_expression(expr)?;
    }
    tracing::debug!(lines = writer.lines.len(), "formatted document");
    Ok(writer.finish())
}

/// How a child sits on its parent's line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChildKind {
    /// A leaf, or an empty group
    Leaf,
    /// A group without non-empty groups inside
    Flat,
    Nested,
}

fn child_kind(node: &Node) -> ChildKind {
    match node.as_group() {
        Some(group) if !group.children.is_empty() => {
            if node.is_nested() {
                ChildKind::Nested
            } else {
                ChildKind::Flat
            }
        }
        _ => ChildKind::Leaf,
    }
}

struct CirruWriter<'a> {
    syntax: &'a SyntaxOptions,
    use_inline: bool,
    /// (depth, text) in output order
    lines: Vec<(usize, String)>,
}

impl<'a> CirruWriter<'a> {
    fn write_expression(&mut self, expr: &Node) -> Result<(), FormatError> {
        let children = match expr {
            Node::Leaf(leaf) => return Err(FormatError::ExpectedGroup(leaf.text.clone())),
            Node::Group(group) => &group.children,
        };
        match children.as_slice() {
            [] => self.lines.push((0, "()".to_string())),
            // A top-level line holding only a paren group would read back as
            // that group, so the fold marker wraps it instead
            [only] if only.is_group() => {
                let slot = self.open_line(0);
                let mut text = self.syntax.fold_marker.clone();
                if !only.children().is_empty() {
                    text.push(' ');
                    text.push_str(&self.write_segment(only.children(), 0, true));
                }
                self.lines[slot].1 = text;
            }
            children => self.write_line(children, 0),
        }
        Ok(())
    }

    fn open_line(&mut self, depth: usize) -> usize {
        self.lines.push((depth, String::new()));
        self.lines.len() - 1
    }

    fn write_line(&mut self, children: &[Node], depth: usize) {
        let slot = self.open_line(depth);
        let text = self.write_segment(children, depth, false);
        self.lines[slot].1 = text;
    }

    /// Write `children` as the items of one line and return its text
    ///
    /// Whatever cannot stay on the line goes to child lines at `depth + 1`.
    /// Inside a fold (`in_tail`) no further fold is opened.
    fn write_segment(&mut self, children: &[Node], depth: usize, in_tail: bool) -> String {
        let mut parts = Vec::new();
        let mut prev = None;
        let last = children.len().saturating_sub(1);

        for (idx, child) in children.iter().enumerate() {
            let kind = child_kind(child);
            let inline = match (prev, kind) {
                (None, _) | (_, ChildKind::Leaf) => true,
                (Some(ChildKind::Leaf), ChildKind::Flat) => true,
                (Some(ChildKind::Flat), ChildKind::Flat) => self.use_inline,
                _ => false,
            };
            if inline {
                parts.push(inline_node(child, self.syntax));
                prev = Some(kind);
                continue;
            }

            let fold_tail = idx == last
                && !in_tail
                && prev == Some(ChildKind::Leaf)
                && kind == ChildKind::Nested;
            if fold_tail {
                parts.push(self.syntax.fold_marker.clone());
                parts.push(self.write_segment(child.children(), depth, true));
            } else {
                self.write_children(&children[idx..], depth + 1);
            }
            break;
        }

        parts.join(" ")
    }

    /// Write `nodes` as consecutive lines at `depth`, each line reading back
    /// as exactly the nodes it was written for
    fn write_children(&mut self, nodes: &[Node], depth: usize) {
        let mut rest = nodes;
        while let Some(node) = rest.first() {
            let run = rest
                .iter()
                .take_while(|node| child_kind(node) == ChildKind::Leaf)
                .count();
            if run > 0 {
                self.write_leaf_run(&rest[..run], depth);
                rest = &rest[run..];
                continue;
            }

            match node.children() {
                // A nested line with one item is that item, so single-child
                // groups need their own brackets
                [only] if child_kind(only) == ChildKind::Nested => {
                    let marker = self.syntax.fold_marker.clone();
                    self.lines.push((depth, marker));
                    self.write_children(std::slice::from_ref(only), depth + 1);
                }
                [_] => {
                    let text = inline_node(node, self.syntax);
                    self.lines.push((depth, text));
                }
                children => self.write_line(children, depth),
            }
            rest = &rest[1..];
        }
    }

    fn write_leaf_run(&mut self, leaves: &[Node], depth: usize) {
        let syntax = self.syntax;
        let texts = leaves.iter().map(|leaf| inline_node(leaf, syntax));
        if leaves.len() == 1 || syntax.splice_marker.is_empty() {
            self.lines.extend(texts.map(|text| (depth, text)));
        } else {
            let items: Vec<String> = texts.collect();
            let line = format!("{} {}", syntax.splice_marker, items.join(" "));
            self.lines.push((depth, line));
        }
    }

    fn finish(self) -> String {
        let unit = self.syntax.indent_width;
        self.lines
            .iter()
            .map(|(depth, text)| format!("{}{}", " ".repeat(depth * unit), text))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
