//! Expression tree definitions
//!
//! - `node` - leaves, groups and the document root
//! - `span` - line/column positions used by errors and tokens

pub mod node;
pub mod span;

pub use node::{Document, Group, GroupKind, Leaf, LeafKind, Node};
pub use span::Position;
