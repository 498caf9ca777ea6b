//! Alternative renderings of a parsed document
//!
//! - `json` - nested arrays of strings (JSON and YAML), readable back into a tree
//! - `treeviz` - box-drawing outline of the tree, group kinds included

pub mod json;
pub mod treeviz;

pub use json::{from_json_str, to_json_str, to_yaml_str};
pub use treeviz::to_treeviz_str;
