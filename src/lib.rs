//! Strict RFC 4627 JSON in both directions: parse text into an owned
//! [`Node`] tree, and render a tree back to text under a configurable
//! formatting policy. Bare top-level scalars are accepted as a
//! convenience on the parse side.

pub mod decode;
pub mod encode;
pub mod error;
pub mod options;
pub mod types;

mod lexer;
mod num;
mod tables;
mod text;

pub use crate::error::{Error, LexCode};
pub use crate::options::FormatOptions;
pub use crate::types::value::{Node, Object};
pub use crate::types::walk::{walk, KindMask, Visitor, WalkItem, WalkOptions};

pub type Result<T> = std::result::Result<T, Error>;

/// Parse a JSON document.
pub fn from_str(input: &str) -> Result<Node> {
    decode::from_str(input)
}

/// Parse a JSON document from bytes (UTF-8 checked first).
pub fn from_slice(input: &[u8]) -> Result<Node> {
    decode::from_slice(input)
}

/// Render compactly (all format strings empty).
pub fn to_string(node: &Node) -> String {
    to_string_with_options(node, &FormatOptions::default())
}

pub fn to_string_with_options(node: &Node, options: &FormatOptions) -> String {
    encode::to_string_with_options(node, options)
}

/// Append the rendering of `node` to an existing buffer.
pub fn write_json(node: &Node, options: &FormatOptions, out: &mut String) {
    encode::write_json(node, options, out)
}
