//! Serialization entry points. Serializing a well-formed tree never
//! fails, so nothing here returns a `Result`.

use crate::options::FormatOptions;
use crate::types::value::Node;
use crate::types::walk::{walk, KindMask, WalkOptions};

mod writer;

use writer::JsonWriter;

/// Append `node` rendered under `options` to `out`.
pub fn write_json(node: &Node, options: &FormatOptions, out: &mut String) {
    let walk_options = WalkOptions {
        enter_mask: KindMask::ALL,
        exit_mask: KindMask::DICT | KindMask::ARRAY,
        between_mask: KindMask::DICT | KindMask::ARRAY,
    };
    let mut writer = JsonWriter::new(options, out);
    walk(node, &walk_options, &mut writer);
}

/// Render `node` into a fresh string.
pub fn to_string_with_options(node: &Node, options: &FormatOptions) -> String {
    let mut out = String::new();
    write_json(node, options, &mut out);
    out
}
