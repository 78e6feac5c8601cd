use crate::options::FormatOptions;
use crate::types::value::Node;
use crate::types::walk::{Visitor, WalkItem};
use crate::{num, text};

/// Walk visitor that renders the tree into a caller-supplied buffer.
/// Depth tracking and the three format strings produce the exact
/// spacing contract; with all of them empty the output is compact.
pub(crate) struct JsonWriter<'a> {
    out: &'a mut String,
    options: &'a FormatOptions,
    depth: usize,
}

impl<'a> JsonWriter<'a> {
    pub(crate) fn new(options: &'a FormatOptions, out: &'a mut String) -> Self {
        Self {
            out,
            options,
            depth: 0,
        }
    }

    fn write_newline_and_indent(&mut self) {
        self.out.push_str(&self.options.newline);
        self.write_indent();
    }

    fn write_indent(&mut self) {
        if self.options.indent.is_empty() {
            return;
        }
        for _ in 0..self.depth {
            self.out.push_str(&self.options.indent);
        }
    }
}

impl Visitor for JsonWriter<'_> {
    fn enter(&mut self, item: WalkItem<'_>) {
        match item {
            WalkItem::Pair { key } => {
                text::escape_into(self.out, key);
                self.out.push(':');
                self.out.push_str(&self.options.space);
            }
            WalkItem::Value(node) => match node {
                Node::Null => self.out.push_str("null"),
                Node::Bool(true) => self.out.push_str("true"),
                Node::Bool(false) => self.out.push_str("false"),
                Node::Int(value) => num::write_int(self.out, *value),
                Node::Double(value) => num::write_double(self.out, *value),
                Node::String(value) => text::escape_into(self.out, value),
                Node::Dict(map) => {
                    self.out.push('{');
                    self.depth += 1;
                    if !map.is_empty() {
                        self.write_newline_and_indent();
                    }
                }
                Node::Array(items) => {
                    self.out.push('[');
                    self.depth += 1;
                    if !items.is_empty() {
                        self.write_newline_and_indent();
                    }
                }
            },
        }
    }

    fn exit(&mut self, node: &Node) {
        let (non_empty, closer) = match node {
            Node::Dict(map) => (!map.is_empty(), '}'),
            Node::Array(items) => (!items.is_empty(), ']'),
            _ => return,
        };
        if non_empty {
            self.out.push_str(&self.options.newline);
        }
        self.depth -= 1;
        self.write_indent();
        self.out.push(closer);
    }

    fn between(&mut self, _parent: &Node) {
        self.out.push(',');
        self.write_newline_and_indent();
    }
}
