//! Generic depth-first traversal over a [`Node`] tree. A walk fires
//! three kinds of callbacks: `enter` for every item (including nulls
//! and key/value pairs), `exit` after a container's children, and
//! `between` once per sibling boundary. Each callback is gated by a
//! kind bitmask so a visitor only hears about what it asked for.

use super::value::Node;

/// Bitmask over node kinds, with one extra bit for key/value pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindMask(u16);

impl KindMask {
    pub const NONE: KindMask = KindMask(0);
    pub const NULL: KindMask = KindMask(1 << 0);
    pub const BOOL: KindMask = KindMask(1 << 1);
    pub const INT: KindMask = KindMask(1 << 2);
    pub const DOUBLE: KindMask = KindMask(1 << 3);
    pub const STRING: KindMask = KindMask(1 << 4);
    pub const KEYVAL: KindMask = KindMask(1 << 5);
    pub const ARRAY: KindMask = KindMask(1 << 6);
    pub const DICT: KindMask = KindMask(1 << 7);
    pub const ALL: KindMask = KindMask(0xff);

    pub const fn contains(self, other: KindMask) -> bool {
        self.0 & other.0 == other.0
    }

    fn of(node: &Node) -> KindMask {
        match node {
            Node::Null => KindMask::NULL,
            Node::Bool(_) => KindMask::BOOL,
            Node::Int(_) => KindMask::INT,
            Node::Double(_) => KindMask::DOUBLE,
            Node::String(_) => KindMask::STRING,
            Node::Array(_) => KindMask::ARRAY,
            Node::Dict(_) => KindMask::DICT,
        }
    }
}

impl std::ops::BitOr for KindMask {
    type Output = KindMask;

    fn bitor(self, rhs: KindMask) -> KindMask {
        KindMask(self.0 | rhs.0)
    }
}

/// What `enter` is looking at: a value of the tree, or the key half of
/// a dict entry. The entry's value follows as its own item.
#[derive(Debug, Clone, Copy)]
pub enum WalkItem<'a> {
    Value(&'a Node),
    Pair { key: &'a str },
}

/// Callbacks for one traversal. `exit` and `between` have empty
/// defaults since most visitors only need `enter`.
pub trait Visitor {
    fn enter(&mut self, item: WalkItem<'_>);

    fn exit(&mut self, _node: &Node) {}

    fn between(&mut self, _parent: &Node) {}
}

/// Which kinds trigger which callbacks.
#[derive(Debug, Clone, Copy)]
pub struct WalkOptions {
    pub enter_mask: KindMask,
    pub exit_mask: KindMask,
    pub between_mask: KindMask,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            enter_mask: KindMask::ALL,
            exit_mask: KindMask::ARRAY | KindMask::DICT,
            between_mask: KindMask::ARRAY | KindMask::DICT,
        }
    }
}

/// Walk `root` depth-first, parents before children, siblings in
/// order. Dict entries fire a `Pair` enter for the key, then the value
/// subtree.
pub fn walk<V: Visitor>(root: &Node, options: &WalkOptions, visitor: &mut V) {
    let kind = KindMask::of(root);
    if options.enter_mask.contains(kind) {
        visitor.enter(WalkItem::Value(root));
    }

    match root {
        Node::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                if i > 0 && options.between_mask.contains(KindMask::ARRAY) {
                    visitor.between(root);
                }
                walk(item, options, visitor);
            }
            if options.exit_mask.contains(KindMask::ARRAY) {
                visitor.exit(root);
            }
        }
        Node::Dict(map) => {
            for (i, (key, value)) in map.iter().enumerate() {
                if i > 0 && options.between_mask.contains(KindMask::DICT) {
                    visitor.between(root);
                }
                if options.enter_mask.contains(KindMask::KEYVAL) {
                    visitor.enter(WalkItem::Pair { key });
                }
                walk(value, options, visitor);
            }
            if options.exit_mask.contains(KindMask::DICT) {
                visitor.exit(root);
            }
        }
        _ => {}
    }
}
