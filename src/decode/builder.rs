//! The construction stack. The scanner reports structure; this sink
//! turns it into an owned tree, one frame per open nesting level plus
//! one pending-key frame per dict entry in flight. On any error the
//! whole stack is dropped, which frees every in-progress node.

use smallvec::SmallVec;

use crate::error::LexCode;
use crate::lexer::{ContainerKind, Events, Token};
use crate::types::value::{Node, Object};
use crate::{num, text, Error, Result};

pub(crate) struct TreeBuilder {
    stack: SmallVec<[Frame; 16]>,
}

enum Frame {
    Value(Node),
    /// A dict key waiting for its value. Never attached on its own.
    Key(String),
}

impl TreeBuilder {
    pub(crate) fn new() -> Self {
        Self {
            stack: SmallVec::new(),
        }
    }

    /// The finished root, if the scan left exactly one completed value.
    pub(crate) fn into_root(mut self) -> Option<Node> {
        match self.stack.pop() {
            Some(Frame::Value(node)) if self.stack.is_empty() => Some(node),
            _ => None,
        }
    }

    fn decode_body(&self, body: &str, has_escapes: bool, pos: usize) -> Result<String> {
        if has_escapes {
            // pos is just past the closing quote
            text::unescape(body, pos - body.len() - 1)
        } else {
            Ok(body.to_owned())
        }
    }

    /// Hand a completed value to its parent: append to an array, pair
    /// with a pending key and insert into the dict beneath it, or,
    /// with nothing on the stack, keep it as the root result.
    fn attach(&mut self, node: Node) {
        if matches!(self.stack.last(), Some(Frame::Key(_))) {
            let Some(Frame::Key(key)) = self.stack.pop() else {
                unreachable!("pending key frame disappeared");
            };
            let Some(Frame::Value(Node::Dict(map))) = self.stack.last_mut() else {
                unreachable!("pending key without an enclosing dict");
            };
            map.insert(key, node);
            return;
        }
        match self.stack.last_mut() {
            None => self.stack.push(Frame::Value(node)),
            Some(Frame::Value(Node::Array(items))) => items.push(node),
            Some(_) => unreachable!("value attached under a scalar parent"),
        }
    }
}

impl Events for TreeBuilder {
    fn open(&mut self, kind: ContainerKind, _pos: usize) -> Result<()> {
        let node = match kind {
            ContainerKind::Dict => Node::Dict(Object::new()),
            ContainerKind::Array => Node::Array(Vec::new()),
        };
        self.stack.push(Frame::Value(node));
        Ok(())
    }

    fn close(&mut self, token: Token<'_>, pos: usize) -> Result<()> {
        let node = match token {
            Token::Dict | Token::Array => match self.stack.pop() {
                Some(Frame::Value(node)) => node,
                _ => unreachable!("container close without matching open"),
            },
            Token::Key { body, has_escapes } => {
                let key = self.decode_body(body, has_escapes, pos)?;
                self.stack.push(Frame::Key(key));
                return Ok(());
            }
            Token::Str { body, has_escapes } => {
                Node::String(self.decode_body(body, has_escapes, pos)?)
            }
            Token::Number { text, is_float } => num::classify(text, is_float)
                .ok_or(Error::lexer(LexCode::InvalidNumber, pos))?,
            Token::Bool(value) => Node::Bool(value),
            Token::Null => Node::Null,
        };
        self.attach(node);
        Ok(())
    }
}
