//! Streaming scanner over a byte buffer. The scanner owns structure
//! (nesting, commas, colons, token boundaries) and reports it as
//! open/close events; turning tokens into tree nodes is the caller's
//! job. Either side can stop the scan by returning an error, and no
//! further events fire once it does.

use smallvec::SmallVec;

use crate::error::LexCode;
use crate::tables::is_allowed_whitespace;
use crate::{Error, Result};

/// One slot per open nesting level; exceeding this is a reported
/// error, never unchecked recursion.
pub(crate) const MAX_DEPTH: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ContainerKind {
    Dict,
    Array,
}

/// A completed item. `Key`/`Str` carry the raw token body (quotes
/// excluded); `Number` carries the raw character run plus the
/// float/exponent flag.
#[derive(Debug, PartialEq)]
pub(crate) enum Token<'a> {
    Dict,
    Array,
    Key { body: &'a str, has_escapes: bool },
    Str { body: &'a str, has_escapes: bool },
    Number { text: &'a str, is_float: bool },
    Bool(bool),
    Null,
}

/// Sink for structural events. `pos` is the byte offset just past the
/// completed token (for `close`) or at the opener (for `open`).
pub(crate) trait Events {
    fn open(&mut self, kind: ContainerKind, pos: usize) -> Result<()>;
    fn close(&mut self, token: Token<'_>, pos: usize) -> Result<()>;
}

/// Scan `input`, which must be container-rooted (bare scalars are the
/// wrap adapter's concern). On success returns the number of levels
/// still open at end of input: zero for a complete document, positive
/// when the input stopped mid-structure (an unterminated string,
/// number or literal counts as a level of its own).
pub(crate) fn tokenize<E: Events>(input: &str, events: &mut E) -> Result<usize> {
    Lexer {
        input,
        bytes: input.as_bytes(),
        pos: 0,
        stack: SmallVec::new(),
    }
    .run(events)
}

struct Lexer<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
    stack: SmallVec<[ContainerKind; 16]>,
}

enum Scan {
    Done,
    Eof,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Expecting a value (after a colon or an array comma).
    Value,
    /// Expecting a value or `]` (right after `[`).
    ValueOrClose,
    /// Expecting a key or `}` (right after `{`).
    MemberKey,
    /// Expecting a key (after a dict comma).
    MemberKeyRequired,
    Colon,
    CommaOrClose,
    /// Root closed; only trailing whitespace is legal.
    Done,
}

impl<'a> Lexer<'a> {
    fn run<E: Events>(&mut self, events: &mut E) -> Result<usize> {
        self.skip_whitespace();
        let Some(&first) = self.bytes.get(self.pos) else {
            return Ok(0);
        };
        let mut phase = match first {
            b'{' => {
                self.open(events, ContainerKind::Dict)?;
                Phase::MemberKey
            }
            b'[' => {
                self.open(events, ContainerKind::Array)?;
                Phase::ValueOrClose
            }
            _ => return Err(self.stray(first, LexCode::ExpectedValue)),
        };

        loop {
            self.skip_whitespace();
            let Some(&byte) = self.bytes.get(self.pos) else {
                return Ok(self.stack.len());
            };
            phase = match phase {
                Phase::Done => return Err(Error::lexer(LexCode::GarbageTrailing, self.pos)),
                Phase::MemberKey | Phase::MemberKeyRequired => match byte {
                    b'"' => match self.scan_string(events, true)? {
                        Scan::Done => Phase::Colon,
                        Scan::Eof => return Ok(self.stack.len() + 1),
                    },
                    b'}' if phase == Phase::MemberKey => {
                        self.close(events, ContainerKind::Dict)?;
                        self.after_value()
                    }
                    _ => return Err(self.stray(byte, LexCode::ExpectedKey)),
                },
                Phase::Colon => match byte {
                    b':' => {
                        self.pos += 1;
                        Phase::Value
                    }
                    _ => return Err(self.stray(byte, LexCode::ExpectedColon)),
                },
                Phase::Value | Phase::ValueOrClose => match byte {
                    b']' if phase == Phase::ValueOrClose => {
                        self.close(events, ContainerKind::Array)?;
                        self.after_value()
                    }
                    b'{' => {
                        self.open(events, ContainerKind::Dict)?;
                        Phase::MemberKey
                    }
                    b'[' => {
                        self.open(events, ContainerKind::Array)?;
                        Phase::ValueOrClose
                    }
                    b'"' => match self.scan_string(events, false)? {
                        Scan::Done => self.after_value(),
                        Scan::Eof => return Ok(self.stack.len() + 1),
                    },
                    b't' | b'f' | b'n' => match self.scan_literal(events)? {
                        Scan::Done => self.after_value(),
                        Scan::Eof => return Ok(self.stack.len() + 1),
                    },
                    b'-' | b'0'..=b'9' => match self.scan_number(events)? {
                        Scan::Done => self.after_value(),
                        Scan::Eof => return Ok(self.stack.len() + 1),
                    },
                    _ => return Err(self.stray(byte, LexCode::ExpectedValue)),
                },
                Phase::CommaOrClose => match byte {
                    b',' => {
                        self.pos += 1;
                        match self.stack.last() {
                            Some(ContainerKind::Dict) => Phase::MemberKeyRequired,
                            _ => Phase::Value,
                        }
                    }
                    b'}' => match self.stack.last() {
                        Some(ContainerKind::Dict) => {
                            self.close(events, ContainerKind::Dict)?;
                            self.after_value()
                        }
                        _ => return Err(Error::lexer(LexCode::BracketMismatch, self.pos)),
                    },
                    b']' => match self.stack.last() {
                        Some(ContainerKind::Array) => {
                            self.close(events, ContainerKind::Array)?;
                            self.after_value()
                        }
                        _ => return Err(Error::lexer(LexCode::BracketMismatch, self.pos)),
                    },
                    _ => return Err(self.stray(byte, LexCode::ExpectedCommaOrClose)),
                },
            };
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(&byte) = self.bytes.get(self.pos) {
            if !is_allowed_whitespace(byte) {
                break;
            }
            self.pos += 1;
        }
    }

    fn after_value(&self) -> Phase {
        if self.stack.is_empty() {
            Phase::Done
        } else {
            Phase::CommaOrClose
        }
    }

    /// Control bytes that are not allowed whitespace get their own
    /// code; anything else keeps the structural expectation.
    fn stray(&self, byte: u8, fallback: LexCode) -> Error {
        let code = if byte < 0x20 {
            LexCode::WeirdWhitespace
        } else {
            fallback
        };
        Error::lexer(code, self.pos)
    }

    fn open<E: Events>(&mut self, events: &mut E, kind: ContainerKind) -> Result<()> {
        if self.stack.len() >= MAX_DEPTH {
            return Err(Error::lexer(LexCode::LevelsExceeded, self.pos));
        }
        events.open(kind, self.pos)?;
        self.stack.push(kind);
        self.pos += 1;
        Ok(())
    }

    fn close<E: Events>(&mut self, events: &mut E, kind: ContainerKind) -> Result<()> {
        self.stack.pop();
        self.pos += 1;
        let token = match kind {
            ContainerKind::Dict => Token::Dict,
            ContainerKind::Array => Token::Array,
        };
        events.close(token, self.pos)
    }

    fn scan_string<E: Events>(&mut self, events: &mut E, is_key: bool) -> Result<Scan> {
        self.pos += 1;
        let body_start = self.pos;
        let mut has_escapes = false;
        loop {
            let rest = &self.bytes[self.pos..];
            let Some(offset) = rest
                .iter()
                .position(|&b| b == b'"' || b == b'\\' || b < 0x20)
            else {
                self.pos = self.bytes.len();
                return Ok(Scan::Eof);
            };
            let at = self.pos + offset;
            match self.bytes[at] {
                b'"' => {
                    let body = &self.input[body_start..at];
                    self.pos = at + 1;
                    let token = if is_key {
                        Token::Key { body, has_escapes }
                    } else {
                        Token::Str { body, has_escapes }
                    };
                    events.close(token, self.pos)?;
                    return Ok(Scan::Done);
                }
                b'\\' => {
                    has_escapes = true;
                    if at + 1 >= self.bytes.len() {
                        self.pos = self.bytes.len();
                        return Ok(Scan::Eof);
                    }
                    // skip the escaped byte so `\"` stays inside the token;
                    // whether the escape is legal is the codec's call
                    self.pos = at + 2;
                }
                _ => return Err(Error::lexer(LexCode::UnescapedControl, at)),
            }
        }
    }

    /// Numbers are scanned as loose character runs with float/exponent
    /// flags; the classifier enforces the strict whole-token rules.
    fn scan_number<E: Events>(&mut self, events: &mut E) -> Result<Scan> {
        let start = self.pos;
        let mut is_float = false;
        while let Some(&byte) = self.bytes.get(self.pos) {
            match byte {
                b'0'..=b'9' | b'+' | b'-' => self.pos += 1,
                b'.' | b'e' | b'E' => {
                    is_float = true;
                    self.pos += 1;
                }
                _ => break,
            }
        }
        if self.pos >= self.bytes.len() {
            return Ok(Scan::Eof);
        }
        let text = &self.input[start..self.pos];
        events.close(Token::Number { text, is_float }, self.pos)?;
        Ok(Scan::Done)
    }

    fn scan_literal<E: Events>(&mut self, events: &mut E) -> Result<Scan> {
        let (text, token): (&[u8], Token<'_>) = match self.bytes[self.pos] {
            b't' => (b"true", Token::Bool(true)),
            b'f' => (b"false", Token::Bool(false)),
            _ => (b"null", Token::Null),
        };
        let end = self.bytes.len().min(self.pos + text.len());
        let available = &self.bytes[self.pos..end];
        match available.iter().zip(text.iter()).position(|(a, b)| a != b) {
            Some(mismatch) => Err(Error::lexer(LexCode::InvalidLiteral, self.pos + mismatch)),
            None if available.len() < text.len() => {
                self.pos = self.bytes.len();
                Ok(Scan::Eof)
            }
            None => {
                self.pos += text.len();
                events.close(token, self.pos)?;
                Ok(Scan::Done)
            }
        }
    }
}
