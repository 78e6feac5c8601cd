//! Parse entry points: whitespace skipping, the scalar-wrap adapter,
//! and the termination checks that turn a finished scan into a root
//! node or an error.

use log::{debug, trace};

use crate::lexer;
use crate::tables::is_allowed_whitespace;
use crate::types::value::Node;
use crate::{Error, Result};

mod builder;

use builder::TreeBuilder;

/// Parse a JSON document into a tree. The grammar is strict RFC 4627
/// plus bare top-level scalars (`42`, `"hi"`, `true`, `null`).
pub fn from_str(input: &str) -> Result<Node> {
    trace!("parsing {} bytes", input.len());
    let bytes = input.as_bytes();
    let mut start = 0;
    while start < bytes.len() && is_allowed_whitespace(bytes[start]) {
        start += 1;
    }
    if start == bytes.len() {
        return Err(Error::NoValue);
    }

    if bytes[start] == b'{' || bytes[start] == b'[' {
        return run(input);
    }

    // Bare scalar: embed it in a synthetic single-element array so the
    // scanner only ever sees a container root, then pull the element
    // back out. Error positions refer to the synthetic buffer.
    debug!("wrapping bare scalar at offset {start}");
    let rest = &input[start..];
    let mut wrapped = String::with_capacity(rest.len() + 2);
    wrapped.push('[');
    wrapped.push_str(rest);
    wrapped.push(']');
    match run(&wrapped)? {
        Node::Array(items) => Ok(items.into_iter().next().unwrap_or(Node::Null)),
        node => Ok(node),
    }
}

/// UTF-8 validation, then [`from_str`].
pub fn from_slice(input: &[u8]) -> Result<Node> {
    let text = std::str::from_utf8(input)?;
    from_str(text)
}

fn run(input: &str) -> Result<Node> {
    let mut builder = TreeBuilder::new();
    let open_levels = lexer::tokenize(input, &mut builder).map_err(|err| {
        debug!("parse failed: {err}");
        err
    })?;
    if open_levels > 0 {
        return Err(Error::Unterminated { open: open_levels });
    }
    builder.into_root().ok_or(Error::NoValue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LexCode;

    #[rstest::rstest]
    fn test_bare_scalars() {
        assert_eq!(from_str("42").unwrap(), Node::Int(42));
        assert_eq!(from_str("\"hi\"").unwrap(), Node::from("hi"));
        assert_eq!(from_str("true").unwrap(), Node::Bool(true));
        assert_eq!(from_str("false").unwrap(), Node::Bool(false));
        assert_eq!(from_str("null").unwrap(), Node::Null);
        assert_eq!(from_str("-3.5").unwrap(), Node::Double(-3.5));
    }

    #[rstest::rstest]
    fn test_scalar_whitespace_tolerance() {
        assert_eq!(from_str("  42").unwrap(), Node::Int(42));
        assert_eq!(from_str("42 \r\n").unwrap(), Node::Int(42));
        assert_eq!(from_str("\t\"x\"\n").unwrap(), Node::from("x"));
    }

    #[rstest::rstest]
    fn test_containers() {
        assert_eq!(from_str("{}").unwrap(), Node::Dict(Default::default()));
        assert_eq!(from_str("[]").unwrap(), Node::Array(Vec::new()));

        let root = from_str(r#"{"a":[1,2.0,"x",null],"b":{"c":false}}"#).unwrap();
        assert_eq!(root["a"][0], Node::Int(1));
        assert_eq!(root["a"][1], Node::Double(2.0));
        assert_eq!(root["a"][2], Node::from("x"));
        assert_eq!(root["a"][3], Node::Null);
        assert_eq!(root["b"]["c"], Node::Bool(false));
    }

    #[rstest::rstest]
    fn test_whitespace_insensitivity() {
        assert_eq!(
            from_str(" {\"a\":1} ").unwrap(),
            from_str("{\"a\":1}").unwrap()
        );
    }

    #[rstest::rstest]
    fn test_duplicate_keys_overwrite_in_place() {
        let root = from_str(r#"{"a":1,"b":2,"a":3}"#).unwrap();
        let map = root.as_dict().unwrap();
        assert_eq!(map.len(), 2);
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(root["a"], Node::Int(3));
    }

    #[rstest::rstest]
    fn test_integer_boundaries() {
        assert_eq!(
            from_str("9223372036854775807").unwrap(),
            Node::Int(i64::MAX)
        );
        let err = from_str("9223372036854775808").unwrap_err();
        assert!(matches!(
            err,
            Error::Lexer {
                code: LexCode::InvalidNumber,
                ..
            }
        ));
    }

    #[rstest::rstest]
    fn test_unterminated_containers() {
        assert_eq!(from_str("{").unwrap_err(), Error::Unterminated { open: 1 });
        assert_eq!(
            from_str(r#"{"a":["#).unwrap_err(),
            Error::Unterminated { open: 2 }
        );
    }

    #[rstest::rstest]
    fn test_empty_input() {
        assert_eq!(from_str("").unwrap_err(), Error::NoValue);
        assert_eq!(from_str("   \t\r\n").unwrap_err(), Error::NoValue);
    }

    #[rstest::rstest]
    fn test_string_escapes() {
        assert_eq!(from_str(r#""a\nb""#).unwrap(), Node::from("a\nb"));
        assert_eq!(from_str("\"\\u0041\"").unwrap(), Node::from("A"));
        assert_eq!(from_str(r#""😀""#).unwrap(), Node::from("😀"));

        let err = from_str(r#""a\qb""#).unwrap_err();
        assert!(matches!(
            err,
            Error::Lexer {
                code: LexCode::EscapeInvalid,
                ..
            }
        ));
    }

    #[rstest::rstest]
    fn test_scalar_wrap_takes_first_element() {
        // a comma smuggled after a bare scalar parses as a synthetic
        // array; only the first element survives
        assert_eq!(from_str("1,2").unwrap(), Node::Int(1));
    }

    #[rstest::rstest]
    fn test_deep_nesting_is_rejected() {
        let deep = "[".repeat(600);
        let err = from_str(&deep).unwrap_err();
        assert!(matches!(
            err,
            Error::Lexer {
                code: LexCode::LevelsExceeded,
                ..
            }
        ));
    }

    #[rstest::rstest]
    fn test_from_slice_utf8() {
        assert_eq!(from_slice(b"[1]").unwrap()[0], Node::Int(1));
        assert!(matches!(
            from_slice(&[b'"', 0xff, b'"']).unwrap_err(),
            Error::Utf8(_)
        ));
    }

    #[rstest::rstest]
    fn test_number_shapes() {
        assert_eq!(from_str("0").unwrap(), Node::Int(0));
        assert_eq!(from_str("-0").unwrap(), Node::Int(0));
        assert_eq!(from_str("1e3").unwrap(), Node::Double(1000.0));
        assert_eq!(from_str("2.5E-2").unwrap(), Node::Double(0.025));

        for bad in ["1e", "-", "1.2.3", "1e999", "1e-999"] {
            let err = from_str(bad).unwrap_err();
            assert!(
                matches!(
                    err,
                    Error::Lexer {
                        code: LexCode::InvalidNumber,
                        ..
                    }
                ),
                "{bad} should be a numeric range error, got {err}"
            );
        }
    }
}
