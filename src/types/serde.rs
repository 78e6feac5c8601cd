//! Serde integration for [`Node`], so trees can cross into any serde
//! format (and `serde_json` fixtures can deserialize straight into
//! them in tests).

use std::fmt;

use serde::de::{Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, Serializer};

use super::value::{Node, Object};

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Null => serializer.serialize_unit(),
            Node::Bool(b) => serializer.serialize_bool(*b),
            Node::Int(i) => serializer.serialize_i64(*i),
            Node::Double(f) => serializer.serialize_f64(*f),
            Node::String(s) => serializer.serialize_str(s),
            Node::Array(items) => serializer.collect_seq(items),
            Node::Dict(map) => serializer.collect_map(map),
        }
    }
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = Node;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("any valid JSON value")
    }

    fn visit_unit<E>(self) -> Result<Node, E> {
        Ok(Node::Null)
    }

    fn visit_none<E>(self) -> Result<Node, E> {
        Ok(Node::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Node, D::Error> {
        Deserialize::deserialize(deserializer)
    }

    fn visit_bool<E>(self, value: bool) -> Result<Node, E> {
        Ok(Node::Bool(value))
    }

    fn visit_i64<E>(self, value: i64) -> Result<Node, E> {
        Ok(Node::Int(value))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Node, E> {
        Ok(match i64::try_from(value) {
            Ok(i) => Node::Int(i),
            Err(_) => Node::Double(value as f64),
        })
    }

    fn visit_f64<E>(self, value: f64) -> Result<Node, E> {
        Ok(Node::Double(value))
    }

    fn visit_str<E>(self, value: &str) -> Result<Node, E> {
        Ok(Node::String(value.to_owned()))
    }

    fn visit_string<E>(self, value: String) -> Result<Node, E> {
        Ok(Node::String(value))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Node, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Node::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Node, A::Error> {
        let mut dict = Object::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, Node>()? {
            dict.insert(key, value);
        }
        Ok(Node::Dict(dict))
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Node, D::Error> {
        deserializer.deserialize_any(NodeVisitor)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[rstest::rstest]
    fn test_deserialize_from_json_value() {
        let node: Node = serde_json::from_value(json!({
            "name": "deep thought",
            "answer": 42,
            "ratio": 0.5,
            "tags": ["a", null, true],
        }))
        .unwrap();

        assert_eq!(node["name"].as_str(), Some("deep thought"));
        assert_eq!(node["answer"], Node::Int(42));
        assert_eq!(node["ratio"], Node::Double(0.5));
        assert_eq!(node["tags"][1], Node::Null);
    }

    #[rstest::rstest]
    fn test_serialize_to_json_value() {
        let node: Node = [
            ("a".to_string(), Node::Int(1)),
            ("b".to_string(), Node::Array(vec![Node::Null, Node::from("x")])),
        ]
        .into_iter()
        .collect();

        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value, json!({"a": 1, "b": [null, "x"]}));
    }

    #[rstest::rstest]
    fn test_u64_overflow_widens() {
        let node: Node = serde_json::from_value(json!(u64::MAX)).unwrap();
        assert_eq!(node, Node::Double(u64::MAX as f64));
    }
}
