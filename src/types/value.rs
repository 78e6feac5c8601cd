use std::fmt;
use std::ops::{Index, IndexMut};

use indexmap::IndexMap;

use crate::options::FormatOptions;

/// Dictionary payload. Insertion-ordered; assigning an existing key
/// replaces the value and keeps the key's original position.
pub type Object = IndexMap<String, Node>;

/// One JSON value. Integers and doubles are distinct variants and stay
/// whatever the parse (or the caller) made them; nothing in the crate
/// narrows one into the other.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Node {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
    Array(Vec<Node>),
    Dict(Object),
}

impl Node {
    pub const fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    pub const fn is_bool(&self) -> bool {
        matches!(self, Node::Bool(_))
    }

    pub const fn is_int(&self) -> bool {
        matches!(self, Node::Int(_))
    }

    pub const fn is_double(&self) -> bool {
        matches!(self, Node::Double(_))
    }

    pub const fn is_string(&self) -> bool {
        matches!(self, Node::String(_))
    }

    pub const fn is_array(&self) -> bool {
        matches!(self, Node::Array(_))
    }

    pub const fn is_dict(&self) -> bool {
        matches!(self, Node::Dict(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Node::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Node::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric value as a double; integers widen, doubles pass through.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Node::Int(i) => Some(*i as f64),
            Node::Double(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Node>> {
        match self {
            Node::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&Object> {
        match self {
            Node::Dict(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_dict_mut(&mut self) -> Option<&mut Object> {
        match self {
            Node::Dict(map) => Some(map),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Dict(map) => map.get(key),
            _ => None,
        }
    }

    pub fn get_index(&self, index: usize) -> Option<&Node> {
        match self {
            Node::Array(items) => items.get(index),
            _ => None,
        }
    }

    /// Replace `self` with `Null` and return the previous value.
    pub fn take(&mut self) -> Node {
        std::mem::take(self)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Null => "null",
            Node::Bool(_) => "boolean",
            Node::Int(_) => "integer",
            Node::Double(_) => "double",
            Node::String(_) => "string",
            Node::Array(_) => "array",
            Node::Dict(_) => "dict",
        }
    }
}

impl fmt::Display for Node {
    /// Compact JSON, all three format strings empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::encode::to_string_with_options(
            self,
            &FormatOptions::default(),
        ))
    }
}

impl Index<usize> for Node {
    type Output = Node;

    fn index(&self, index: usize) -> &Self::Output {
        match self {
            Node::Array(items) => items.get(index).unwrap_or_else(|| {
                panic!(
                    "index {index} out of bounds for array of length {}",
                    items.len()
                )
            }),
            _ => panic!(
                "cannot index into non-array value of type {}",
                self.type_name()
            ),
        }
    }
}

impl IndexMut<usize> for Node {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match self {
            Node::Array(items) => {
                let len = items.len();
                items.get_mut(index).unwrap_or_else(|| {
                    panic!("index {index} out of bounds for array of length {len}")
                })
            }
            _ => panic!(
                "cannot index into non-array value of type {}",
                self.type_name()
            ),
        }
    }
}

impl Index<&str> for Node {
    type Output = Node;

    fn index(&self, key: &str) -> &Self::Output {
        match self {
            Node::Dict(map) => map.get(key).unwrap_or_else(|| {
                panic!("key '{key}' not found in dict with {} entries", map.len())
            }),
            _ => panic!(
                "cannot index into non-dict value of type {}",
                self.type_name()
            ),
        }
    }
}

impl IndexMut<&str> for Node {
    fn index_mut(&mut self, key: &str) -> &mut Self::Output {
        match self {
            Node::Dict(map) => {
                let len = map.len();
                map.get_mut(key)
                    .unwrap_or_else(|| panic!("key '{key}' not found in dict with {len} entries"))
            }
            _ => panic!(
                "cannot index into non-dict value of type {}",
                self.type_name()
            ),
        }
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Node::Bool(value)
    }
}

impl From<i8> for Node {
    fn from(value: i8) -> Self {
        Node::Int(value as i64)
    }
}

impl From<i16> for Node {
    fn from(value: i16) -> Self {
        Node::Int(value as i64)
    }
}

impl From<i32> for Node {
    fn from(value: i32) -> Self {
        Node::Int(value as i64)
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Node::Int(value)
    }
}

impl From<u8> for Node {
    fn from(value: u8) -> Self {
        Node::Int(value as i64)
    }
}

impl From<u16> for Node {
    fn from(value: u16) -> Self {
        Node::Int(value as i64)
    }
}

impl From<u32> for Node {
    fn from(value: u32) -> Self {
        Node::Int(value as i64)
    }
}

impl From<f32> for Node {
    fn from(value: f32) -> Self {
        Node::Double(value as f64)
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Node::Double(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::String(value.to_owned())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::String(value)
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Self {
        Node::Array(items)
    }
}

impl From<Object> for Node {
    fn from(map: Object) -> Self {
        Node::Dict(map)
    }
}

impl FromIterator<Node> for Node {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        Node::Array(iter.into_iter().collect())
    }
}

impl FromIterator<(String, Node)> for Node {
    fn from_iter<I: IntoIterator<Item = (String, Node)>>(iter: I) -> Self {
        Node::Dict(iter.into_iter().collect())
    }
}

impl From<serde_json::Value> for Node {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Node::Null,
            serde_json::Value::Bool(b) => Node::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Node::Int(i)
                } else if let Some(f) = n.as_f64() {
                    // u64 beyond i64::MAX lands here and widens lossily
                    Node::Double(f)
                } else {
                    Node::Null
                }
            }
            serde_json::Value::String(s) => Node::String(s),
            serde_json::Value::Array(items) => {
                Node::Array(items.into_iter().map(Node::from).collect())
            }
            serde_json::Value::Object(map) => {
                let mut dict = Object::new();
                for (key, value) in map {
                    dict.insert(key, Node::from(value));
                }
                Node::Dict(dict)
            }
        }
    }
}

impl From<&serde_json::Value> for Node {
    fn from(value: &serde_json::Value) -> Self {
        value.clone().into()
    }
}

impl From<Node> for serde_json::Value {
    fn from(node: Node) -> Self {
        match node {
            Node::Null => serde_json::Value::Null,
            Node::Bool(b) => serde_json::Value::Bool(b),
            Node::Int(i) => serde_json::Value::Number(i.into()),
            Node::Double(f) => serde_json::Number::from_f64(f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Node::String(s) => serde_json::Value::String(s),
            Node::Array(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            Node::Dict(map) => {
                let mut object = serde_json::Map::new();
                for (key, value) in map {
                    object.insert(key, value.into());
                }
                serde_json::Value::Object(object)
            }
        }
    }
}

impl From<&Node> for serde_json::Value {
    fn from(node: &Node) -> Self {
        node.clone().into()
    }
}

#[cfg(test)]
mod tests {
    use std::panic::{catch_unwind, AssertUnwindSafe};

    use serde_json::json;

    use super::*;

    #[rstest::rstest]
    fn test_accessors_and_take() {
        let mut map = Object::new();
        map.insert("a".to_string(), Node::Int(1));

        let mut value = Node::Dict(map);
        assert!(value.is_dict());
        assert_eq!(value.type_name(), "dict");
        assert_eq!(value.get("a").and_then(Node::as_i64), Some(1));

        value
            .as_dict_mut()
            .unwrap()
            .insert("b".to_string(), Node::from("hi"));
        assert_eq!(value.get("b").and_then(Node::as_str), Some("hi"));

        let mut arr = Node::Array(vec![Node::Bool(true)]);
        assert!(arr.is_array());
        arr.as_array_mut().unwrap().push(Node::Null);
        assert_eq!(arr.as_array().unwrap().len(), 2);
        assert_eq!(arr.get_index(1), Some(&Node::Null));

        let mut taken = Node::from("take");
        let prior = taken.take();
        assert!(taken.is_null());
        assert_eq!(prior.as_str(), Some("take"));
    }

    #[rstest::rstest]
    fn test_numeric_accessors_stay_typed() {
        let int = Node::Int(7);
        assert!(int.is_int());
        assert!(!int.is_double());
        assert_eq!(int.as_i64(), Some(7));
        assert_eq!(int.as_f64(), Some(7.0));

        let double = Node::Double(7.0);
        assert!(double.is_double());
        assert!(!double.is_int());
        assert_eq!(double.as_i64(), None);
        assert_eq!(double.as_f64(), Some(7.0));
    }

    #[rstest::rstest]
    fn test_indexing() {
        let mut arr = Node::Array(vec![Node::Int(1), Node::Null]);
        assert_eq!(arr[0].as_i64(), Some(1));
        arr[1] = Node::Bool(true);
        assert_eq!(arr[1].as_bool(), Some(true));

        let mut map = Object::new();
        map.insert("key".to_string(), Node::Bool(false));
        let mut value = Node::Dict(map);

        assert_eq!(value["key"].as_bool(), Some(false));
        value["key"] = Node::Bool(true);
        assert_eq!(value["key"].as_bool(), Some(true));
    }

    #[rstest::rstest]
    fn test_indexing_panics() {
        let value = Node::Null;
        assert!(catch_unwind(AssertUnwindSafe(|| {
            let _ = &value["missing"];
        }))
        .is_err());

        let empty = Node::Array(Vec::new());
        assert!(catch_unwind(AssertUnwindSafe(|| {
            let _ = &empty[1];
        }))
        .is_err());

        let empty = Node::Dict(Object::new());
        assert!(catch_unwind(AssertUnwindSafe(|| {
            let _ = &empty["absent"];
        }))
        .is_err());
    }

    #[rstest::rstest]
    fn test_duplicate_key_assignment_overwrites_in_place() {
        let mut map = Object::new();
        map.insert("a".to_string(), Node::Int(1));
        map.insert("b".to_string(), Node::Int(2));
        map.insert("a".to_string(), Node::Int(3));

        assert_eq!(map.len(), 2);
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(map["a"], Node::Int(3));
    }

    #[rstest::rstest]
    fn test_serde_json_conversions() {
        let json_value = json!({"a": [1, 2], "b": {"c": true}, "d": 1.5});
        let node = Node::from(json_value.clone());
        assert_eq!(node["a"][0], Node::Int(1));
        assert_eq!(node["d"], Node::Double(1.5));

        let roundtrip: serde_json::Value = node.into();
        assert_eq!(roundtrip, json_value);

        let nan: serde_json::Value = Node::Double(f64::NAN).into();
        assert_eq!(nan, json!(null));
    }

    #[rstest::rstest]
    fn test_from_iterators() {
        let arr: Node = [1i64, 2, 3].into_iter().map(Node::from).collect();
        assert_eq!(arr.as_array().map(Vec::len), Some(3));

        let dict: Node = [("k".to_string(), Node::from(true))].into_iter().collect();
        assert_eq!(dict["k"].as_bool(), Some(true));
    }
}
