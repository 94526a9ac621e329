//! Raw hardware-tree nodes
//!
//! The enumeration tool emits loosely typed JSON: the same attribute may be a
//! string on one OS release and a number on the next, and children hang off
//! one of several keys. [`NodeValue`] captures every shape a value can take so
//! readers match on it exhaustively instead of probing with casts.

use serde_json::{Number, Value};
use std::collections::BTreeMap;

/// A single attribute value inside a [`RawNode`]
#[derive(Debug, Clone, PartialEq)]
pub enum NodeValue {
    /// JSON `null`
    Null,
    /// JSON boolean
    Bool(bool),
    /// JSON number (integer or float)
    Number(Number),
    /// JSON string
    Text(String),
    /// Ordered JSON array
    List(Vec<NodeValue>),
    /// Nested JSON object
    Node(RawNode),
}

impl NodeValue {
    /// String view of the value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            NodeValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// List view of the value
    pub fn as_list(&self) -> Option<&[NodeValue]> {
        match self {
            NodeValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Nested-node view of the value
    pub fn as_node(&self) -> Option<&RawNode> {
        match self {
            NodeValue::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, NodeValue::Null)
    }

    /// Render a scalar as text
    ///
    /// Non-empty strings are returned as-is and numbers are stringified
    /// (whole floats lose their fraction, so `500.0` becomes `"500"`).
    /// Empty strings and non-scalar values yield `None`.
    pub fn scalar_text(&self) -> Option<String> {
        match self {
            NodeValue::Text(s) if !s.is_empty() => Some(s.clone()),
            NodeValue::Number(n) => Some(format_number(n)),
            NodeValue::Text(_)
            | NodeValue::Null
            | NodeValue::Bool(_)
            | NodeValue::List(_)
            | NodeValue::Node(_) => None,
        }
    }
}

fn format_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => {
            format!("{}", f as i64)
        }
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

impl From<Value> for NodeValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => NodeValue::Null,
            Value::Bool(b) => NodeValue::Bool(b),
            Value::Number(n) => NodeValue::Number(n),
            Value::String(s) => NodeValue::Text(s),
            Value::Array(items) => {
                NodeValue::List(items.into_iter().map(NodeValue::from).collect())
            }
            Value::Object(map) => NodeValue::Node(RawNode {
                fields: map
                    .into_iter()
                    .map(|(k, v)| (k, NodeValue::from(v)))
                    .collect(),
            }),
        }
    }
}

impl From<&str> for NodeValue {
    fn from(s: &str) -> Self {
        NodeValue::Text(s.to_string())
    }
}

impl From<String> for NodeValue {
    fn from(s: String) -> Self {
        NodeValue::Text(s)
    }
}

impl From<i64> for NodeValue {
    fn from(n: i64) -> Self {
        NodeValue::Number(Number::from(n))
    }
}

impl From<i32> for NodeValue {
    fn from(n: i32) -> Self {
        NodeValue::Number(Number::from(n))
    }
}

impl From<u32> for NodeValue {
    fn from(n: u32) -> Self {
        NodeValue::Number(Number::from(n))
    }
}

impl From<bool> for NodeValue {
    fn from(b: bool) -> Self {
        NodeValue::Bool(b)
    }
}

impl From<RawNode> for NodeValue {
    fn from(node: RawNode) -> Self {
        NodeValue::Node(node)
    }
}

impl<T: Into<NodeValue>> From<Vec<T>> for NodeValue {
    fn from(items: Vec<T>) -> Self {
        NodeValue::List(items.into_iter().map(Into::into).collect())
    }
}

/// One entry of the hardware tree
///
/// A read-only mapping from attribute names to [`NodeValue`]s. Keys are kept
/// sorted so `Debug` output is stable between runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawNode {
    fields: BTreeMap<String, NodeValue>,
}

impl RawNode {
    /// Create an empty node
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert a JSON value into a node
    ///
    /// Returns `None` unless the value is a JSON object.
    pub fn from_json(value: Value) -> Option<Self> {
        match NodeValue::from(value) {
            NodeValue::Node(node) => Some(node),
            _ => None,
        }
    }

    /// Builder-style insert, mostly used to assemble fixtures
    pub fn with(mut self, key: impl Into<String>, value: impl Into<NodeValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Look up an attribute by exact key
    pub fn get(&self, key: &str) -> Option<&NodeValue> {
        self.fields.get(key)
    }

    /// Whether the key is present with a non-null value
    pub fn contains(&self, key: &str) -> bool {
        self.fields.get(key).is_some_and(|v| !v.is_null())
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_object() {
        let node = RawNode::from_json(json!({
            "_name": "Hub",
            "vendor_id": 1452,
            "_items": [{ "_name": "Child" }]
        }))
        .unwrap();

        assert_eq!(node.get("_name").and_then(NodeValue::as_str), Some("Hub"));
        assert!(matches!(node.get("vendor_id"), Some(NodeValue::Number(_))));
        let children = node.get("_items").and_then(NodeValue::as_list).unwrap();
        assert_eq!(children.len(), 1);
        assert!(children[0].as_node().is_some());
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        assert!(RawNode::from_json(json!([1, 2, 3])).is_none());
        assert!(RawNode::from_json(json!("text")).is_none());
    }

    #[test]
    fn test_scalar_text() {
        assert_eq!(NodeValue::from("abc").scalar_text().as_deref(), Some("abc"));
        assert_eq!(NodeValue::from("").scalar_text(), None);
        assert_eq!(NodeValue::from(500).scalar_text().as_deref(), Some("500"));
        assert_eq!(NodeValue::from(true).scalar_text(), None);
        assert_eq!(NodeValue::Null.scalar_text(), None);
    }

    #[test]
    fn test_scalar_text_floats() {
        let whole = NodeValue::from(json!(500.0));
        assert_eq!(whole.scalar_text().as_deref(), Some("500"));

        let half = NodeValue::from(json!(0.5));
        assert_eq!(half.scalar_text().as_deref(), Some("0.5"));
    }

    #[test]
    fn test_contains_ignores_null() {
        let node = RawNode::new()
            .with("present", "x")
            .with("nothing", NodeValue::Null);

        assert!(node.contains("present"));
        assert!(!node.contains("nothing"));
        assert!(!node.contains("missing"));
    }
}
