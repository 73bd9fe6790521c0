//! Dynamic attribute value type.

use std::cmp::Ordering;
use std::collections::BTreeMap;

/// A single attribute value stored in an item.
///
/// Floats are intentionally not representable: numbers are signed 64-bit
/// integers so that every value has exactly one canonical encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Explicit null.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed integer.
    Integer(i64),
    /// Binary value.
    Bytes(Vec<u8>),
    /// UTF-8 text.
    Text(String),
    /// Ordered list of values.
    List(Vec<Value>),
    /// Nested attribute map.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Short name of this value's type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Integer(_) => "integer",
            Value::Bytes(_) => "bytes",
            Value::Text(_) => "text",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    /// Compares two scalar values of the same type.
    ///
    /// Integers compare numerically, text and bytes compare bytewise.
    /// Returns `None` for mismatched types and for non-scalar values.
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
            (Value::Text(a), Value::Text(b)) => Some(a.as_bytes().cmp(b.as_bytes())),
            (Value::Bytes(a), Value::Bytes(b)) => Some(a.cmp(b)),
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Returns true if `needle` is a substring (text), a contiguous
    /// subsequence (bytes) or an element (list) of this value.
    pub fn contains(&self, needle: &Value) -> bool {
        match (self, needle) {
            (Value::Text(haystack), Value::Text(n)) => haystack.contains(n.as_str()),
            (Value::Bytes(haystack), Value::Bytes(n)) => {
                n.is_empty() || haystack.windows(n.len()).any(|w| w == n.as_slice())
            }
            (Value::List(items), n) => items.contains(n),
            _ => false,
        }
    }

    /// Returns true if this text or bytes value starts with `prefix`.
    pub fn begins_with(&self, prefix: &Value) -> bool {
        match (self, prefix) {
            (Value::Text(s), Value::Text(p)) => s.starts_with(p.as_str()),
            (Value::Bytes(b), Value::Bytes(p)) => b.starts_with(p),
            _ => false,
        }
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get this value as a boolean, if it is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get this value as an integer, if it is one.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Get this value as bytes, if it is binary.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Get this value as a string, if it is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get this value as a list, if it is one.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    /// Get this value as a map, if it is one.
    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Look up a key in this map value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map().and_then(|m| m.get(key))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(i64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Integer(i64::from(n))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(b)
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::Bytes(b.to_vec())
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Value::Null
    }
}
