//! Attribute maps.

use crate::encoder;
use crate::error::{CodecError, CodecResult};
use crate::value::Value;
use std::collections::BTreeMap;

/// A stored record: a map from attribute name to [`Value`].
///
/// Items are what backing store clients read and write. A key is also an
/// `Item`, one that carries only the table's key attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Item(BTreeMap<String, Value>);

impl Item {
    /// Creates an empty item.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an attribute, builder style.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    /// Sets an attribute, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(name.into(), value.into())
    }

    /// Returns the attribute named `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Removes an attribute.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.0.remove(name)
    }

    /// Returns true if the attribute is present (even when it holds `Null`).
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the item has no attributes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates attributes in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Returns a copy holding only the named attributes that are present.
    #[must_use]
    pub fn project<S: AsRef<str>>(&self, names: &[S]) -> Item {
        names
            .iter()
            .filter_map(|n| {
                let n = n.as_ref();
                self.0.get(n).map(|v| (n.to_string(), v.clone()))
            })
            .collect()
    }

    /// Canonical CBOR bytes of this item.
    pub fn to_canonical_cbor(&self) -> Vec<u8> {
        encoder::to_canonical_cbor(&Value::Map(self.0.clone()))
    }

    /// Size of the canonical encoding in bytes.
    pub fn encoded_len(&self) -> usize {
        let entries: usize = self
            .0
            .iter()
            .map(|(k, v)| header_len_for(k.len()) + k.len() + encoder::encoded_len(v))
            .sum();
        header_len_for(self.0.len()) + entries
    }

    /// Converts a map value into an item.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::NotAMap`] for any other value.
    pub fn from_value(value: Value) -> CodecResult<Self> {
        match value {
            Value::Map(m) => Ok(Self(m)),
            other => Err(CodecError::NotAMap {
                found: other.type_name(),
            }),
        }
    }

    /// Converts this item into a map value.
    pub fn into_value(self) -> Value {
        Value::Map(self.0)
    }

    /// Returns the underlying map.
    pub fn into_inner(self) -> BTreeMap<String, Value> {
        self.0
    }
}

/// Length headers are encoded exactly like unsigned integers.
#[allow(clippy::cast_possible_wrap)]
fn header_len_for(len: usize) -> usize {
    encoder::encoded_len(&Value::Integer(len as i64))
}

impl From<BTreeMap<String, Value>> for Item {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, Value)> for Item {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Item {
    type Item = (String, Value);
    type IntoIter = std::collections::btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> Item {
        Item::new()
            .with("Id", "w1")
            .with("Color", "red")
            .with("Size", 3i64)
    }

    #[test]
    fn builder_and_accessors() {
        let item = widget();
        assert_eq!(item.len(), 3);
        assert_eq!(item.get("Color"), Some(&Value::from("red")));
        assert!(item.contains("Size"));
        assert!(!item.contains("Weight"));
    }

    #[test]
    fn null_attribute_is_present() {
        let item = Item::new().with("Note", ());
        assert!(item.contains("Note"));
        assert_eq!(item.get("Note"), Some(&Value::Null));
    }

    #[test]
    fn project_keeps_only_named_present_attributes() {
        let projected = widget().project(&["Id", "Color", "Missing"]);
        assert_eq!(projected, Item::new().with("Id", "w1").with("Color", "red"));
    }

    #[test]
    fn encoded_len_matches_bytes() {
        let item = widget();
        assert_eq!(item.encoded_len(), item.to_canonical_cbor().len());

        let empty = Item::new();
        assert_eq!(empty.encoded_len(), empty.to_canonical_cbor().len());

        let wide: Item = (0..40)
            .map(|i| (format!("attr{i}"), Value::Integer(i)))
            .collect();
        assert_eq!(wide.encoded_len(), wide.to_canonical_cbor().len());
    }

    #[test]
    fn from_value_rejects_non_maps() {
        assert!(Item::from_value(widget().into_value()).is_ok());
        assert_eq!(
            Item::from_value(Value::Integer(1)),
            Err(CodecError::NotAMap { found: "integer" })
        );
    }
}
