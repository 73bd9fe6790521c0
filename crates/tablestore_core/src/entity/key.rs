//! Entity key types.

use std::fmt;
use tablestore_codec::Value;

/// A value that can identify an entity.
///
/// The key is stored under the entity's key attribute and must map to a
/// scalar attribute type the table accepts (`S` for text, `N` for
/// integers).
///
/// Generated identifiers such as UUIDs are stored in their hyphenated
/// string form, so use `String` for them.
pub trait ItemKey: Clone + Eq + fmt::Debug + Send + Sync + 'static {
    /// Converts the key to its attribute value.
    fn to_value(&self) -> Value;

    /// Returns true if the key has not been assigned.
    fn is_unset(&self) -> bool {
        false
    }
}

impl ItemKey for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }

    fn is_unset(&self) -> bool {
        self.is_empty()
    }
}

impl ItemKey for i64 {
    fn to_value(&self) -> Value {
        Value::Integer(*self)
    }
}

impl ItemKey for i32 {
    fn to_value(&self) -> Value {
        Value::Integer(i64::from(*self))
    }
}

impl ItemKey for u32 {
    fn to_value(&self) -> Value {
        Value::Integer(i64::from(*self))
    }
}
