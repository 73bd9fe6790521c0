//! Serde bridge between entities and items.
//!
//! Entities are serialized through ciborium's dynamic value model and then
//! narrowed into [`Value`]. The narrowing rejects floats and integers
//! outside the signed 64-bit range, and requires text map keys.

use crate::error::{CodecError, CodecResult};
use crate::item::Item;
use crate::value::Value;
use ciborium::value::{Integer, Value as CborValue};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Serializes an entity into an item.
///
/// # Errors
///
/// Fails if serde rejects the value, if it contains a float, or if the
/// top-level value is not a struct or map.
pub fn to_item<T: Serialize + ?Sized>(entity: &T) -> CodecResult<Item> {
    let cbor = CborValue::serialized(entity).map_err(|e| CodecError::serialize(e.to_string()))?;
    Item::from_value(from_cbor_value(cbor)?)
}

/// Deserializes an entity from an item.
///
/// # Errors
///
/// Fails if the item does not have the shape `T` expects.
pub fn from_item<T: DeserializeOwned>(item: Item) -> CodecResult<T> {
    to_cbor_value(item.into_value())
        .deserialized()
        .map_err(|e| CodecError::deserialize(e.to_string()))
}

/// Serializes any value (not only maps) into an attribute [`Value`].
///
/// # Errors
///
/// Same conditions as [`to_item`], minus the map requirement.
pub fn to_value<T: Serialize + ?Sized>(value: &T) -> CodecResult<Value> {
    let cbor = CborValue::serialized(value).map_err(|e| CodecError::serialize(e.to_string()))?;
    from_cbor_value(cbor)
}

fn from_cbor_value(value: CborValue) -> CodecResult<Value> {
    match value {
        CborValue::Null => Ok(Value::Null),
        CborValue::Bool(b) => Ok(Value::Bool(b)),
        CborValue::Integer(i) => i64::try_from(i)
            .map(Value::Integer)
            .map_err(|_| CodecError::IntegerOverflow),
        CborValue::Float(_) => Err(CodecError::FloatForbidden),
        CborValue::Bytes(b) => Ok(Value::Bytes(b)),
        CborValue::Text(s) => Ok(Value::Text(s)),
        CborValue::Tag(_, inner) => from_cbor_value(*inner),
        CborValue::Array(items) => items
            .into_iter()
            .map(from_cbor_value)
            .collect::<CodecResult<Vec<_>>>()
            .map(Value::List),
        CborValue::Map(pairs) => pairs
            .into_iter()
            .map(|(k, v)| match k {
                CborValue::Text(name) => Ok((name, from_cbor_value(v)?)),
                _ => Err(CodecError::unsupported_type("non-text map key")),
            })
            .collect::<CodecResult<_>>()
            .map(Value::Map),
        _ => Err(CodecError::unsupported_type("unknown CBOR value")),
    }
}

fn to_cbor_value(value: Value) -> CborValue {
    match value {
        Value::Null => CborValue::Null,
        Value::Bool(b) => CborValue::Bool(b),
        Value::Integer(n) => CborValue::Integer(Integer::from(n)),
        Value::Bytes(b) => CborValue::Bytes(b),
        Value::Text(s) => CborValue::Text(s),
        Value::List(items) => CborValue::Array(items.into_iter().map(to_cbor_value).collect()),
        Value::Map(entries) => CborValue::Map(
            entries
                .into_iter()
                .map(|(k, v)| (CborValue::Text(k), to_cbor_value(v)))
                .collect(),
        ),
    }
}
