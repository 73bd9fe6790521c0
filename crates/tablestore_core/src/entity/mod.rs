//! Entity contract for typed stores.

mod key;

pub use key::ItemKey;

use crate::error::{CoreError, CoreResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tablestore_codec::Item;

/// Trait for types that can be stored in a [`DataStore`](crate::DataStore).
///
/// Implementors are serde types whose serialized form carries the key
/// under [`KEY_ATTRIBUTE`](Self::KEY_ATTRIBUTE). Attribute names are the
/// serialized field names, so use `#[serde(rename)]` or
/// `#[serde(rename_all)]` to match an existing table's naming.
///
/// # Example
///
/// ```
/// use serde::{Deserialize, Serialize};
/// use tablestore_core::PersistentItem;
///
/// #[derive(Serialize, Deserialize)]
/// #[serde(rename_all = "PascalCase")]
/// struct Widget {
///     id: String,
///     color: String,
/// }
///
/// impl PersistentItem for Widget {
///     type Key = String;
///
///     fn key(&self) -> String {
///         self.id.clone()
///     }
/// }
///
/// assert_eq!(Widget::KEY_ATTRIBUTE, "Id");
/// ```
pub trait PersistentItem: Serialize + DeserializeOwned + Send + Sync {
    /// The key type.
    type Key: ItemKey;

    /// Attribute holding the key in the serialized item.
    const KEY_ATTRIBUTE: &'static str = "Id";

    /// Returns the entity's key.
    fn key(&self) -> Self::Key;
}

/// Serializes an entity, checking that its key is set and serialized under
/// the key attribute.
pub(crate) fn to_item<T: PersistentItem>(entity: &T) -> CoreResult<Item> {
    let key = entity.key();
    check_key_set::<T>(&key)?;

    let item = tablestore_codec::to_item(entity)?;
    if item.get(T::KEY_ATTRIBUTE) != Some(&key.to_value()) {
        return Err(CoreError::KeyMismatch {
            attribute: T::KEY_ATTRIBUTE.to_string(),
        });
    }
    Ok(item)
}

/// Builds the key item the client addresses an entity by.
pub(crate) fn key_item<T: PersistentItem>(key: &T::Key) -> CoreResult<Item> {
    check_key_set::<T>(key)?;
    Ok(Item::new().with(T::KEY_ATTRIBUTE, key.to_value()))
}

pub(crate) fn from_item<T: PersistentItem>(item: Item) -> CoreResult<T> {
    Ok(tablestore_codec::from_item(item)?)
}

fn check_key_set<T: PersistentItem>(key: &T::Key) -> CoreResult<()> {
    if key.is_unset() {
        return Err(CoreError::InvalidKey {
            attribute: T::KEY_ATTRIBUTE.to_string(),
        });
    }
    Ok(())
}
