//! # tablestore Codec
//!
//! Attribute values and items for tablestore.
//!
//! This crate provides:
//! - [`Value`], the dynamic attribute value (no floats)
//! - [`Item`], a string-keyed attribute map
//! - Canonical CBOR encoding, used for storage keys and size accounting
//! - A serde bridge ([`to_item`] / [`from_item`]) between entities and items
//!
//! ## Usage
//!
//! ```
//! use serde::{Deserialize, Serialize};
//! use tablestore_codec::{from_item, to_item, Value};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Widget {
//!     #[serde(rename = "Id")]
//!     id: String,
//!     #[serde(rename = "Color")]
//!     color: String,
//! }
//!
//! let widget = Widget { id: "w1".into(), color: "red".into() };
//! let item = to_item(&widget).unwrap();
//! assert_eq!(item.get("Color"), Some(&Value::from("red")));
//!
//! let back: Widget = from_item(item).unwrap();
//! assert_eq!(back, widget);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod convert;
mod encoder;
mod error;
mod item;
mod value;

pub use convert::{from_item, to_item, to_value};
pub use encoder::{encoded_len, to_canonical_cbor};
pub use error::{CodecError, CodecResult};
pub use item::Item;
pub use value::Value;
