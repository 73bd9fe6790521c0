//! Error types for the codec crate.

use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while converting between entities, items and bytes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Serializing an entity into an attribute tree failed.
    #[error("serialization failed: {message}")]
    Serialize {
        /// Description of the serializer error.
        message: String,
    },

    /// Deserializing an entity from an item failed.
    #[error("deserialization failed: {message}")]
    Deserialize {
        /// Description of the deserializer error.
        message: String,
    },

    /// Float values have no attribute representation.
    #[error("float values are not supported as attribute values")]
    FloatForbidden,

    /// Integer does not fit into the signed 64-bit attribute range.
    #[error("integer overflow")]
    IntegerOverflow,

    /// The serialized entity was not a map of attributes.
    #[error("expected an attribute map, found {found}")]
    NotAMap {
        /// Type name of the value that was found instead.
        found: &'static str,
    },

    /// Unsupported serde data model construct.
    #[error("unsupported value type: {type_name}")]
    UnsupportedType {
        /// Name of the unsupported type.
        type_name: String,
    },
}

impl CodecError {
    /// Create a serialization error.
    pub fn serialize(message: impl Into<String>) -> Self {
        Self::Serialize {
            message: message.into(),
        }
    }

    /// Create a deserialization error.
    pub fn deserialize(message: impl Into<String>) -> Self {
        Self::Deserialize {
            message: message.into(),
        }
    }

    /// Create an unsupported type error.
    pub fn unsupported_type(type_name: impl Into<String>) -> Self {
        Self::UnsupportedType {
            type_name: type_name.into(),
        }
    }
}
