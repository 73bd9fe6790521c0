//! Error types for tablestore core.

use tablestore_client::ClientError;
use tablestore_codec::CodecError;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in typed store and table manager operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Backing store failure, passed through unchanged.
    #[error(transparent)]
    Backend(#[from] ClientError),

    /// The entity's key is not present in the table.
    #[error("item not found: key {key} in table {table}")]
    ItemNotFound {
        /// Table searched.
        table: String,
        /// Rendered key.
        key: String,
    },

    /// The entity's key is unset.
    #[error("invalid key: attribute {attribute} is unset")]
    InvalidKey {
        /// Key attribute name.
        attribute: String,
    },

    /// The serialized item does not carry the entity's key.
    #[error("key mismatch: serialized attribute {attribute} differs from the entity key")]
    KeyMismatch {
        /// Key attribute name.
        attribute: String,
    },

    /// A table definition failed validation.
    #[error("invalid table definition: {message}")]
    InvalidDefinition {
        /// Description of the problem.
        message: String,
    },

    /// Entity conversion failed.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
}

impl CoreError {
    /// Creates an item-not-found error.
    pub fn item_not_found(table: impl Into<String>, key: impl Into<String>) -> Self {
        Self::ItemNotFound {
            table: table.into(),
            key: key.into(),
        }
    }

    /// Creates an invalid-definition error.
    pub fn invalid_definition(message: impl Into<String>) -> Self {
        Self::InvalidDefinition {
            message: message.into(),
        }
    }

    /// Returns true if this is an item-not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CoreError::ItemNotFound { .. })
    }

    /// Returns true if the underlying backend failure can be retried.
    pub fn is_retryable(&self) -> bool {
        self.backend().is_some_and(ClientError::is_retryable)
    }

    /// The backend error, if this is one.
    pub fn backend(&self) -> Option<&ClientError> {
        match self {
            CoreError::Backend(e) => Some(e),
            _ => None,
        }
    }
}
