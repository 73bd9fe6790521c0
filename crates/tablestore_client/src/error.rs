//! Error types for backing store clients.

use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors a backing store client can surface.
///
/// These mirror the failure classes of the managed service: callers above
/// the client receive them unchanged so they can apply their own retry
/// policy.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The named table does not exist.
    #[error("requested resource not found: table {table}")]
    ResourceNotFound {
        /// Table name.
        table: String,
    },

    /// The named table already exists or is busy.
    #[error("resource in use: table {table}")]
    ResourceInUse {
        /// Table name.
        table: String,
    },

    /// The request was malformed.
    #[error("validation error: {message}")]
    Validation {
        /// Description of what was invalid.
        message: String,
    },

    /// A conditional write found its condition false.
    #[error("the conditional request failed")]
    ConditionalCheckFailed,

    /// The item exceeds the maximum item size.
    #[error("item size {size} exceeds maximum of {max} bytes")]
    ItemTooLarge {
        /// Encoded size of the rejected item.
        size: usize,
        /// Maximum allowed size.
        max: usize,
    },

    /// The request rate exceeded provisioned throughput.
    #[error("throughput exceeded: {message}")]
    Throttled {
        /// Message from the backend.
        message: String,
    },

    /// Network or transport failure.
    #[error("transport error: {message}")]
    Transport {
        /// Error message.
        message: String,
        /// Whether the request can be retried.
        retryable: bool,
    },

    /// Item conversion failed inside the client.
    #[error("codec error: {0}")]
    Codec(#[from] tablestore_codec::CodecError),
}

impl ClientError {
    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a resource-not-found error.
    pub fn resource_not_found(table: impl Into<String>) -> Self {
        Self::ResourceNotFound {
            table: table.into(),
        }
    }

    /// Creates a resource-in-use error.
    pub fn resource_in_use(table: impl Into<String>) -> Self {
        Self::ResourceInUse {
            table: table.into(),
        }
    }

    /// Creates a retryable transport error.
    pub fn transport_retryable(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            retryable: true,
        }
    }

    /// Creates a non-retryable transport error.
    pub fn transport_fatal(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            retryable: false,
        }
    }

    /// Returns true if this error can be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Transport { retryable, .. } => *retryable,
            ClientError::Throttled { .. } => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_errors() {
        assert!(ClientError::transport_retryable("connection reset").is_retryable());
        assert!(!ClientError::transport_fatal("bad certificate").is_retryable());
        assert!(ClientError::Throttled {
            message: "slow down".into()
        }
        .is_retryable());
        assert!(!ClientError::ConditionalCheckFailed.is_retryable());
        assert!(!ClientError::validation("bad key").is_retryable());
    }

    #[test]
    fn error_display() {
        let err = ClientError::resource_not_found("Widgets");
        assert_eq!(
            err.to_string(),
            "requested resource not found: table Widgets"
        );

        let err = ClientError::ItemTooLarge {
            size: 500_000,
            max: 409_600,
        };
        assert!(err.to_string().contains("500000"));
    }
}
