//! Error types for port operations.

/// Repository operation errors with context for debugging.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// Underlying storage failed or timed out - includes operation name for tracing.
    #[error("Storage unavailable in {operation}: {message}")]
    StorageUnavailable {
        operation: &'static str,
        message: String,
    },

    /// Serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A conditional write found the record changed since it was read.
    #[error("Concurrent modification of {namespace}/{key}")]
    Conflict { namespace: &'static str, key: String },
}

impl RepoError {
    /// Create a StorageUnavailable error with operation context.
    pub fn unavailable(operation: &'static str, message: impl ToString) -> Self {
        Self::StorageUnavailable {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a Serialization error.
    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }

    /// Create a Conflict error.
    pub fn conflict(namespace: &'static str, key: impl ToString) -> Self {
        Self::Conflict {
            namespace,
            key: key.to_string(),
        }
    }
}
