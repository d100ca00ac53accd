//! Error types for urlshort storage.

use urlshort_core::CoreError;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The short code is already taken (unique constraint violation).
    #[error("short code already exists: {code}")]
    Conflict {
        /// The code that collided.
        code: String,
    },

    /// Database operation failed (unavailable, corrupt, I/O).
    #[error("database error: {0}")]
    Database(String),

    /// A stored row could not be decoded into a domain value.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<CoreError> for StoreError {
    fn from(err: CoreError) -> Self {
        Self::Serialization(err.to_string())
    }
}
