//! Error types for urlshort core.

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors that can occur while building or validating domain values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// A custom short code is empty or contains characters other than
    /// ASCII letters, digits and hyphens.
    #[error("invalid short code: {0:?}")]
    InvalidCode(String),

    /// The long URL is not an absolute `http`/`https` URL.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// A stored timestamp could not be parsed.
    #[error("invalid timestamp: {0}")]
    Timestamp(String),
}
