//! Error types for lfucache

use thiserror::Error;

/// Result type alias for cache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error returned by a value producer
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error types for cache operations
#[derive(Debug, Error)]
pub enum Error {
    /// Argument outside its accepted range (e.g. zero capacity)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Key not found
    #[error("Key not found")]
    NotFound,

    /// Value producer failed; nothing was inserted
    #[error("Value producer failed: {0}")]
    CallbackFailed(#[source] BoxError),
}

impl Error {
    pub(crate) fn zero_capacity() -> Self {
        Error::InvalidArgument("Capacity should be a positive integer".to_string())
    }
}
