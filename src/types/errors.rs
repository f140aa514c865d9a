//! Application error types.
//!
//! All errors use `thiserror` for automatic Error trait derivation. Most of
//! the crate swallows storage and host failures by policy, so these mostly
//! surface at the ports and at typed input construction.

use thiserror::Error;

/// Application result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error enum for toolhub.
#[derive(Error, Debug)]
pub enum Error {
    /// Input failed validation (missing or mistyped tool field, bad config).
    #[error("validation error: {0}")]
    Validation(String),

    /// Storage backend refused a read or write.
    #[error("storage error: {0}")]
    Storage(String),

    /// Host could not open a browsing context.
    #[error("open failed: {0}")]
    Open(String),

    /// Internal errors (poisoned locks, joined tasks that panicked).
    #[error("internal error: {0}")]
    Internal(String),

    /// Serialization/deserialization errors.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O errors.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

// Convenience constructors
impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn open(msg: impl Into<String>) -> Self {
        Self::Open(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
