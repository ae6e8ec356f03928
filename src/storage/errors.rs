//! Storage errors.

use std::io;

use thiserror::Error;

/// Errors raised by a key-value store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing files failed.
    #[error("storage io error")]
    Io(#[from] io::Error),

    /// The cart could not be serialized.
    #[error("failed to encode cart snapshot")]
    Encode(#[source] serde_json::Error),

    /// Any other backend failure.
    #[error("storage backend error: {0}")]
    Backend(String),
}
