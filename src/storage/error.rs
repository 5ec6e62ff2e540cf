//! Storage error types

use thiserror::Error;

/// Errors raised by a [`super::KeyValueStore`] backend
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage file is not a valid key-value document: {0}")]
    Json(#[from] serde_json::Error),
}
