//! Error types for the key persistence layer.

use thiserror::Error;

/// Result type for key store operations.
pub type KeyStoreResult<T> = Result<T, KeyStoreError>;

/// Errors from the key persistence layer.
#[derive(Debug, Error)]
pub enum KeyStoreError {
    /// The underlying persistence surface failed.
    #[error("key store failure: {0}")]
    Storage(String),
}
