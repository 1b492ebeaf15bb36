//! Error types for the encryption layer.

use thiserror::Error;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur in cryptographic operations.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Encryption failed (serialization or cipher failure). The record must
    /// be treated as unsaved.
    #[error("encryption failed: {0}")]
    Encryption(String),

    /// Decryption failed: malformed envelope, non-matching key, or the
    /// recovered bytes were not valid JSON. Expected and common when
    /// probing candidate keys.
    #[error("decryption failed: {0}")]
    Decryption(String),

    /// Persisted key material could not be rehydrated.
    #[error("invalid key material: {0}")]
    InvalidKey(String),
}
