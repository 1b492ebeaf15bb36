//! Key derivation and key material.
//!
//! Stretches a user passphrase into a 256-bit key with PBKDF2-HMAC-SHA256.
//! Derivation is deterministic: the same (passphrase, salt) pair re-derives
//! the identical key on any device, so the key itself is never stored
//! server-side.

use crate::error::{CryptoError, CryptoResult};
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of derived keys in bytes (256 bits for AES-256).
pub const KEY_SIZE: usize = 32;

/// Key derivation parameters.
#[derive(Clone, Debug)]
pub struct KdfParams {
    /// PBKDF2 iteration count.
    pub iterations: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        // High work factor against offline brute-force of a stolen
        // ciphertext corpus.
        Self {
            iterations: 150_000,
        }
    }
}

/// A derived encryption key with automatic zeroization on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    bytes: [u8; KEY_SIZE],
}

impl DerivedKey {
    /// Creates a key from raw bytes.
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    /// Returns the key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }

    /// Exports the key as lowercase hex for an opaque persistence slot.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    /// Rehydrates a key from its hex persistence form.
    pub fn from_hex(encoded: &str) -> CryptoResult<Self> {
        let bytes = hex::decode(encoded).map_err(|e| CryptoError::InvalidKey(e.to_string()))?;
        let bytes: [u8; KEY_SIZE] = bytes.try_into().map_err(|b: Vec<u8>| {
            CryptoError::InvalidKey(format!("expected {KEY_SIZE} bytes, got {}", b.len()))
        })?;
        Ok(Self { bytes })
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Derives an encryption key from a passphrase and a stable salt.
///
/// The salt is non-secret and user-specific (the session layer passes the
/// normalized account email), so derivation is reproducible per account
/// while key material differs across accounts.
///
/// There is no error path: any passphrase, including an empty one, yields
/// a key. Passphrase strength is the advisory policy's concern, not this
/// function's.
pub fn derive_key(passphrase: &str, salt: &str, params: &KdfParams) -> DerivedKey {
    let mut bytes = [0u8; KEY_SIZE];
    pbkdf2_hmac::<Sha256>(
        passphrase.as_bytes(),
        salt.as_bytes(),
        params.iterations,
        &mut bytes,
    );
    DerivedKey { bytes }
}
