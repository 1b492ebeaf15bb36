//! Client-side encryption primitives for Ledgerly.
//!
//! The server stores only opaque ciphertext; everything here runs on the
//! client. Provides:
//! - PBKDF2 key derivation from a passphrase and a stable per-account salt
//! - The record envelope codec (AES-256-CBC + PKCS#7, fresh IV per call)
//! - The advisory passphrase strength policy
//!
//! All operations are synchronous, side-effect-free functions: no I/O, and
//! nothing here ever logs key material, plaintext, or passphrases.

mod envelope;
mod error;
mod key;
mod password;

pub use envelope::{IV_SIZE, decrypt, decrypt_as, decrypt_batch, encrypt, encrypt_batch};
pub use error::{CryptoError, CryptoResult};
pub use key::{DerivedKey, KEY_SIZE, KdfParams, derive_key};
pub use password::{MIN_PASSPHRASE_LEN, PasswordCheck, validate_password};
