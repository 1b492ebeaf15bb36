//! Record envelope codec.
//!
//! Encrypts one JSON-serializable record into a self-describing envelope:
//! JSON text `{"iv": <hex>, "data": <base64>}`, where the ciphertext is
//! AES-256-CBC with PKCS#7 padding over the record's JSON serialization.
//! A stored envelope is immutable; updating a record produces a brand-new
//! envelope.

use crate::error::{CryptoError, CryptoResult};
use crate::key::DerivedKey;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit, block_padding::Pkcs7};
use base64::{Engine, engine::general_purpose::STANDARD};
use rand::RngCore;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Size of the envelope IV in bytes.
pub const IV_SIZE: usize = 16;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Parsed form of the envelope text.
#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    /// Hex-encoded IV, fresh per encryption call.
    iv: String,
    /// Base64 ciphertext.
    data: String,
}

/// Encrypts a record into an envelope string.
///
/// Generates a fresh random 16-byte IV per call, so encrypting the same
/// record twice yields different envelopes. Fails with
/// [`CryptoError::Encryption`] when the record cannot be serialized; the
/// caller must treat the record as unsaved.
pub fn encrypt<T: Serialize>(record: &T, key: &DerivedKey) -> CryptoResult<String> {
    let plaintext =
        serde_json::to_vec(record).map_err(|e| CryptoError::Encryption(e.to_string()))?;

    let mut iv = [0u8; IV_SIZE];
    rand::rngs::OsRng.fill_bytes(&mut iv);

    let ciphertext = Aes256CbcEnc::new(key.as_bytes().into(), &iv.into())
        .encrypt_padded_vec_mut::<Pkcs7>(&plaintext);

    let envelope = Envelope {
        iv: hex::encode(iv),
        data: STANDARD.encode(ciphertext),
    };
    serde_json::to_string(&envelope).map_err(|e| CryptoError::Encryption(e.to_string()))
}

/// Decrypts an envelope string back into the record's JSON value.
///
/// Fails with [`CryptoError::Decryption`] when the envelope text is
/// malformed, the key does not match (padding check fails), or the
/// recovered bytes are not valid JSON. This is the expected outcome when
/// probing a non-matching candidate key and is deliberately cheap and
/// side-effect-free.
pub fn decrypt(envelope: &str, key: &DerivedKey) -> CryptoResult<serde_json::Value> {
    let parsed: Envelope = serde_json::from_str(envelope)
        .map_err(|_| CryptoError::Decryption("malformed envelope".to_string()))?;

    let iv_bytes =
        hex::decode(&parsed.iv).map_err(|_| CryptoError::Decryption("malformed iv".to_string()))?;
    let iv: [u8; IV_SIZE] = iv_bytes
        .try_into()
        .map_err(|_| CryptoError::Decryption("malformed iv".to_string()))?;

    let ciphertext = STANDARD
        .decode(&parsed.data)
        .map_err(|_| CryptoError::Decryption("malformed ciphertext".to_string()))?;

    let plaintext = Aes256CbcDec::new(key.as_bytes().into(), &iv.into())
        .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
        .map_err(|_| CryptoError::Decryption("no recoverable plaintext".to_string()))?;

    serde_json::from_slice(&plaintext)
        .map_err(|_| CryptoError::Decryption("recovered bytes are not valid JSON".to_string()))
}

/// Decrypts an envelope string directly into a typed record.
pub fn decrypt_as<T: DeserializeOwned>(envelope: &str, key: &DerivedKey) -> CryptoResult<T> {
    let value = decrypt(envelope, key)?;
    serde_json::from_value(value)
        .map_err(|_| CryptoError::Decryption("recovered record has unexpected shape".to_string()))
}

/// Encrypts a batch of records under one key.
pub fn encrypt_batch<T: Serialize>(records: &[T], key: &DerivedKey) -> CryptoResult<Vec<String>> {
    records.iter().map(|record| encrypt(record, key)).collect()
}

/// Decrypts a batch of envelopes under one key.
///
/// Unlike multi-key resolution, this propagates the first failure: it is a
/// single-key utility for callers that know every envelope was written
/// under `key`.
pub fn decrypt_batch(envelopes: &[String], key: &DerivedKey) -> CryptoResult<Vec<serde_json::Value>> {
    envelopes.iter().map(|envelope| decrypt(envelope, key)).collect()
}
