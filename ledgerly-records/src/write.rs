//! Write-path preparation.
//!
//! Encrypts a record under the current key and stamps the non-secret
//! timestamp the storage collaborator persists next to the ciphertext.

use chrono::{DateTime, Utc};
use ledgerly_crypto::{CryptoResult, DerivedKey};
use ledgerly_types::RecordWrite;
use serde::Serialize;

/// Encrypts a record into a write payload.
///
/// `timestamp` is the record's own date when it carries one; otherwise the
/// payload is stamped with the current time. Failure means the record is
/// unsaved — nothing is persisted partially, and the caller surfaces a
/// retryable save error.
pub fn prepare_write<T: Serialize>(
    record: &T,
    key: &DerivedKey,
    timestamp: Option<DateTime<Utc>>,
) -> CryptoResult<RecordWrite> {
    let encrypted_data = ledgerly_crypto::encrypt(record, key)?;
    Ok(RecordWrite {
        encrypted_data,
        encrypted_timestamp: timestamp.unwrap_or_else(Utc::now),
    })
}
