//! Multi-key resolution of ciphertext rows.
//!
//! Records may have been written under the current key or a previously
//! derived one, so decryption walks an ordered candidate list. The outcome
//! is a tagged result, never an error: a row no candidate can open becomes
//! a corrupted marker and the rest of the batch is unaffected.

use ledgerly_crypto::DerivedKey;
use ledgerly_types::{DecryptedRecord, EncryptedRow};
use std::collections::HashSet;

/// Resolves one row against the candidate keys; first success wins.
///
/// Ordering only affects cost. Decryption is all-or-nothing per key, so
/// the result is identical for any ordering of the same candidate set.
pub fn resolve_row(row: &EncryptedRow, candidates: &[DerivedKey]) -> DecryptedRecord {
    for key in candidates {
        if let Ok(record) = ledgerly_crypto::decrypt(&row.encrypted_data, key) {
            return DecryptedRecord::decrypted(row.id.clone(), row.encrypted_timestamp, record);
        }
    }
    DecryptedRecord::corrupted(row.id.clone())
}

/// Resolves a whole batch, preserving input order.
pub(crate) fn resolve_all(
    rows: &[EncryptedRow],
    candidates: &[DerivedKey],
) -> Vec<DecryptedRecord> {
    rows.iter().map(|row| resolve_row(row, candidates)).collect()
}

/// Drops duplicate ids from an accumulated record list; first seen wins.
///
/// Retries and pagination can hand the accumulating caller overlapping
/// rows. Insertion order is preserved.
pub fn dedupe_by_id(records: Vec<DecryptedRecord>) -> Vec<DecryptedRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(record.id().clone()))
        .collect()
}
