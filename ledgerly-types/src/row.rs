//! Wire contracts for ciphertext rows.
//!
//! These mirror the storage collaborator's fetch and write payloads. The
//! envelope text inside `encrypted_data` is produced and consumed by the
//! crypto crate; this crate carries it as opaque text.

use crate::RecordId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One ciphertext row as fetched from the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptedRow {
    /// Server-issued record id.
    #[serde(rename = "_id")]
    pub id: RecordId,
    /// Non-secret timestamp stored alongside the ciphertext.
    pub encrypted_timestamp: DateTime<Utc>,
    /// Envelope text holding the encrypted record.
    pub encrypted_data: String,
}

/// Payload handed to the storage collaborator when persisting a record.
///
/// The collaborator associates ownership, assigns the `_id`, and returns
/// the stored row. An update produces a brand-new envelope, never a patch
/// of the old one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordWrite {
    /// Envelope text holding the encrypted record.
    pub encrypted_data: String,
    /// Non-secret timestamp to store alongside the ciphertext.
    pub encrypted_timestamp: DateTime<Utc>,
}
