//! The decrypted, in-memory view of a record.

use crate::RecordId;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

/// Outcome of resolving one ciphertext row against the candidate keys.
///
/// A derived, ephemeral view: recomputed on every fetch, never persisted.
/// A row that no candidate key can open degrades to a corrupted marker so
/// the rest of the page still renders.
#[derive(Debug, Clone, PartialEq)]
pub enum DecryptedRecord {
    /// The row decrypted under one of the candidate keys.
    Decrypted {
        /// Server-issued record id, reattached after decryption.
        id: RecordId,
        /// The row's non-secret timestamp.
        timestamp: DateTime<Utc>,
        /// The plaintext record content.
        record: Value,
    },
    /// No candidate key could decrypt the row.
    Corrupted {
        /// Server-issued record id of the unreadable row.
        id: RecordId,
    },
}

impl DecryptedRecord {
    /// Creates a successfully decrypted record.
    pub fn decrypted(id: RecordId, timestamp: DateTime<Utc>, record: Value) -> Self {
        Self::Decrypted {
            id,
            timestamp,
            record,
        }
    }

    /// Creates a corrupted-row marker.
    pub fn corrupted(id: RecordId) -> Self {
        Self::Corrupted { id }
    }

    /// The record id, present for both outcomes.
    #[must_use]
    pub fn id(&self) -> &RecordId {
        match self {
            Self::Decrypted { id, .. } | Self::Corrupted { id } => id,
        }
    }

    /// True for rows no candidate key could open.
    #[must_use]
    pub fn is_corrupted(&self) -> bool {
        matches!(self, Self::Corrupted { .. })
    }

    /// The plaintext content, if the row decrypted.
    #[must_use]
    pub fn record(&self) -> Option<&Value> {
        match self {
            Self::Decrypted { record, .. } => Some(record),
            Self::Corrupted { .. } => None,
        }
    }

    /// The merged JSON view consumed by application state.
    ///
    /// Decrypted rows spread their content and gain `_id` and `_timestamp`;
    /// corrupted rows reduce to `{"_id": ..., "_corrupted": true}`. Content
    /// that is not a JSON object contributes nothing to the spread — the
    /// typed variant keeps it lossless.
    #[must_use]
    pub fn to_view(&self) -> Value {
        match self {
            Self::Decrypted {
                id,
                timestamp,
                record,
            } => {
                let mut view = match record {
                    Value::Object(fields) => fields.clone(),
                    _ => Map::new(),
                };
                view.insert("_id".to_string(), Value::String(id.to_string()));
                view.insert(
                    "_timestamp".to_string(),
                    Value::String(timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)),
                );
                Value::Object(view)
            }
            Self::Corrupted { id } => {
                let mut view = Map::new();
                view.insert("_id".to_string(), Value::String(id.to_string()));
                view.insert("_corrupted".to_string(), Value::Bool(true));
                Value::Object(view)
            }
        }
    }
}
