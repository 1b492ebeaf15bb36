//! Batch decryption with optional background offload.
//!
//! Decrypting a page of rows is a CPU-bound loop over many small
//! ciphertexts. When the runtime allows it the work moves to the blocking
//! thread pool so the calling task stays responsive; otherwise it runs
//! inline. Both paths produce identical results for identical inputs —
//! offloading is a performance choice, never a correctness dependency.

use crate::resolve::resolve_all;
use async_trait::async_trait;
use ledgerly_crypto::DerivedKey;
use ledgerly_types::{DecryptedRecord, EncryptedRow};
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::warn;

/// Strategy interface for decrypting one fetched batch.
///
/// Request/response shaped: one batch in, one decrypted batch out, results
/// in input order. A row no candidate key can open comes back as a
/// corrupted marker, never as a batch-level failure. The candidate list is
/// a read-only snapshot for the duration of the call.
#[async_trait]
pub trait BatchDecryptor: Send + Sync {
    /// Decrypts a page of fetched rows against the candidate keys.
    async fn decrypt_rows(
        &self,
        rows: Vec<EncryptedRow>,
        candidates: Vec<DerivedKey>,
    ) -> Vec<DecryptedRecord>;
}

/// Decrypts the batch inline on the calling task.
pub struct InlineDecryptor;

#[async_trait]
impl BatchDecryptor for InlineDecryptor {
    async fn decrypt_rows(
        &self,
        rows: Vec<EncryptedRow>,
        candidates: Vec<DerivedKey>,
    ) -> Vec<DecryptedRecord> {
        resolve_all(&rows, &candidates)
    }
}

/// Decrypts the batch on the blocking thread pool.
///
/// At most one batch per value should be in flight; concurrent batches
/// belong on independent instances. If the offloaded task dies, the batch
/// is transparently recomputed inline — the caller always gets a result.
/// A caller that abandons a batch simply discards the late result; no
/// cancellation is required.
pub struct OffloadedDecryptor;

#[async_trait]
impl BatchDecryptor for OffloadedDecryptor {
    async fn decrypt_rows(
        &self,
        rows: Vec<EncryptedRow>,
        candidates: Vec<DerivedKey>,
    ) -> Vec<DecryptedRecord> {
        let rows = Arc::new(rows);
        let candidates = Arc::new(candidates);
        let task_rows = Arc::clone(&rows);
        let task_keys = Arc::clone(&candidates);

        match tokio::task::spawn_blocking(move || resolve_all(&task_rows, &task_keys)).await {
            Ok(decrypted) => decrypted,
            Err(e) => {
                warn!("offloaded decrypt failed, recomputing inline: {e}");
                resolve_all(&rows, &candidates)
            }
        }
    }
}

/// Configuration for decryptor selection.
#[derive(Debug, Clone)]
pub struct DecryptorConfig {
    /// Whether offloading to the blocking pool is allowed at all.
    pub offload: bool,
}

impl Default for DecryptorConfig {
    fn default() -> Self {
        // Release builds offload; debug sessions keep the work inline.
        Self {
            offload: cfg!(not(debug_assertions)),
        }
    }
}

/// Picks the decryption strategy for this session.
///
/// Offloads only when the configuration allows it and a runtime handle is
/// reachable from the calling context; anything else gets the inline
/// strategy. Both satisfy the same contract, so call sites never need to
/// know which one they hold.
pub fn select_decryptor(config: &DecryptorConfig) -> Arc<dyn BatchDecryptor> {
    if config.offload && Handle::try_current().is_ok() {
        Arc::new(OffloadedDecryptor)
    } else {
        Arc::new(InlineDecryptor)
    }
}
