//! End-to-end flow: login, write, rotate, fetch, decrypt.
//!
//! Wires the session's candidate snapshot into the batch pipeline the way
//! the application glue does.

use chrono::{TimeZone, Utc};
use ledgerly_crypto::{DerivedKey, KdfParams};
use ledgerly_keystore::{KeySession, MemoryKeyStore};
use ledgerly_records::{BatchDecryptor, InlineDecryptor, dedupe_by_id, prepare_write, resolve_row};
use ledgerly_types::{EncryptedRow, RecordId};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .try_init();
}

fn session() -> KeySession {
    KeySession::with_params(Arc::new(MemoryKeyStore::new()), KdfParams { iterations: 25 })
}

fn stored_row(id: &str, write: ledgerly_types::RecordWrite) -> EncryptedRow {
    // What the storage collaborator hands back after assigning an id.
    EncryptedRow {
        id: RecordId::new(id),
        encrypted_timestamp: write.encrypted_timestamp,
        encrypted_data: write.encrypted_data,
    }
}

#[tokio::test]
async fn records_written_before_a_rotation_still_decrypt() {
    init_tracing();
    let sess = session();

    // First login, one record saved under the original key.
    let old_key = sess.login("original passphrase", "user@example.com").unwrap();
    let stamp = Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap();
    let old_write =
        prepare_write(&json!({"amount": 10, "category": "rent"}), &old_key, Some(stamp)).unwrap();

    // Passphrase change; a second record saved under the new key.
    let new_key = sess.login("rotated passphrase", "user@example.com").unwrap();
    let new_write =
        prepare_write(&json!({"amount": 20, "category": "food"}), &new_key, Some(stamp)).unwrap();

    // A row written under a key this client never derived.
    let stranger = DerivedKey::from_bytes([42u8; 32]);
    let stray_write = prepare_write(&json!({"amount": 30}), &stranger, Some(stamp)).unwrap();

    let rows = vec![
        stored_row("r-old", old_write),
        stored_row("r-new", new_write),
        stored_row("r-stray", stray_write),
    ];

    let candidates = sess.candidate_keys().unwrap();
    assert_eq!(candidates.len(), 2);

    let decrypted = InlineDecryptor.decrypt_rows(rows, candidates).await;

    assert_eq!(decrypted.len(), 3);
    assert_eq!(
        decrypted[0].record(),
        Some(&json!({"amount": 10, "category": "rent"}))
    );
    assert_eq!(
        decrypted[1].record(),
        Some(&json!({"amount": 20, "category": "food"}))
    );
    assert!(decrypted[2].is_corrupted());
    assert_eq!(decrypted[2].id(), &RecordId::new("r-stray"));
}

#[tokio::test]
async fn logout_leaves_every_row_unreadable() {
    let sess = session();
    let key = sess.login("pass", "user@example.com").unwrap();
    let write = prepare_write(&json!({"amount": 1}), &key, None).unwrap();

    sess.logout().unwrap();
    let candidates = sess.candidate_keys().unwrap();
    assert!(candidates.is_empty());

    let decrypted = InlineDecryptor
        .decrypt_rows(vec![stored_row("r1", write)], candidates)
        .await;
    assert!(decrypted[0].is_corrupted());
}

#[test]
fn overlapping_pages_merge_to_unique_records() {
    let sess = session();
    let key = sess.login("pass", "user@example.com").unwrap();
    let candidates = sess.candidate_keys().unwrap();

    let write = |v: i64| prepare_write(&json!({"v": v}), &key, None).unwrap();

    // Two fetched pages sharing a boundary row.
    let page1 = vec![stored_row("a", write(1)), stored_row("b", write(2))];
    let page2 = vec![stored_row("b", write(2)), stored_row("c", write(3))];

    let mut accumulated = Vec::new();
    for page in [page1, page2] {
        accumulated.extend(page.iter().map(|row| resolve_row(row, &candidates)));
    }

    let merged = dedupe_by_id(accumulated);
    assert_eq!(merged.len(), 3);
    let ids: Vec<_> = merged.iter().map(|r| r.id().to_string()).collect();
    assert_eq!(ids, ["a", "b", "c"]);
}
