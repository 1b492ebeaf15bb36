use chrono::{DateTime, TimeZone, Utc};
use ledgerly_crypto::{DerivedKey, encrypt};
use ledgerly_records::{
    BatchDecryptor, DecryptorConfig, InlineDecryptor, OffloadedDecryptor, select_decryptor,
};
use ledgerly_types::{EncryptedRow, RecordId};
use pretty_assertions::assert_eq;
use serde_json::json;

fn key(n: u8) -> DerivedKey {
    DerivedKey::from_bytes([n; 32])
}

fn ts() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap()
}

fn row(id: &str, record: &serde_json::Value, key: &DerivedKey) -> EncryptedRow {
    EncryptedRow {
        id: RecordId::new(id),
        encrypted_timestamp: ts(),
        encrypted_data: encrypt(record, key).unwrap(),
    }
}

/// A page with one row written under a key nobody knows anymore.
fn page_with_bad_row(good_key: &DerivedKey) -> Vec<EncryptedRow> {
    let unknown = key(99);
    vec![
        row("r1", &json!({"amount": 1}), good_key),
        row("r2", &json!({"amount": 2}), good_key),
        row("r3", &json!({"amount": 3}), &unknown),
        row("r4", &json!({"amount": 4}), good_key),
    ]
}

#[tokio::test]
async fn inline_decrypts_a_page_in_order() {
    let k = key(1);
    let rows = vec![
        row("r1", &json!({"amount": 1}), &k),
        row("r2", &json!({"amount": 2}), &k),
    ];

    let decrypted = InlineDecryptor.decrypt_rows(rows, vec![k]).await;
    assert_eq!(decrypted.len(), 2);
    assert_eq!(decrypted[0].id(), &RecordId::new("r1"));
    assert_eq!(decrypted[0].record(), Some(&json!({"amount": 1})));
    assert_eq!(decrypted[1].id(), &RecordId::new("r2"));
}

#[tokio::test]
async fn one_bad_row_degrades_without_failing_the_batch() {
    let k = key(1);
    let decrypted = InlineDecryptor
        .decrypt_rows(page_with_bad_row(&k), vec![k])
        .await;

    assert_eq!(decrypted.len(), 4);
    assert!(!decrypted[0].is_corrupted());
    assert!(!decrypted[1].is_corrupted());
    assert!(decrypted[2].is_corrupted());
    assert_eq!(decrypted[2].id(), &RecordId::new("r3"));
    assert!(!decrypted[3].is_corrupted());
}

#[tokio::test]
async fn offloaded_matches_inline_exactly() {
    let current = key(1);
    let legacy = key(2);
    let mut rows = page_with_bad_row(&current);
    rows.push(row("r5", &json!({"amount": 5}), &legacy));
    let candidates = vec![current, legacy];

    let inline = InlineDecryptor
        .decrypt_rows(rows.clone(), candidates.clone())
        .await;
    let offloaded = OffloadedDecryptor.decrypt_rows(rows, candidates).await;
    assert_eq!(inline, offloaded);
}

#[tokio::test]
async fn empty_batch_yields_empty_result() {
    let decrypted = OffloadedDecryptor
        .decrypt_rows(Vec::new(), vec![key(1)])
        .await;
    assert!(decrypted.is_empty());
}

#[tokio::test]
async fn empty_candidate_list_marks_every_row_corrupted() {
    let k = key(1);
    let rows = vec![
        row("r1", &json!({"a": 1}), &k),
        row("r2", &json!({"a": 2}), &k),
    ];

    let decrypted = InlineDecryptor.decrypt_rows(rows, Vec::new()).await;
    assert_eq!(decrypted.len(), 2);
    assert!(decrypted.iter().all(|r| r.is_corrupted()));
}

// ── Strategy selection ───────────────────────────────────────────

#[tokio::test]
async fn selected_decryptor_honors_the_contract() {
    let k = key(1);
    let rows = page_with_bad_row(&k);

    // Inside a runtime with offload enabled this picks the offloaded
    // strategy; the contract is identical either way.
    let decryptor = select_decryptor(&DecryptorConfig { offload: true });
    let decrypted = decryptor.decrypt_rows(rows.clone(), vec![k.clone()]).await;

    let expected = InlineDecryptor.decrypt_rows(rows, vec![k]).await;
    assert_eq!(decrypted, expected);
}

#[test]
fn selection_without_a_runtime_falls_back_inline() {
    // No ambient runtime here, so even offload=true must degrade to the
    // inline strategy and still produce correct results.
    let decryptor = select_decryptor(&DecryptorConfig { offload: true });

    let k = key(1);
    let rows = page_with_bad_row(&k);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    let decrypted = runtime.block_on(decryptor.decrypt_rows(rows, vec![k]));

    assert_eq!(decrypted.len(), 4);
    assert!(decrypted[2].is_corrupted());
}

#[tokio::test]
async fn offload_disabled_stays_inline() {
    let decryptor = select_decryptor(&DecryptorConfig { offload: false });

    let k = key(1);
    let rows = vec![row("r1", &json!({"a": 1}), &k)];
    let decrypted = decryptor.decrypt_rows(rows, vec![k]).await;
    assert_eq!(decrypted.len(), 1);
    assert!(!decrypted[0].is_corrupted());
}
