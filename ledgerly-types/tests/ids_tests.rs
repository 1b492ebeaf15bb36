use ledgerly_types::RecordId;

#[test]
fn record_id_display_matches_input() {
    let id = RecordId::new("64f1c2a9e13b7a0012ab34cd");
    assert_eq!(id.to_string(), "64f1c2a9e13b7a0012ab34cd");
    assert_eq!(id.as_str(), "64f1c2a9e13b7a0012ab34cd");
}

#[test]
fn record_id_from_str_and_string() {
    let a = RecordId::from("row-1");
    let b = RecordId::from("row-1".to_string());
    assert_eq!(a, b);
}

#[test]
fn record_id_serializes_transparently() {
    let id = RecordId::new("abc123");
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, "\"abc123\"");

    let parsed: RecordId = serde_json::from_str("\"abc123\"").unwrap();
    assert_eq!(parsed, id);
}

#[test]
fn record_id_is_opaque() {
    // Ids need not look like anything in particular.
    let id = RecordId::new("not-a-uuid-or-objectid");
    assert_eq!(id.as_str(), "not-a-uuid-or-objectid");
}
