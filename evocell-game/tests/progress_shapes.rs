//! Persisted-shape guarantees: the progress record keeps its fixed JSON
//! layout, round-trips losslessly, and corrupt payloads recover to the
//! empty default instead of failing.

use evocell_game::ProgressRecord;
use serde_json::json;

fn sample_record() -> ProgressRecord {
    let mut record = ProgressRecord::default();
    record.record_mission_score("mito", 88.0);
    record.record_mission_score("nucleus", 72.0);
    record.record_mission_score("vacuole", 95.0);
    record
}

#[test]
fn persisted_layout_is_exact() {
    let record = sample_record();
    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(
        value,
        json!({
            "missionScores": { "mito": 88, "nucleus": 72, "vacuole": 95 },
            "completed": { "mito": true, "nucleus": true, "vacuole": true },
            "totalScore": 85
        })
    );
}

#[test]
fn save_then_load_is_lossless() {
    let record = sample_record();
    let saved = serde_json::to_string(&record).unwrap();
    let restored: ProgressRecord = serde_json::from_str(&saved).unwrap();
    assert_eq!(restored, record);

    let exported = record.export_json().unwrap();
    let reimported: ProgressRecord = serde_json::from_str(&exported).unwrap();
    assert_eq!(reimported, record);
}

#[test]
fn corrupt_payloads_recover_to_the_default() {
    for payload in ["", "{not json", "[1,2,3]", "\"just a string\""] {
        let parsed = serde_json::from_str::<ProgressRecord>(payload);
        // The storage layer maps a parse failure to the empty default.
        let record = parsed.unwrap_or_default();
        assert_eq!(record, ProgressRecord::default(), "payload {payload:?}");
    }
}

#[test]
fn partial_payloads_fill_missing_fields() {
    let record: ProgressRecord = serde_json::from_str(r#"{"totalScore": 40}"#).unwrap();
    assert_eq!(record.total_score, 40);
    assert!(record.scores.is_empty());
    assert!(record.completed.is_empty());

    let record: ProgressRecord =
        serde_json::from_str(r#"{"missionScores": {"er": 55}}"#).unwrap();
    assert_eq!(record.scores.get("er"), Some(&55));
    assert_eq!(record.total_score, 0, "derived field defaults until recomputed");
}

#[test]
fn unknown_fields_do_not_break_loading() {
    let payload = r#"{
        "missionScores": { "golgi": 61 },
        "completed": { "golgi": true },
        "totalScore": 61,
        "schemaVersion": 9
    }"#;
    let record: ProgressRecord = serde_json::from_str(payload).unwrap();
    assert_eq!(record.scores.get("golgi"), Some(&61));
}
