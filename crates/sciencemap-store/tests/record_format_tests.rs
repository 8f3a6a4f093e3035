//! On-disk format of records written through the store.

use serde_json::{json, Value};
use tempfile::tempdir;

use sciencemap_model::{EntityKind, EventRecord, StubRecord};
use sciencemap_store::{create_json, read_record, write_json, DatasetConfig, RecordError};

#[test]
fn authored_fields_survive_a_typed_round_trip() {
    let dir = tempdir().unwrap();
    let config = DatasetConfig::from_root(dir.path());
    std::fs::create_dir_all(&config.events_dir).unwrap();
    let path = config.record_path(EntityKind::Event, "zhang_seismograph_132");

    let original = json!({
        "id": "zhang_seismograph_132",
        "title": "候风地动仪",
        "year": 132,
        "personId": "zhang_heng",
        "influence_chain": {
            "influenced_by": [],
            "influenced": [{"id": "mallet_seismology_1848", "strength": "weak"}]
        },
        "image_url": "https://example.org/seismograph.jpg"
    });
    write_json(&path, &original).unwrap();

    let record: EventRecord = read_record(&path).unwrap();
    assert_eq!(record.person_ids(), vec!["zhang_heng"]);
    write_json(&path, &record).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.ends_with("}\n"));
    assert!(text.contains("\"title\": \"候风地动仪\""));
    let reread: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(reread, original);
}

#[test]
fn stub_file_layout() {
    let dir = tempdir().unwrap();
    let events_dir = dir.path().join("events");
    std::fs::create_dir(&events_dir).unwrap();
    let path = events_dir.join("euclid_elements_BC300.json");

    assert!(create_json(&path, &StubRecord::from_id("euclid_elements_BC300")).unwrap());
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        text,
        "{\n  \"id\": \"euclid_elements_BC300\",\n  \"title\": \"Euclid Elements\",\n  \"title_en\": \"Euclid Elements\",\n  \"year\": -300,\n  \"is_stub\": true\n}\n"
    );

    // A second create never clobbers.
    assert!(!create_json(&path, &json!({"id": "other"})).unwrap());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), text);
}

#[test]
fn missing_and_malformed_are_distinguished() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope.json");
    let broken = dir.path().join("broken.json");
    std::fs::write(&broken, "{\"id\": ").unwrap();

    let err = read_record::<Value>(&missing).unwrap_err();
    assert!(err.is_missing());
    match read_record::<Value>(&broken).unwrap_err() {
        RecordError::Malformed { path, .. } => assert_eq!(path, broken),
        other => panic!("unexpected error: {other}"),
    }
}
