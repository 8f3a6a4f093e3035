//! Closure properties of check + stub synthesis on a small on-disk dataset.

use serde_json::{json, Value};
use std::path::Path;
use tempfile::{tempdir, TempDir};

use sciencemap_integrity::{
    check_links, synthesize_stubs, CheckOptions, ScanOptions, StubOptions, Violation,
};
use sciencemap_model::{EntityKind, LinkDirection};
use sciencemap_store::DatasetConfig;

fn write(path: &Path, value: &Value) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

fn dataset() -> (TempDir, DatasetConfig) {
    let dir = tempdir().unwrap();
    let config = DatasetConfig::from_root(dir.path());

    let events = [
        json!({
            "id": "newton_laws_1687",
            "personId": "newton",
            "influence_chain": {
                "influenced_by": [{"id": "galileo_inertia_1638"}, {"id": "euclid_elements_BC300"}],
                "influenced": [{"id": "lagrange_mechanics_1788"}]
            },
            "simplified_explanation": {"en": "Builds on `kepler_laws_1609`."}
        }),
        json!({
            "id": "galileo_inertia_1638",
            "personId": ["galileo", "torricelli"],
            "influence_chain": {"influenced": [{"id": "newton_laws_1687"}]}
        }),
    ];
    for event in &events {
        let id = event["id"].as_str().unwrap();
        write(&config.record_path(EntityKind::Event, id), event);
    }
    write(
        &config.record_path(EntityKind::Person, "newton"),
        &json!({"id": "newton", "events": ["newton_laws_1687", "opticks_1704"]}),
    );
    write(
        &config.record_path(EntityKind::Person, "galileo"),
        &json!({"id": "galileo", "events": ["galileo_inertia_1638"]}),
    );
    write(
        &config.events_index,
        &json!(["newton_laws_1687", "galileo_inertia_1638"]),
    );
    write(&config.people_index, &json!(["newton", "galileo"]));
    (dir, config)
}

#[test]
fn stubbing_closes_event_links() {
    let (_dir, config) = dataset();

    let before = check_links(&config, CheckOptions::default()).unwrap();
    let dangling_events = before
        .violations
        .iter()
        .filter(|v| {
            matches!(
                v,
                Violation::DanglingLink {
                    direction: LinkDirection::InfluencedBy | LinkDirection::Influenced,
                    ..
                }
            )
        })
        .count();
    assert_eq!(dangling_events, 2);

    let summary = synthesize_stubs(&config, StubOptions::default()).unwrap();
    assert_eq!(
        summary.created,
        vec!["euclid_elements_BC300", "lagrange_mechanics_1788", "opticks_1704"]
    );

    let after = check_links(&config, CheckOptions::default()).unwrap();
    let remaining: Vec<&Violation> = after.violations.iter().collect();
    // Person gaps are reported, never stubbed.
    assert_eq!(
        remaining,
        vec![&Violation::DanglingLink {
            source: "galileo_inertia_1638".to_string(),
            direction: LinkDirection::PersonId,
            target: "torricelli".to_string(),
        }]
    );
}

#[test]
fn person_to_event_gap_is_distinct_from_event_gaps() {
    let (_dir, config) = dataset();
    let report = check_links(&config, CheckOptions::default()).unwrap();

    let opticks: Vec<&Violation> = report
        .violations
        .iter()
        .filter(|v| matches!(v, Violation::DanglingLink { target, .. } if target == "opticks_1704"))
        .collect();
    assert_eq!(opticks.len(), 1);
    assert!(matches!(
        opticks[0],
        Violation::DanglingLink {
            direction: LinkDirection::Events,
            ..
        }
    ));
}

#[test]
fn embedded_mentions_are_stubbed_when_enabled() {
    let (_dir, config) = dataset();
    let options = StubOptions {
        scan: ScanOptions {
            embedded_text: true,
            events_only: false,
        },
        dry_run: false,
    };
    let summary = synthesize_stubs(&config, options).unwrap();
    assert!(summary.created.contains(&"kepler_laws_1609".to_string()));

    let report = check_links(&config, CheckOptions { include_text: true }).unwrap();
    assert!(!report
        .violations
        .iter()
        .any(|v| matches!(v, Violation::DanglingLink { direction: LinkDirection::Mentions, .. })));
}

#[test]
fn repeated_runs_persist_identical_index() {
    let (_dir, config) = dataset();
    synthesize_stubs(&config, StubOptions::default()).unwrap();
    let first = std::fs::read_to_string(&config.events_index).unwrap();
    let second_summary = synthesize_stubs(&config, StubOptions::default()).unwrap();
    let second = std::fs::read_to_string(&config.events_index).unwrap();

    assert!(second_summary.created.is_empty());
    assert_eq!(first, second);
    let ids: Vec<String> = serde_json::from_str(&first).unwrap();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
}
