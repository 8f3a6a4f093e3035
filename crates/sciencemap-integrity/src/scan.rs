//! Reference scanning: which Event ids does the corpus point at?

use std::collections::BTreeSet;
use std::path::PathBuf;

use sciencemap_model::{EntityKind, EventRecord, LinkDirection, PersonRecord};
use sciencemap_store::{load_index, read_record, DatasetConfig, RecordError, StoreError};

use crate::text::record_mentions;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Also collect backtick-quoted ids from free-text fields.
    pub embedded_text: bool,
    /// Skip Person records (and do not require the People index).
    pub events_only: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    /// Every distinct Event id referenced by the scanned records.
    pub referenced: BTreeSet<String>,
    pub events_scanned: usize,
    pub people_scanned: usize,
    /// Records that could not be read or parsed.
    pub skipped: Vec<PathBuf>,
}

/// Outbound Event → Event references of one record.
pub fn event_references(record: &EventRecord, embedded_text: bool) -> Vec<(LinkDirection, String)> {
    let mut refs: Vec<(LinkDirection, String)> = record
        .influence_links()
        .into_iter()
        .map(|(direction, id)| (direction, id.to_string()))
        .collect();
    if embedded_text {
        refs.extend(
            record_mentions(record)
                .into_iter()
                .map(|id| (LinkDirection::Mentions, id)),
        );
    }
    refs
}

/// Read a record for a scan. Failures are logged here; callers decide whether
/// they also count as violations.
pub(crate) fn read_for_scan<T: serde::de::DeserializeOwned>(
    config: &DatasetConfig,
    kind: EntityKind,
    id: &str,
) -> Result<T, RecordError> {
    let path = config.record_path(kind, id);
    read_record(&path).map_err(|e| {
        tracing::warn!(%kind, id, error = %e, "skipping unreadable record");
        e
    })
}

/// Collect every Event id referenced from the records of `known_events`
/// (and, unless `events_only`, from every Person in the People index).
///
/// Fails only if the People index is needed and cannot be loaded.
pub fn scan_references(
    config: &DatasetConfig,
    known_events: &BTreeSet<String>,
    options: ScanOptions,
) -> Result<ScanOutcome, StoreError> {
    let mut outcome = ScanOutcome::default();
    tracing::info!(events = known_events.len(), "scanning event links");

    for id in known_events {
        match read_for_scan::<EventRecord>(config, EntityKind::Event, id) {
            Ok(record) => {
                outcome.events_scanned += 1;
                outcome.referenced.extend(
                    event_references(&record, options.embedded_text)
                        .into_iter()
                        .map(|(_, target)| target),
                );
            }
            Err(e) => outcome.skipped.push(e.path().clone()),
        }
    }

    if options.events_only {
        return Ok(outcome);
    }

    let people = load_index(&config.people_index)?;
    for id in &people {
        match read_for_scan::<PersonRecord>(config, EntityKind::Person, id) {
            Ok(person) => {
                outcome.people_scanned += 1;
                outcome
                    .referenced
                    .extend(person.events.into_iter().filter(|e| !e.is_empty()));
            }
            Err(e) => outcome.skipped.push(e.path().clone()),
        }
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::Fixture;
    use serde_json::json;

    fn sample() -> Fixture {
        let fx = Fixture::new();
        fx.event(json!({
            "id": "newton_laws_1687",
            "influence_chain": {
                "influenced_by": [{"id": "kepler_laws_1609"}],
                "influenced": [{"id": "laplace_mechanics_1799"}]
            },
            "summary": "Echoes `galileo_inertia_1638`."
        }));
        fx.raw_event("broken_1", "{ nope");
        fx.person(json!({"id": "newton", "events": ["newton_laws_1687", "principia_draft_1684"]}));
        fx.events_index(&["newton_laws_1687", "broken_1", "absent_2"]);
        fx.people_index(&["newton"]);
        fx
    }

    #[test]
    fn structured_and_person_references() {
        let fx = sample();
        let known = load_index(&fx.config.events_index).unwrap();
        let outcome = scan_references(&fx.config, &known, ScanOptions::default()).unwrap();

        let referenced: Vec<&str> = outcome.referenced.iter().map(String::as_str).collect();
        assert_eq!(
            referenced,
            vec![
                "kepler_laws_1609",
                "laplace_mechanics_1799",
                "newton_laws_1687",
                "principia_draft_1684",
            ]
        );
        assert_eq!(outcome.events_scanned, 1);
        assert_eq!(outcome.people_scanned, 1);
        assert_eq!(outcome.skipped.len(), 2);
    }

    #[test]
    fn embedded_text_adds_mentions() {
        let fx = sample();
        let known = load_index(&fx.config.events_index).unwrap();
        let options = ScanOptions {
            embedded_text: true,
            events_only: true,
        };
        let outcome = scan_references(&fx.config, &known, options).unwrap();
        assert!(outcome.referenced.contains("galileo_inertia_1638"));
        assert!(!outcome.referenced.contains("principia_draft_1684"));
        assert_eq!(outcome.people_scanned, 0);
    }

    #[test]
    fn events_only_does_not_need_people_index() {
        let fx = Fixture::new();
        fx.events_index(&[]);
        let options = ScanOptions {
            embedded_text: false,
            events_only: true,
        };
        assert!(scan_references(&fx.config, &BTreeSet::new(), options).is_ok());
        assert!(matches!(
            scan_references(&fx.config, &BTreeSet::new(), ScanOptions::default()),
            Err(StoreError::IndexMissing { .. })
        ));
    }
}
