//! Directory-driven report of referenced-but-absent Events and People.
//!
//! Unlike the link check, this walks every `*.json` file in the events
//! directory (indexed or not) and groups gaps by target, listing the Events
//! that point at each one.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use sciencemap_model::{EntityKind, EventRecord};
use sciencemap_store::{list_record_ids, load_index, DatasetConfig, StoreError};

use crate::scan::read_for_scan;

#[derive(Debug, Clone, Default, Serialize)]
pub struct MissingReport {
    pub events_scanned: usize,
    /// Missing Event id → Events referencing it through their influence chain.
    pub missing_events: BTreeMap<String, BTreeSet<String>>,
    /// Missing Person id → Events naming it in `personId`.
    pub missing_people: BTreeMap<String, BTreeSet<String>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<PathBuf>,
}

impl MissingReport {
    pub fn is_empty(&self) -> bool {
        self.missing_events.is_empty() && self.missing_people.is_empty()
    }
}

pub fn find_missing(config: &DatasetConfig) -> Result<MissingReport, StoreError> {
    let known_events = load_index(&config.events_index)?;
    let known_people = load_index(&config.people_index)?;
    let on_disk = list_record_ids(&config.events_dir)?;

    let mut report = MissingReport::default();
    for file_id in &on_disk {
        let record: EventRecord = match read_for_scan(config, EntityKind::Event, file_id) {
            Ok(record) => record,
            Err(e) => {
                report.skipped.push(e.path().clone());
                continue;
            }
        };
        report.events_scanned += 1;

        for person in record.person_ids() {
            if !known_people.contains(person) {
                report
                    .missing_people
                    .entry(person.to_string())
                    .or_default()
                    .insert(record.id.clone());
            }
        }
        for (_, target) in record.influence_links() {
            if !known_events.contains(target) {
                report
                    .missing_events
                    .entry(target.to_string())
                    .or_default()
                    .insert(record.id.clone());
            }
        }
    }
    Ok(report)
}
