//! Link checking across Events, People and their indices.
//!
//! Directions checked independently:
//! - Event → Person (`personId`) against the People index,
//! - Person → Event (`events`) against the Event index,
//! - Event → Event (`influenced_by` / `influenced`, and optionally free-text
//!   `mentions`) against the Event index.
//!
//! Nothing is repaired here; see [`crate::stubs`] for that.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;

use sciencemap_model::{EntityKind, EventRecord, LinkDirection, PersonRecord};
use sciencemap_store::{load_index, read_record, DatasetConfig, RecordError, StoreError};

use crate::scan::event_references;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckOptions {
    /// Also check backtick-quoted ids in free-text fields.
    pub include_text: bool,
}

/// One broken invariant. Ordering and equality make a `BTreeSet` of these
/// both deterministic and duplicate-free.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// An indexed id without a record file.
    MissingRecord {
        entity: EntityKind,
        id: String,
        path: PathBuf,
    },
    /// An indexed id whose record file cannot be read or parsed.
    MalformedRecord {
        entity: EntityKind,
        id: String,
        path: PathBuf,
        message: String,
    },
    /// A reference to an id absent from the target kind's index.
    DanglingLink {
        source: String,
        direction: LinkDirection,
        target: String,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::MissingRecord { entity, id, path } => write!(
                f,
                "{entity} '{id}' is indexed but has no record file: {}",
                path.display()
            ),
            Violation::MalformedRecord {
                entity,
                id,
                path,
                message,
            } => write!(
                f,
                "{entity} '{id}' record {} is malformed: {message}",
                path.display()
            ),
            Violation::DanglingLink {
                source,
                direction,
                target,
            } => write!(
                f,
                "{} '{source}' ({direction}) references missing {}: {target}",
                direction.source_kind(),
                direction.target_kind()
            ),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct IntegrityReport {
    pub known_events: usize,
    pub known_people: usize,
    pub events_checked: usize,
    pub people_checked: usize,
    pub violations: BTreeSet<Violation>,
}

impl IntegrityReport {
    pub fn error_count(&self) -> usize {
        self.violations.len()
    }

    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// Dangling links only, grouped by the field they were found in.
    pub fn dangling_by_direction(&self) -> BTreeMap<LinkDirection, usize> {
        let mut counts = BTreeMap::new();
        for violation in &self.violations {
            if let Violation::DanglingLink { direction, .. } = violation {
                *counts.entry(*direction).or_insert(0) += 1;
            }
        }
        counts
    }

    fn record_failure(&mut self, entity: EntityKind, id: &str, err: RecordError) {
        let violation = match err {
            RecordError::Missing { path } => Violation::MissingRecord {
                entity,
                id: id.to_string(),
                path,
            },
            RecordError::Io { path, source } => Violation::MalformedRecord {
                entity,
                id: id.to_string(),
                path,
                message: source.to_string(),
            },
            RecordError::Malformed { path, source } => Violation::MalformedRecord {
                entity,
                id: id.to_string(),
                path,
                message: source.to_string(),
            },
        };
        self.violations.insert(violation);
    }

    fn dangling(&mut self, source: &str, direction: LinkDirection, target: &str) {
        self.violations.insert(Violation::DanglingLink {
            source: source.to_string(),
            direction,
            target: target.to_string(),
        });
    }
}

/// Load both indices and verify every link of every indexed record.
pub fn check_links(
    config: &DatasetConfig,
    options: CheckOptions,
) -> Result<IntegrityReport, StoreError> {
    let events = load_index(&config.events_index)?;
    let people = load_index(&config.people_index)?;
    Ok(check_with_indices(config, &events, &people, options))
}

/// Verify links against already-loaded indices.
pub fn check_with_indices(
    config: &DatasetConfig,
    events: &BTreeSet<String>,
    people: &BTreeSet<String>,
    options: CheckOptions,
) -> IntegrityReport {
    let mut report = IntegrityReport {
        known_events: events.len(),
        known_people: people.len(),
        ..Default::default()
    };

    for id in events {
        let record: EventRecord = match read_record(&config.record_path(EntityKind::Event, id)) {
            Ok(record) => record,
            Err(e) => {
                report.record_failure(EntityKind::Event, id, e);
                continue;
            }
        };
        report.events_checked += 1;

        for person in record.person_ids() {
            if !people.contains(person) {
                report.dangling(id, LinkDirection::PersonId, person);
            }
        }
        for (direction, target) in event_references(&record, options.include_text) {
            if !events.contains(&target) {
                report.dangling(id, direction, &target);
            }
        }
    }

    for id in people {
        let record: PersonRecord = match read_record(&config.record_path(EntityKind::Person, id)) {
            Ok(record) => record,
            Err(e) => {
                report.record_failure(EntityKind::Person, id, e);
                continue;
            }
        };
        report.people_checked += 1;

        for event in record.events.iter().filter(|e| !e.is_empty()) {
            if !events.contains(event) {
                report.dangling(id, LinkDirection::Events, event);
            }
        }
    }

    tracing::info!(
        events = report.events_checked,
        people = report.people_checked,
        violations = report.error_count(),
        "link check finished"
    );
    report
}

/// One line per violation, followed by a per-direction tally.
pub fn render_report_text(report: &IntegrityReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "checked {} of {} events, {} of {} people\n",
        report.events_checked, report.known_events, report.people_checked, report.known_people
    ));
    for violation in &report.violations {
        out.push_str(&format!("  [ERROR] {violation}\n"));
    }
    for (direction, count) in report.dangling_by_direction() {
        out.push_str(&format!(
            "  {direction}: {count} dangling link(s) ({} → {})\n",
            direction.source_kind(),
            direction.target_kind()
        ));
    }
    out
}
