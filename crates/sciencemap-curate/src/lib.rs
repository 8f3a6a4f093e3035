//! Curation passes over Event records
//!
//! Each pass reads every selected record as a JSON object, edits it in memory
//! and writes it back only if something changed:
//! - [`images`]: attach `image_url` from an id → URL table
//! - [`quotes`]: turn CJK curly double quotes into ASCII quotes
//! - [`fields`]: fold free-form `field` / `field_en` labels into the taxonomy
//! - [`census`]: list every label in use (read-only)

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::path::PathBuf;

use sciencemap_model::EntityKind;
use sciencemap_store::{read_record, write_json, DatasetConfig, StoreError};

pub mod census;
pub mod fields;
pub mod images;
pub mod quotes;

pub use census::*;
pub use fields::*;
pub use images::*;
pub use quotes::*;

/// Outcome shared by every rewriting pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PassSummary {
    pub scanned: usize,
    /// Ids whose record file was rewritten (or would be, on a dry run).
    pub changed: Vec<String>,
    /// Unreadable records, or records that are not JSON objects.
    pub skipped: Vec<PathBuf>,
}

/// Run `edit` over the Event records named in `ids`. `edit` returns `true`
/// when it modified the object; only those records are written back.
pub(crate) fn rewrite_events<F>(
    config: &DatasetConfig,
    ids: &BTreeSet<String>,
    dry_run: bool,
    mut edit: F,
) -> Result<PassSummary, StoreError>
where
    F: FnMut(&str, &mut Map<String, Value>) -> bool,
{
    let mut summary = PassSummary::default();
    for id in ids {
        let path = config.record_path(EntityKind::Event, id);
        let mut value: Value = match read_record(&path) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(id = id.as_str(), error = %e, "skipping unreadable record");
                summary.skipped.push(path);
                continue;
            }
        };
        let Some(object) = value.as_object_mut() else {
            tracing::warn!(id = id.as_str(), "record is not a JSON object, skipping");
            summary.skipped.push(path);
            continue;
        };
        summary.scanned += 1;

        if !edit(id, object) {
            continue;
        }
        if !dry_run {
            write_json(&path, &value)?;
            tracing::debug!(id = id.as_str(), "rewrote record");
        }
        summary.changed.push(id.clone());
    }
    Ok(summary)
}

#[cfg(test)]
pub(crate) mod fixture {
    use serde_json::Value;
    use tempfile::TempDir;

    use sciencemap_model::EntityKind;
    use sciencemap_store::DatasetConfig;

    pub struct Fixture {
        _dir: TempDir,
        pub config: DatasetConfig,
    }

    impl Fixture {
        pub fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let config = DatasetConfig::from_root(dir.path());
            std::fs::create_dir_all(&config.events_dir).unwrap();
            Self { _dir: dir, config }
        }

        pub fn event(&self, value: Value) {
            let id = value["id"].as_str().unwrap().to_string();
            self.raw_event(&id, &serde_json::to_string_pretty(&value).unwrap());
        }

        pub fn raw_event(&self, id: &str, text: &str) {
            std::fs::write(self.config.record_path(EntityKind::Event, id), text).unwrap();
        }

        pub fn read_event(&self, id: &str) -> Value {
            let path = self.config.record_path(EntityKind::Event, id);
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
        }

        pub fn raw(&self, id: &str) -> String {
            std::fs::read_to_string(self.config.record_path(EntityKind::Event, id)).unwrap()
        }
    }
}
