//! Stub synthesis: close dangling Event references with placeholder records.
//!
//! Only ever adds files. An existing record (authored or a previous stub) is
//! never touched, so running twice in a row writes nothing the second time.

use serde::Serialize;
use std::collections::BTreeSet;

use sciencemap_model::{is_valid_id, EntityKind, StubRecord};
use sciencemap_store::{create_json, load_index, write_index, DatasetConfig, StoreError};

use crate::scan::{scan_references, ScanOptions};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StubOptions {
    pub scan: ScanOptions,
    /// Report what would be written without touching the dataset.
    pub dry_run: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct StubSummary {
    pub known_before: usize,
    /// Referenced Event ids absent from the index.
    pub missing: BTreeSet<String>,
    /// Stub files written (or that would be, on a dry run).
    pub created: Vec<String>,
    /// Missing from the index, but a file already existed.
    pub already_on_disk: Vec<String>,
    /// Referenced ids that cannot name a record file; neither stubbed nor indexed.
    pub rejected: Vec<String>,
    pub index_size: usize,
    pub index_written: bool,
    pub dry_run: bool,
}

pub fn synthesize_stubs(
    config: &DatasetConfig,
    options: StubOptions,
) -> Result<StubSummary, StoreError> {
    let known = load_index(&config.events_index)?;
    let scan = scan_references(config, &known, options.scan)?;

    let mut summary = StubSummary {
        known_before: known.len(),
        index_size: known.len(),
        dry_run: options.dry_run,
        ..Default::default()
    };
    let mut missing = BTreeSet::new();
    for id in scan.referenced.difference(&known) {
        if is_valid_id(id) {
            missing.insert(id.clone());
        } else {
            tracing::warn!(id = id.as_str(), "referenced id is not a valid file name, not stubbing");
            summary.rejected.push(id.clone());
        }
    }
    if missing.is_empty() {
        summary.missing = missing;
        return Ok(summary);
    }
    tracing::info!(missing = missing.len(), "synthesizing stub events");

    for id in &missing {
        let path = config.record_path(EntityKind::Event, id);
        if path.exists() {
            tracing::debug!(id = id.as_str(), "record already on disk, not stubbing");
            summary.already_on_disk.push(id.clone());
            continue;
        }
        let stub = StubRecord::from_id(id);
        if options.dry_run {
            summary.created.push(id.clone());
            continue;
        }
        if create_json(&path, &stub)? {
            tracing::info!(id = id.as_str(), year = stub.year, title = %stub.title, "created stub");
            summary.created.push(id.clone());
        } else {
            summary.already_on_disk.push(id.clone());
        }
    }

    let updated: BTreeSet<String> = known.union(&missing).cloned().collect();
    summary.index_size = updated.len();
    if !options.dry_run {
        write_index(&config.events_index, &updated)?;
        summary.index_written = true;
    }
    summary.missing = missing;
    Ok(summary)
}
