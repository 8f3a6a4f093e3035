//! Disagreement between an index file and the directory it describes.

use serde::Serialize;
use std::collections::BTreeSet;

use sciencemap_model::EntityKind;

use crate::{list_record_ids, load_index, write_index, DatasetConfig, StoreError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexDrift {
    pub kind: EntityKind,
    pub indexed: usize,
    pub on_disk: usize,
    /// In the index, but no record file.
    pub unbacked: BTreeSet<String>,
    /// Record file present, but not in the index.
    pub unindexed: BTreeSet<String>,
}

impl IndexDrift {
    pub fn is_clean(&self) -> bool {
        self.unbacked.is_empty() && self.unindexed.is_empty()
    }
}

/// Compare the index of `kind` against its record directory.
pub fn index_drift(config: &DatasetConfig, kind: EntityKind) -> Result<IndexDrift, StoreError> {
    let indexed = load_index(config.index_path(kind))?;
    let on_disk = list_record_ids(config.record_dir(kind))?;
    Ok(IndexDrift {
        kind,
        indexed: indexed.len(),
        on_disk: on_disk.len(),
        unbacked: indexed.difference(&on_disk).cloned().collect(),
        unindexed: on_disk.difference(&indexed).cloned().collect(),
    })
}

/// Overwrite the index of `kind` with the current directory listing.
pub fn rebuild_index(
    config: &DatasetConfig,
    kind: EntityKind,
) -> Result<BTreeSet<String>, StoreError> {
    let ids = list_record_ids(config.record_dir(kind))?;
    write_index(config.index_path(kind), &ids)?;
    Ok(ids)
}
