//! Index files: flat JSON arrays of ids.

use std::collections::BTreeSet;
use std::path::Path;

use crate::records::write_json;
use crate::StoreError;

/// Load the distinct ids of an index file.
pub fn load_index(path: &Path) -> Result<BTreeSet<String>, StoreError> {
    if !path.exists() {
        return Err(StoreError::IndexMissing {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path).map_err(StoreError::io(path))?;
    let ids: Vec<String> =
        serde_json::from_str(&text).map_err(|source| StoreError::IndexMalformed {
            path: path.to_path_buf(),
            source,
        })?;
    let set: BTreeSet<String> = ids.into_iter().collect();
    tracing::debug!(path = %path.display(), ids = set.len(), "loaded index");
    Ok(set)
}

/// Persist ids as a sorted JSON array. `BTreeSet` order makes the output
/// identical across runs for the same set.
pub fn write_index(path: &Path, ids: &BTreeSet<String>) -> Result<(), StoreError> {
    let list: Vec<&str> = ids.iter().map(String::as_str).collect();
    write_json(path, &list)?;
    tracing::info!(path = %path.display(), ids = ids.len(), "wrote index");
    Ok(())
}
