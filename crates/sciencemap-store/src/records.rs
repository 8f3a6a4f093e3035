//! Record file IO.
//!
//! Writes go through a temp file in the destination directory and an atomic
//! rename, so a crash never leaves a half-written record behind.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

use crate::{RecordError, StoreError};

/// Read and deserialize one record file.
pub fn read_record<T: DeserializeOwned>(path: &Path) -> Result<T, RecordError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(RecordError::Missing {
                path: path.to_path_buf(),
            })
        }
        Err(source) => {
            return Err(RecordError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    serde_json::from_str(&text).map_err(|source| RecordError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a JSON input that is not a record (a lookup table, a config).
/// Any failure is fatal for the caller.
pub fn read_json_input<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let text = std::fs::read_to_string(path).map_err(StoreError::io(path))?;
    serde_json::from_str(&text).map_err(|source| StoreError::InputMalformed {
        path: path.to_path_buf(),
        source,
    })
}

/// Pretty JSON (2-space indent, non-ASCII kept verbatim) with a trailing newline.
pub fn render_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<String, StoreError> {
    let mut text = serde_json::to_string_pretty(value).map_err(|source| StoreError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;
    text.push('\n');
    Ok(text)
}

/// Temp file next to `path`. The directory must already exist; nothing here
/// creates directories.
fn staged(path: &Path, text: &str) -> Result<NamedTempFile, StoreError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let mut tmp = tempfile::Builder::new()
        .prefix(".sciencemap-")
        .suffix(".tmp")
        .tempfile_in(&dir)
        .map_err(StoreError::io(&dir))?;
    tmp.write_all(text.as_bytes())
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(StoreError::io(tmp.path()))?;
    Ok(tmp)
}

/// Replace `path` with the JSON rendering of `value`.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    let text = render_json(path, value)?;
    let tmp = staged(path, &text)?;
    tmp.persist(path).map_err(|e| StoreError::Io {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}

/// Create `path` only if it does not exist yet. Returns `false` (and writes
/// nothing) when a file is already there.
pub fn create_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<bool, StoreError> {
    if path.exists() {
        return Ok(false);
    }
    let text = render_json(path, value)?;
    let tmp = staged(path, &text)?;
    match tmp.persist_noclobber(path) {
        Ok(_) => Ok(true),
        Err(e) if e.error.kind() == std::io::ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(StoreError::Io {
            path: path.to_path_buf(),
            source: e.error,
        }),
    }
}

/// Ids of the `*.json` files directly inside `dir` (file stems).
pub fn list_record_ids(dir: &Path) -> Result<BTreeSet<String>, StoreError> {
    let mut ids = BTreeSet::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| StoreError::Io {
            path: dir.to_path_buf(),
            source: e.into(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            tracing::warn!(path = %path.display(), "skipping non UTF-8 file name");
            continue;
        };
        if stem.starts_with('.') {
            continue;
        }
        ids.insert(stem.to_string());
    }
    Ok(ids)
}
