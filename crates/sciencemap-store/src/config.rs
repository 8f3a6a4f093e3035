//! Dataset layout: where record directories and index files live.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use sciencemap_model::EntityKind;

use crate::StoreError;

/// File locations for one dataset. Every operation takes one of these
/// explicitly, so tests can point it at a temporary directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Directory holding one `<id>.json` per Event
    pub events_dir: PathBuf,
    /// Directory holding one `<id>.json` per Person
    pub people_dir: PathBuf,
    /// JSON array of every Event id
    pub events_index: PathBuf,
    /// JSON array of every Person id
    pub people_index: PathBuf,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self::from_root(".")
    }
}

impl DatasetConfig {
    /// Conventional layout under `root`: `assets/events`, `assets/people`,
    /// `assets/events_index.json`, `assets/people_index.json`.
    pub fn from_root(root: impl AsRef<Path>) -> Self {
        let assets = root.as_ref().join("assets");
        Self {
            events_dir: assets.join("events"),
            people_dir: assets.join("people"),
            events_index: assets.join("events_index.json"),
            people_index: assets.join("people_index.json"),
        }
    }

    pub fn record_dir(&self, kind: EntityKind) -> &Path {
        match kind {
            EntityKind::Event => &self.events_dir,
            EntityKind::Person => &self.people_dir,
        }
    }

    pub fn index_path(&self, kind: EntityKind) -> &Path {
        match kind {
            EntityKind::Event => &self.events_index,
            EntityKind::Person => &self.people_index,
        }
    }

    pub fn record_path(&self, kind: EntityKind, id: &str) -> PathBuf {
        self.record_dir(kind).join(format!("{id}.json"))
    }
}

/// Partial layout, as read from a config file or command-line flags.
/// Unset entries keep the value of the layer below.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatasetOverrides {
    #[serde(default)]
    pub events_dir: Option<PathBuf>,
    #[serde(default)]
    pub people_dir: Option<PathBuf>,
    #[serde(default)]
    pub events_index: Option<PathBuf>,
    #[serde(default)]
    pub people_index: Option<PathBuf>,
}

impl DatasetOverrides {
    /// Read overrides from a JSON config file. Relative paths are resolved
    /// against the directory containing the file.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let text = std::fs::read_to_string(path).map_err(StoreError::io(path))?;
        let overrides: DatasetOverrides =
            serde_json::from_str(&text).map_err(|source| StoreError::ConfigMalformed {
                path: path.to_path_buf(),
                source,
            })?;
        let base = path.parent().unwrap_or(Path::new("."));
        Ok(overrides.relative_to(base))
    }

    fn relative_to(self, base: &Path) -> Self {
        let resolve = |p: Option<PathBuf>| p.map(|p| if p.is_absolute() { p } else { base.join(p) });
        Self {
            events_dir: resolve(self.events_dir),
            people_dir: resolve(self.people_dir),
            events_index: resolve(self.events_index),
            people_index: resolve(self.people_index),
        }
    }

    pub fn apply(self, mut config: DatasetConfig) -> DatasetConfig {
        if let Some(p) = self.events_dir {
            config.events_dir = p;
        }
        if let Some(p) = self.people_dir {
            config.people_dir = p;
        }
        if let Some(p) = self.events_index {
            config.events_index = p;
        }
        if let Some(p) = self.people_index {
            config.people_index = p;
        }
        config
    }
}
