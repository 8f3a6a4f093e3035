use std::path::PathBuf;
use thiserror::Error;

/// Failures that stop an operation before it does any work.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("index file not found: {}", path.display())]
    IndexMissing { path: PathBuf },

    #[error("index file {} is not a JSON array of ids: {source}", path.display())]
    IndexMalformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("config file {} is malformed: {source}", path.display())]
    ConfigMalformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("input file {} is malformed: {source}", path.display())]
    InputMalformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize {}: {source}", path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> StoreError {
        let path = path.into();
        move |source| StoreError::Io { path, source }
    }
}

/// Failures reading a single record file. Scans treat these as skippable.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("record file not found: {}", path.display())]
    Missing { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("record file {} is malformed: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl RecordError {
    pub fn path(&self) -> &PathBuf {
        match self {
            RecordError::Missing { path }
            | RecordError::Io { path, .. }
            | RecordError::Malformed { path, .. } => path,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, RecordError::Missing { .. })
    }
}
