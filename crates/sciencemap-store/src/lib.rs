//! Science map dataset storage
//!
//! The dataset is a directory tree of JSON documents:
//!
//! ```text
//! assets/
//! ├── events/<id>.json        one Event per file
//! ├── people/<id>.json        one Person per file
//! ├── events_index.json       ["<event id>", ...]
//! └── people_index.json       ["<person id>", ...]
//! ```
//!
//! This crate owns that layout (`DatasetConfig`), the index files, and record
//! IO. Index problems are fatal (`StoreError`); single-record problems are
//! reported as `RecordError` so callers can skip and continue.

pub mod config;
pub mod drift;
pub mod error;
pub mod index;
pub mod records;

pub use config::*;
pub use drift::*;
pub use error::*;
pub use index::*;
pub use records::*;
