//! Referential integrity for the science map dataset
//!
//! Pipeline, one pass each:
//!
//! ```text
//! load indices ──► scan records ──► diff ──► (stub) ──► persist index
//! ```
//!
//! - [`scan`]: collect referenced Event ids (influence chains, Person `events`,
//!   and optionally backtick-quoted ids in free text)
//! - [`check`]: report dangling links per direction, never repair
//! - [`stubs`]: write placeholder Events for dangling ids, then the union index
//! - [`missing`]: directory-driven gap report for manual follow-up
//!
//! Detection and repair are separate entrypoints: `check` is read-only,
//! `stubs` only adds files.

pub mod check;
pub mod missing;
pub mod scan;
pub mod stubs;
pub mod text;

pub use check::*;
pub use missing::*;
pub use scan::*;
pub use stubs::*;

#[cfg(test)]
pub(crate) mod fixture {
    use serde_json::Value;
    use tempfile::TempDir;

    use sciencemap_model::EntityKind;
    use sciencemap_store::DatasetConfig;

    /// A throwaway dataset with empty record directories and no index files.
    pub struct Fixture {
        _dir: TempDir,
        pub config: DatasetConfig,
    }

    impl Fixture {
        pub fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let config = DatasetConfig::from_root(dir.path());
            std::fs::create_dir_all(&config.events_dir).unwrap();
            std::fs::create_dir_all(&config.people_dir).unwrap();
            Self { _dir: dir, config }
        }

        fn write(&self, kind: EntityKind, value: Value) {
            let id = value["id"].as_str().unwrap().to_string();
            std::fs::write(
                self.config.record_path(kind, &id),
                serde_json::to_string_pretty(&value).unwrap(),
            )
            .unwrap();
        }

        pub fn event(&self, value: Value) {
            self.write(EntityKind::Event, value);
        }

        pub fn person(&self, value: Value) {
            self.write(EntityKind::Person, value);
        }

        pub fn raw_event(&self, id: &str, text: &str) {
            std::fs::write(self.config.record_path(EntityKind::Event, id), text).unwrap();
        }

        pub fn events_index(&self, ids: &[&str]) {
            std::fs::write(&self.config.events_index, serde_json::to_string(ids).unwrap())
                .unwrap();
        }

        pub fn people_index(&self, ids: &[&str]) {
            std::fs::write(&self.config.people_index, serde_json::to_string(ids).unwrap())
                .unwrap();
        }

        pub fn read_event(&self, id: &str) -> Value {
            let text =
                std::fs::read_to_string(self.config.record_path(EntityKind::Event, id)).unwrap();
            serde_json::from_str(&text).unwrap()
        }
    }
}
