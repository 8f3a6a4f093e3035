//! Attach illustration URLs to Events.

use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use sciencemap_model::EntityKind;
use sciencemap_store::{read_json_input, DatasetConfig, StoreError};

use crate::{rewrite_events, PassSummary};

pub const IMAGE_URL_FIELD: &str = "image_url";

/// Event id → image URL, as read from a `{"<id>": "<url>", ...}` file.
pub type ImageTable = BTreeMap<String, String>;

pub fn load_image_table(path: &Path) -> Result<ImageTable, StoreError> {
    read_json_input(path)
}

#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct ImageSummary {
    pub pass: PassSummary,
    /// Ids in the table with no Event record.
    pub unknown: Vec<String>,
}

/// Set `image_url` on every Event named in `table`. Records that already carry
/// the same URL are left untouched.
pub fn inject_image_urls(
    config: &DatasetConfig,
    table: &ImageTable,
) -> Result<ImageSummary, StoreError> {
    let mut unknown = Vec::new();
    let mut ids = BTreeSet::new();
    for id in table.keys() {
        if config.record_path(EntityKind::Event, id).exists() {
            ids.insert(id.clone());
        } else {
            tracing::warn!(id = id.as_str(), "image table names an event with no record");
            unknown.push(id.clone());
        }
    }

    let pass = rewrite_events(config, &ids, false, |id, record| {
        let Some(url) = table.get(id) else {
            return false;
        };
        if record.get(IMAGE_URL_FIELD).and_then(Value::as_str) == Some(url.as_str()) {
            return false;
        }
        record.insert(IMAGE_URL_FIELD.to_string(), Value::String(url.clone()));
        true
    })?;
    Ok(ImageSummary { pass, unknown })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::Fixture;
    use serde_json::json;

    #[test]
    fn sets_urls_once() {
        let fx = Fixture::new();
        fx.event(json!({"id": "newton_laws_1687", "title": "Laws"}));
        fx.event(json!({"id": "dna_1953", "image_url": "https://x/dna.png"}));

        let table: ImageTable = [
            ("newton_laws_1687", "https://x/newton.jpg"),
            ("dna_1953", "https://x/dna.png"),
            ("moon_landing_1969", "https://x/moon.jpg"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let summary = inject_image_urls(&fx.config, &table).unwrap();
        assert_eq!(summary.pass.changed, vec!["newton_laws_1687"]);
        assert_eq!(summary.unknown, vec!["moon_landing_1969"]);
        assert_eq!(
            fx.read_event("newton_laws_1687"),
            json!({"id": "newton_laws_1687", "title": "Laws", "image_url": "https://x/newton.jpg"})
        );

        let again = inject_image_urls(&fx.config, &table).unwrap();
        assert!(again.pass.changed.is_empty());
    }

    #[test]
    fn table_must_map_strings() {
        let fx = Fixture::new();
        let path = fx.config.events_dir.join("../images.json");
        std::fs::write(&path, r#"{"a": 1}"#).unwrap();
        assert!(matches!(
            load_image_table(&path),
            Err(StoreError::InputMalformed { .. })
        ));
    }
}
