//! Inventory of the field labels in use, before (or after) standardizing.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::PathBuf;

use sciencemap_model::EntityKind;
use sciencemap_store::{list_record_ids, read_record, DatasetConfig, StoreError};

use crate::fields::{labels, CHINESE_FIELDS, ENGLISH_FIELDS};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldCombination {
    pub event: String,
    pub fields_zh: Vec<String>,
    pub fields_en: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct FieldCensus {
    pub fields_zh: BTreeSet<String>,
    pub fields_en: BTreeSet<String>,
    pub combinations: Vec<FieldCombination>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<PathBuf>,
}

pub fn field_census(config: &DatasetConfig) -> Result<FieldCensus, StoreError> {
    let mut census = FieldCensus::default();
    for id in list_record_ids(&config.events_dir)? {
        let path = config.record_path(EntityKind::Event, &id);
        let value: Value = match read_record(&path) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(id = id.as_str(), error = %e, "skipping unreadable record");
                census.skipped.push(path);
                continue;
            }
        };
        let Some(record) = value.as_object() else {
            census.skipped.push(path);
            continue;
        };

        let zh = labels(record, CHINESE_FIELDS.key).unwrap_or_default();
        let en = labels(record, ENGLISH_FIELDS.key).unwrap_or_default();
        if zh.is_empty() && en.is_empty() {
            continue;
        }
        census.fields_zh.extend(zh.iter().cloned());
        census.fields_en.extend(en.iter().cloned());
        let event = record
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or(id.as_str())
            .to_string();
        census.combinations.push(FieldCombination {
            event,
            fields_zh: zh,
            fields_en: en,
        });
    }
    Ok(census)
}
