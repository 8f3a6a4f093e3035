//! Replace CJK curly double quotes (`“` `”`) with ASCII `"` inside string values.
//!
//! Editing the parsed document (not the raw text) means the replacement quote
//! is escaped on write, so the file always stays valid JSON.

use serde_json::Value;
use std::collections::BTreeSet;

use sciencemap_store::{list_record_ids, DatasetConfig, StoreError};

use crate::{rewrite_events, PassSummary};

pub const CURLY_DOUBLE_QUOTES: [char; 2] = ['\u{201C}', '\u{201D}'];

#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct QuoteSummary {
    pub pass: PassSummary,
    pub quotes_replaced: usize,
}

/// Normalize every string value under `value`; returns how many quotes changed.
pub fn normalize_quotes(value: &mut Value) -> usize {
    match value {
        Value::String(s) => {
            let count = s.chars().filter(|c| CURLY_DOUBLE_QUOTES.contains(c)).count();
            if count > 0 {
                *s = s.replace(|c: char| CURLY_DOUBLE_QUOTES.contains(&c), "\"");
            }
            count
        }
        Value::Array(items) => items.iter_mut().map(normalize_quotes).sum(),
        Value::Object(map) => map.values_mut().map(normalize_quotes).sum(),
        _ => 0,
    }
}

/// Normalize the named Events, or every Event on disk when `ids` is empty.
pub fn normalize_event_quotes(
    config: &DatasetConfig,
    ids: &[String],
) -> Result<QuoteSummary, StoreError> {
    let selected: BTreeSet<String> = if ids.is_empty() {
        list_record_ids(&config.events_dir)?
    } else {
        ids.iter().cloned().collect()
    };

    let mut replaced = 0;
    let pass = rewrite_events(config, &selected, false, |_, record| {
        let count: usize = record.values_mut().map(normalize_quotes).sum();
        replaced += count;
        count > 0
    })?;
    Ok(QuoteSummary {
        pass,
        quotes_replaced: replaced,
    })
}
