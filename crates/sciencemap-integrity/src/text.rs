//! Event ids embedded in free text as backtick-quoted tokens
//! (`` see `kepler_laws_1609` ``).

use regex::Regex;
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::OnceLock;

use sciencemap_model::EventRecord;

/// Free-text fields that may quote Event ids.
pub const FREE_TEXT_FIELDS: [&str; 7] = [
    "summary",
    "narrative",
    "simplified_explanation",
    "impact",
    "applications",
    "trivia",
    "quiz",
];

fn embedded_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"`([a-z_]+_(?:BC)?[0-9]+)`").expect("embedded id pattern compiles")
    })
}

/// Backtick-quoted ids in one string, in order of appearance.
pub fn embedded_ids(text: &str) -> Vec<&str> {
    embedded_id_pattern()
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// Every string leaf under `value`: a bare string, the values of a text
/// object (`{"zh": .., "en": ..}`), or arrays of either.
pub fn collect_strings<'a>(value: &'a Value, out: &mut Vec<&'a str>) {
    match value {
        Value::String(s) => out.push(s),
        Value::Array(items) => items.iter().for_each(|v| collect_strings(v, out)),
        Value::Object(map) => map.values().for_each(|v| collect_strings(v, out)),
        _ => {}
    }
}

/// Ids quoted anywhere in the free-text fields of an Event.
pub fn record_mentions(record: &EventRecord) -> BTreeSet<String> {
    let mut strings = Vec::new();
    for field in FREE_TEXT_FIELDS {
        if let Some(value) = record.extra.get(field) {
            collect_strings(value, &mut strings);
        }
    }
    strings
        .into_iter()
        .flat_map(embedded_ids)
        .map(str::to_string)
        .collect()
}
