//! Placeholder Event records inferred from an identifier.
//!
//! Identifiers follow the `words_words_<year>` convention, where the year token
//! is bare digits (`1687`), `AD`-prefixed (`AD1830`) or `BC`-prefixed (`BC570`).

use serde::{Deserialize, Serialize};

use crate::ID_SEPARATOR;

/// Minimal Event written to close a dangling reference.
///
/// Field order is the on-disk key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StubRecord {
    pub id: String,
    pub title: String,
    pub title_en: String,
    pub year: i64,
    pub is_stub: bool,
}

impl StubRecord {
    /// Build a stub with best-effort year and title.
    pub fn from_id(id: &str) -> Self {
        let year = parse_year(id).unwrap_or_else(|| {
            tracing::debug!(id, "no year token in identifier, using 0");
            0
        });
        let title = derive_title(id, year);
        Self {
            id: id.to_string(),
            title: title.clone(),
            title_en: title,
            year,
            is_stub: true,
        }
    }
}

/// Year encoded in the last segment of `id`, if any.
///
/// `BC570` → `-570`, `AD1830` → `1830`, `1687` → `1687`.
pub fn parse_year(id: &str) -> Option<i64> {
    let last = id.rsplit(ID_SEPARATOR).next()?;
    if let Some(digits) = last.strip_prefix("BC") {
        return parse_digits(digits).map(|year| -year);
    }
    parse_digits(last.strip_prefix("AD").unwrap_or(last))
}

fn parse_digits(text: &str) -> Option<i64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Human-readable title for `id`. The last segment is dropped when it
/// contains the digits of `year` (0 when no year was parsed, so any trailing
/// segment with a `0` in it goes too).
pub fn derive_title(id: &str, year: i64) -> String {
    let mut parts: Vec<&str> = id.split(ID_SEPARATOR).collect();
    let year_text = year.unsigned_abs().to_string();
    if parts.last().is_some_and(|last| last.contains(&year_text)) {
        parts.pop();
    }

    let title = parts
        .iter()
        .map(|part| capitalize(part))
        .collect::<Vec<_>>()
        .join(" ");
    if title.is_empty() {
        return capitalize(&id.replace(ID_SEPARATOR, " "));
    }
    title
}

/// Upper-case the first character and lower-case the rest.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_from_trailing_token() {
        assert_eq!(parse_year("newton_laws_1687"), Some(1687));
        assert_eq!(parse_year("pythagoras_theorem_BC570"), Some(-570));
        assert_eq!(parse_year("faraday_induction_AD1831"), Some(1831));
        assert_eq!(parse_year("scientific_method"), None);
        assert_eq!(parse_year("odd_BC"), None);
        assert_eq!(parse_year("odd_12a"), None);
        assert_eq!(parse_year("huge_99999999999"), Some(99_999_999_999));
        assert_eq!(parse_year("huge_99999999999999999999"), None);
    }

    #[test]
    fn title_drops_year_token() {
        assert_eq!(derive_title("newton_laws_1687", 1687), "Newton Laws");
        assert_eq!(
            derive_title("pythagoras_theorem_BC570", -570),
            "Pythagoras Theorem"
        );
        assert_eq!(derive_title("scientific_method", 0), "Scientific Method");
    }

    #[test]
    fn title_falls_back_when_only_year_remains() {
        assert_eq!(derive_title("1687", 1687), "1687");
        assert_eq!(derive_title("BC570", -570), "Bc570");
    }

    #[test]
    fn unparsable_year_matches_zero() {
        let stub = StubRecord::from_id("dna_structure_v20");
        assert_eq!(stub.year, 0);
        assert_eq!(stub.title, "Dna Structure");

        let stub = StubRecord::from_id("dna_structure_v2");
        assert_eq!(stub.year, 0);
        assert_eq!(stub.title, "Dna Structure V2");
    }

    #[test]
    fn long_digit_run_is_still_a_year() {
        let stub = StubRecord::from_id("huge_99999999999");
        assert_eq!(stub.year, 99_999_999_999);
        assert_eq!(stub.title, "Huge");
    }

    #[test]
    fn stub_has_expected_shape() {
        let stub = StubRecord::from_id("newton_laws_1687");
        let value = serde_json::to_value(&stub).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": "newton_laws_1687",
                "title": "Newton Laws",
                "title_en": "Newton Laws",
                "year": 1687,
                "is_stub": true
            })
        );
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["id", "title", "title_en", "year", "is_stub"]);
    }
}
