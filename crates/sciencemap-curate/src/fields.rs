//! Field taxonomy: fold free-form discipline labels into eleven categories.
//!
//! `field` carries Chinese labels and `field_en` English ones; each has its
//! own table and its own catch-all category.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeSet;

use sciencemap_store::{list_record_ids, DatasetConfig, StoreError};

use crate::{rewrite_events, PassSummary};

/// One language's label table.
#[derive(Debug, Clone, Copy)]
pub struct Taxonomy {
    /// Record key holding the label list.
    pub key: &'static str,
    pub categories: &'static [&'static str],
    /// Catch-all, kept only when nothing more specific matched.
    pub fallback: &'static str,
    mapping: &'static [(&'static str, &'static str)],
}

impl Taxonomy {
    /// Category for a known label.
    pub fn category(&self, label: &str) -> Option<&'static str> {
        self.mapping
            .iter()
            .find(|(from, _)| *from == label)
            .map(|(_, to)| *to)
    }

    /// Sorted, de-duplicated categories for `labels`. Unknown labels fall back
    /// to the catch-all, which only survives if nothing else matched.
    pub fn standardize<S: AsRef<str>>(&self, labels: &[S]) -> Vec<String> {
        let mut specific = BTreeSet::new();
        for label in labels {
            let label = label.as_ref();
            match self.category(label) {
                Some(cat) if cat != self.fallback => {
                    specific.insert(cat);
                }
                Some(_) => {}
                None => tracing::warn!(key = self.key, label, "unmapped field label"),
            }
        }
        if specific.is_empty() {
            return vec![self.fallback.to_string()];
        }
        specific.into_iter().map(str::to_string).collect()
    }
}

pub const CHINESE_FIELDS: Taxonomy = Taxonomy {
    key: "field",
    categories: &[
        "物理学", "数学", "哲学", "天文学", "化学", "生物学", "工程学", "地理学", "医学", "计算机", "综合",
    ],
    fallback: "综合",
    mapping: &[
        ("物理学", "物理学"),
        ("物理", "物理学"),
        ("力学", "物理学"),
        ("热力学", "物理学"),
        ("光学", "物理学"),
        ("量子力学", "物理学"),
        ("统计力学", "物理学"),
        ("流体静力学", "物理学"),
        ("静力学", "物理学"),
        ("运动学", "物理学"),
        ("材料力学", "物理学"),
        ("气体动力学", "物理学"),
        ("液压学", "物理学"),
        ("引力", "物理学"),
        ("时空", "物理学"),
        ("气象学", "物理学"),
        ("Pneumatics", "物理学"),
        ("数学", "数学"),
        ("几何学", "数学"),
        ("三角学", "数学"),
        ("微积分", "数学"),
        ("微积分 (雏形)", "数学"),
        ("概率论", "数学"),
        ("组合数学", "数学"),
        ("逻辑", "数学"),
        ("逻辑学", "数学"),
        ("哲学", "哲学"),
        ("自然哲学", "哲学"),
        ("形而上学", "哲学"),
        ("认识论", "哲学"),
        ("本体论", "哲学"),
        ("伦理学", "哲学"),
        ("宗教", "哲学"),
        ("神秘主义", "哲学"),
        ("天文学", "天文学"),
        ("宇宙学", "天文学"),
        ("观测", "天文学"),
        ("化学", "化学"),
        ("生物学", "生物学"),
        ("工程学", "工程学"),
        ("发明", "工程学"),
        ("工业革命", "工程学"),
        ("材料科学", "工程学"),
        ("仪器制造", "工程学"),
        ("科学插画", "工程学"),
        ("地理学", "地理学"),
        ("医学", "医学"),
        ("计算机", "计算机"),
        ("计算机科学", "计算机"),
        ("科学方法", "综合"),
        ("音乐", "综合"),
    ],
};

pub const ENGLISH_FIELDS: Taxonomy = Taxonomy {
    key: "field_en",
    categories: &[
        "Physics",
        "Mathematics",
        "Philosophy",
        "Astronomy",
        "Chemistry",
        "Biology",
        "Engineering",
        "Geography",
        "Medicine",
        "Computer Science",
        "Comprehensive",
    ],
    fallback: "Comprehensive",
    mapping: &[
        ("Physics", "Physics"),
        ("Mechanics", "Physics"),
        ("Thermodynamics", "Physics"),
        ("Optics", "Physics"),
        ("Quantum Mechanics", "Physics"),
        ("Statistical Mechanics", "Physics"),
        ("Hydrostatics", "Physics"),
        ("Statics", "Physics"),
        ("Kinematics", "Physics"),
        ("Mechanics of Materials", "Physics"),
        ("Pneumatics", "Physics"),
        ("Hydraulics", "Physics"),
        ("Gravitation", "Physics"),
        ("Spacetime", "Physics"),
        ("Meteorology", "Physics"),
        ("Mathematics", "Mathematics"),
        ("Geometry", "Mathematics"),
        ("Trigonometry", "Mathematics"),
        ("Calculus", "Mathematics"),
        ("Calculus (Proto)", "Mathematics"),
        ("Probability Theory", "Mathematics"),
        ("Combinatorics", "Mathematics"),
        ("Logic", "Mathematics"),
        ("Philosophy", "Philosophy"),
        ("Natural Philosophy", "Philosophy"),
        ("Metaphysics", "Philosophy"),
        ("Epistemology", "Philosophy"),
        ("Ontology", "Philosophy"),
        ("Ethics", "Philosophy"),
        ("Religion", "Philosophy"),
        ("Mysticism", "Philosophy"),
        ("Astronomy", "Astronomy"),
        ("Cosmology", "Astronomy"),
        ("Observation", "Astronomy"),
        ("Chemistry", "Chemistry"),
        ("Biology", "Biology"),
        ("Engineering", "Engineering"),
        ("Invention", "Engineering"),
        ("Industrial Revolution", "Engineering"),
        ("Materials Science", "Engineering"),
        ("Instrumentation", "Engineering"),
        ("Scientific Illustration", "Engineering"),
        ("Geography", "Geography"),
        ("Medicine", "Medicine"),
        ("Computer Science", "Computer Science"),
        ("Scientific Method", "Comprehensive"),
        ("Music", "Comprehensive"),
    ],
};

/// Label list stored under `key`: an array of strings, or a single string.
/// `None` when the key is absent, empty, or holds something else.
pub fn labels(record: &Map<String, Value>, key: &str) -> Option<Vec<String>> {
    let labels: Vec<String> = match record.get(key)? {
        Value::String(s) => vec![s.clone()],
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => return None,
    };
    (!labels.is_empty()).then_some(labels)
}

/// Before/after labels of one rewritten Event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldChange {
    pub event: String,
    pub original_zh: Vec<String>,
    pub new_zh: Vec<String>,
    pub original_en: Vec<String>,
    pub new_en: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct FieldSummary {
    pub pass: PassSummary,
    pub changes: Vec<FieldChange>,
}

/// Apply `taxonomy` to `record`, returning the old and new labels.
/// Records without labels under the taxonomy's key are left alone.
fn apply(taxonomy: &Taxonomy, record: &mut Map<String, Value>) -> (Vec<String>, Vec<String>) {
    let Some(original) = labels(record, taxonomy.key) else {
        return (Vec::new(), Vec::new());
    };
    let mapped = taxonomy.standardize(&original);
    record.insert(taxonomy.key.to_string(), Value::from(mapped.clone()));
    (original, mapped)
}

/// Standardize `field` and `field_en` on every Event on disk.
pub fn standardize_fields(
    config: &DatasetConfig,
    dry_run: bool,
) -> Result<FieldSummary, StoreError> {
    let ids = list_record_ids(&config.events_dir)?;
    let mut changes = Vec::new();
    let pass = rewrite_events(config, &ids, dry_run, |id, record| {
        let before = record.clone();
        let (original_zh, new_zh) = apply(&CHINESE_FIELDS, record);
        let (original_en, new_en) = apply(&ENGLISH_FIELDS, record);
        if *record == before {
            return false;
        }
        changes.push(FieldChange {
            event: id.to_string(),
            original_zh,
            new_zh,
            original_en,
            new_en,
        });
        true
    })?;
    Ok(FieldSummary { pass, changes })
}
