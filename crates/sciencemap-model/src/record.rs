//! Event and Person records, and the link vocabulary between them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

// ============================================================================
// Entity kinds and link directions
// ============================================================================

/// The two entity kinds stored in the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Event,
    Person,
}

impl EntityKind {
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Event => "event",
            EntityKind::Person => "person",
        }
    }

    /// Plural form, as used for directory and index names.
    pub fn plural(self) -> &'static str {
        match self {
            EntityKind::Event => "events",
            EntityKind::Person => "people",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The field through which one record references another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LinkDirection {
    /// Event → Person via `personId`.
    #[serde(rename = "personId")]
    PersonId,
    /// Person → Event via `events`.
    #[serde(rename = "events")]
    Events,
    /// Event → Event via `influence_chain.influenced_by`.
    #[serde(rename = "influenced_by")]
    InfluencedBy,
    /// Event → Event via `influence_chain.influenced`.
    #[serde(rename = "influenced")]
    Influenced,
    /// Event → Event via a backtick token inside free text.
    #[serde(rename = "mentions")]
    Mentions,
}

impl LinkDirection {
    pub fn field_name(self) -> &'static str {
        match self {
            LinkDirection::PersonId => "personId",
            LinkDirection::Events => "events",
            LinkDirection::InfluencedBy => "influenced_by",
            LinkDirection::Influenced => "influenced",
            LinkDirection::Mentions => "mentions",
        }
    }

    /// Kind of the record on the referencing side.
    pub fn source_kind(self) -> EntityKind {
        match self {
            LinkDirection::Events => EntityKind::Person,
            _ => EntityKind::Event,
        }
    }

    /// Kind of the record being referenced.
    pub fn target_kind(self) -> EntityKind {
        match self {
            LinkDirection::PersonId => EntityKind::Person,
            _ => EntityKind::Event,
        }
    }
}

impl fmt::Display for LinkDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

// ============================================================================
// Event records
// ============================================================================

/// `personId` is either a single id or a list of ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PersonRef {
    One(String),
    Many(Vec<String>),
}

impl PersonRef {
    /// Non-empty person ids, in document order.
    pub fn ids(&self) -> Vec<&str> {
        let all: Vec<&str> = match self {
            PersonRef::One(id) => vec![id.as_str()],
            PersonRef::Many(ids) => ids.iter().map(String::as_str).collect(),
        };
        all.into_iter().filter(|id| !id.is_empty()).collect()
    }
}

/// One entry of an influence chain list. Only `id` matters to the tooling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InfluenceLink {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InfluenceChain {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub influenced_by: Option<Vec<InfluenceLink>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub influenced: Option<Vec<InfluenceLink>>,
}

impl InfluenceChain {
    /// Every non-empty linked id, tagged with the side of the chain it came from.
    pub fn links(&self) -> Vec<(LinkDirection, &str)> {
        let mut out = Vec::new();
        let sides = [
            (LinkDirection::InfluencedBy, &self.influenced_by),
            (LinkDirection::Influenced, &self.influenced),
        ];
        for (direction, side) in sides {
            for link in side.iter().flatten() {
                if let Some(id) = link.id.as_deref().filter(|id| !id.is_empty()) {
                    out.push((direction, id));
                }
            }
        }
        out
    }
}

/// Typed view of an Event document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: String,
    #[serde(
        rename = "personId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub person_id: Option<PersonRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub influence_chain: Option<InfluenceChain>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EventRecord {
    pub fn person_ids(&self) -> Vec<&str> {
        self.person_id
            .as_ref()
            .map(PersonRef::ids)
            .unwrap_or_default()
    }

    pub fn influence_links(&self) -> Vec<(LinkDirection, &str)> {
        self.influence_chain
            .as_ref()
            .map(InfluenceChain::links)
            .unwrap_or_default()
    }
}

// ============================================================================
// Person records
// ============================================================================

/// Typed view of a Person document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub id: String,
    #[serde(default)]
    pub events: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
