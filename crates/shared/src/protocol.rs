use serde::{Deserialize, Serialize};

use crate::domain::{ContainerId, Entry, EntryId, TierId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DragKind {
    #[serde(alias = "BANGUMI")]
    Entry,
    Tier,
}

/// Payload attached by the rendering layer at drag-start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragPayload {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: DragKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_container_id: Option<ContainerId>,
}

impl DragPayload {
    pub fn entry(id: &EntryId, source: ContainerId) -> Self {
        Self {
            id: id.0.clone(),
            kind: DragKind::Entry,
            source_container_id: Some(source),
        }
    }

    pub fn tier(id: &TierId) -> Self {
        Self {
            id: id.0.clone(),
            kind: DragKind::Tier,
            source_container_id: None,
        }
    }
}

/// One record of an import file. Every field is optional on the wire so that
/// incomplete records can be filtered instead of failing the whole payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, alias = "coverBase64")]
    pub cover: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

impl From<&Entry> for ImportRecord {
    fn from(entry: &Entry) -> Self {
        Self {
            id: Some(entry.id.0.clone()),
            title: Some(entry.title.clone()),
            cover: Some(entry.cover.clone()),
            rating: entry.rating.map(|r| r as f64),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierExport {
    pub id: TierId,
    pub name: String,
    pub color: String,
    pub items: Vec<EntryId>,
}

/// Tier/entry-id structure handed to the export packaging step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSnapshot {
    pub tiers: Vec<TierExport>,
}

/// Container membership stored next to an entries file. Ratings alone cannot
/// say whether a rated entry sits in the pool, so the pool is listed too.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardLayout {
    #[serde(flatten)]
    pub snapshot: ExportSnapshot,
    #[serde(default)]
    pub unassigned: Vec<EntryId>,
}
