/// Display shapes returned to the calling layer.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::value_objects::MangaListStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MangaListView {
    pub id: Uuid,
    pub owner_id: Option<Uuid>,
    pub name: String,
    pub cover: String,
    pub mood: String,
    pub description: Option<String>,
    pub status: MangaListStatus,
    pub is_default: bool,
    pub items_count: i64,
    pub likes_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub items: Vec<MangaListItemView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MangaListItemView {
    pub id: Uuid,
    pub manga_id: Uuid,
    pub order: i32,
    pub note: Option<String>,
    pub added_at: DateTime<Utc>,
    pub manga: Option<MangaView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MangaView {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub cover: Option<String>,
    pub external_ref: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkAddResult {
    pub added: usize,
    pub skipped: usize,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MangaListStats {
    pub total_items: usize,
    pub likes_count: i64,
    /// 0.0 for an empty list
    pub average_order: f64,
    pub has_notes: bool,
    pub items_with_notes: usize,
    pub days_since_created: i64,
    pub days_since_updated: i64,
}
