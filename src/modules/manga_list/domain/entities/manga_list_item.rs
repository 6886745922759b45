use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Membership of one catalog manga in one list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MangaListItem {
    pub id: Uuid,
    pub list_id: Uuid,
    pub manga_id: Uuid,
    pub order: i32,
    pub note: Option<String>,
    pub added_at: DateTime<Utc>,
    /// Read projection of the referenced manga, filled on read paths only
    pub manga: Option<MangaSummary>,
}

/// Read-only projection of a catalog manga.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MangaSummary {
    pub id: Uuid,
    pub cover: Option<String>,
    pub external_ref: Option<String>,
    pub translations: Vec<MangaTranslation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MangaTranslation {
    pub language: String,
    pub name: String,
    pub description: Option<String>,
}

/// Input for adding a single manga. A missing `order` is assigned
/// one past the current maximum.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMangaListItem {
    pub manga_id: Uuid,
    pub order: Option<i32>,
    pub note: Option<String>,
}

/// Caller input for updating a membership row, before normalization.
/// A blank `note` clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMangaListItemData {
    pub order: Option<i32>,
    pub note: Option<String>,
}

/// Normalized membership update; `note: Some(None)` clears the note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MangaListItemChanges {
    pub order: Option<i32>,
    pub note: Option<Option<String>>,
}

impl MangaListItemChanges {
    pub fn is_empty(&self) -> bool {
        self.order.is_none() && self.note.is_none()
    }
}

/// Input for inserting many manga in one call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkAddMangas {
    pub manga_ids: Vec<Uuid>,
    /// Optional per-manga notes keyed by manga id
    #[serde(default)]
    pub notes: HashMap<Uuid, String>,
}

impl BulkAddMangas {
    pub fn new(manga_ids: Vec<Uuid>) -> Self {
        Self {
            manga_ids,
            notes: HashMap::new(),
        }
    }

    pub fn note_for(&self, manga_id: &Uuid) -> Option<String> {
        self.notes.get(manga_id).cloned()
    }
}
