use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::manga_list_item::MangaListItem;
use crate::modules::manga_list::domain::value_objects::MangaListStatus;

/// A named, ordered collection of manga references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MangaList {
    pub id: Uuid,
    pub owner_id: Option<Uuid>,
    pub name: String,
    pub cover: String,
    pub mood: String,
    pub description: Option<String>,
    pub status: MangaListStatus,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Derived, never stored
    pub items_count: i64,
    /// Derived, never stored
    pub likes_count: i64,
    /// Empty unless the list was loaded together with its members
    pub items: Vec<MangaListItem>,
}

impl MangaList {
    pub fn with_items(mut self, items: Vec<MangaListItem>) -> Self {
        self.items_count = items.len() as i64;
        self.items = items;
        self
    }
}

/// Caller input for creating a list, before normalization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMangaListData {
    pub owner_id: Option<Uuid>,
    pub name: String,
    pub cover: String,
    pub mood: String,
    pub description: Option<String>,
    pub status: Option<MangaListStatus>,
    pub is_default: Option<bool>,
}

/// Caller input for a partial list update, before normalization.
///
/// A blank `description` clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMangaListData {
    pub name: Option<String>,
    pub cover: Option<String>,
    pub mood: Option<String>,
    pub description: Option<String>,
    pub status: Option<MangaListStatus>,
    pub is_default: Option<bool>,
}

/// Normalized list ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMangaList {
    pub owner_id: Option<Uuid>,
    pub name: String,
    pub cover: String,
    pub mood: String,
    pub description: Option<String>,
    pub status: MangaListStatus,
    pub is_default: bool,
}

/// Normalized partial update. `None` leaves a field untouched;
/// `description: Some(None)` clears the description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MangaListChanges {
    pub name: Option<String>,
    pub cover: Option<String>,
    pub mood: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<MangaListStatus>,
    pub is_default: Option<bool>,
}

impl MangaListChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.cover.is_none()
            && self.mood.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.is_default.is_none()
    }
}
