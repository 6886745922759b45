use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::modules::manga_list::domain::value_objects::MangaListStatus;
use crate::schema::{manga, manga_list_items, manga_lists, manga_translations};

// ================== LIST MODELS ==================

/// Row of `manga_lists`; field order follows the table definition
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = manga_lists)]
pub struct MangaListModel {
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
}

#[derive(Insertable, Debug)]
#[diesel(table_name = manga_lists)]
pub struct NewMangaListModel {
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
}

/// Partial update; `description: Some(None)` writes NULL.
/// `updated_at` is always set so the changeset is never empty.
#[derive(AsChangeset, Debug)]
#[diesel(table_name = manga_lists)]
pub struct MangaListChangeset {
    pub name: Option<String>,
    pub cover: Option<String>,
    pub mood: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<MangaListStatus>,
    pub is_default: Option<bool>,
    pub updated_at: DateTime<Utc>,
}

// ================== MEMBERSHIP MODELS ==================

#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone)]
#[diesel(belongs_to(MangaListModel, foreign_key = list_id))]
#[diesel(table_name = manga_list_items)]
pub struct MangaListItemModel {
    pub id: Uuid,
    pub list_id: Uuid,
    pub manga_id: Uuid,
    pub order_value: i32,
    pub note: Option<String>,
    pub added_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = manga_list_items)]
pub struct NewMangaListItemModel {
    pub id: Uuid,
    pub list_id: Uuid,
    pub manga_id: Uuid,
    pub order_value: i32,
    pub note: Option<String>,
    pub added_at: DateTime<Utc>,
}

#[derive(AsChangeset, Debug, Default)]
#[diesel(table_name = manga_list_items)]
pub struct MangaListItemChangeset {
    pub order_value: Option<i32>,
    pub note: Option<Option<String>>,
}

// ================== CATALOG MODELS (read-only) ==================

#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = manga)]
pub struct MangaModel {
    pub id: Uuid,
    pub cover: Option<String>,
    pub external_ref: Option<String>,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone)]
#[diesel(belongs_to(MangaModel, foreign_key = manga_id))]
#[diesel(table_name = manga_translations)]
pub struct MangaTranslationModel {
    pub id: Uuid,
    pub manga_id: Uuid,
    pub language: String,
    pub name: String,
    pub description: Option<String>,
}
