/// Conversions between diesel models and manga list entities.
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::modules::manga_list::domain::entities::{
    MangaList, MangaListChanges, MangaListItem, MangaListItemChanges, MangaSummary,
    MangaTranslation, NewMangaList,
};
use crate::modules::manga_list::infrastructure::models::*;

pub fn list_from_model(model: MangaListModel, items_count: i64, likes_count: i64) -> MangaList {
    MangaList {
        id: model.id,
        owner_id: model.owner_id,
        name: model.name,
        cover: model.cover,
        mood: model.mood,
        description: model.description,
        status: model.status,
        is_default: model.is_default,
        created_at: model.created_at,
        updated_at: model.updated_at,
        items_count,
        likes_count,
        items: Vec::new(),
    }
}

pub fn item_from_model(model: MangaListItemModel, manga: Option<MangaSummary>) -> MangaListItem {
    MangaListItem {
        id: model.id,
        list_id: model.list_id,
        manga_id: model.manga_id,
        order: model.order_value,
        note: model.note,
        added_at: model.added_at,
        manga,
    }
}

pub fn summary_from_models(
    manga: MangaModel,
    translations: Vec<MangaTranslationModel>,
) -> MangaSummary {
    MangaSummary {
        id: manga.id,
        cover: manga.cover,
        external_ref: manga.external_ref,
        translations: translations
            .into_iter()
            .map(|t| MangaTranslation {
                language: t.language,
                name: t.name,
                description: t.description,
            })
            .collect(),
    }
}

pub fn new_list_model(list: NewMangaList, now: DateTime<Utc>) -> NewMangaListModel {
    NewMangaListModel {
        id: Uuid::new_v4(),
        owner_id: list.owner_id,
        name: list.name,
        cover: list.cover,
        mood: list.mood,
        description: list.description,
        status: list.status,
        is_default: list.is_default,
        created_at: now,
        updated_at: now,
    }
}

pub fn list_changeset(changes: MangaListChanges, now: DateTime<Utc>) -> MangaListChangeset {
    MangaListChangeset {
        name: changes.name,
        cover: changes.cover,
        mood: changes.mood,
        description: changes.description,
        status: changes.status,
        is_default: changes.is_default,
        updated_at: now,
    }
}

pub fn new_item_model(
    list_id: Uuid,
    manga_id: Uuid,
    order: i32,
    note: Option<String>,
    now: DateTime<Utc>,
) -> NewMangaListItemModel {
    NewMangaListItemModel {
        id: Uuid::new_v4(),
        list_id,
        manga_id,
        order_value: order,
        note,
        added_at: now,
    }
}

pub fn item_changeset(changes: MangaListItemChanges) -> MangaListItemChangeset {
    MangaListItemChangeset {
        order_value: changes.order,
        note: changes.note,
    }
}
