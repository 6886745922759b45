use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};

use super::ordering::dedupe_ids;
use crate::modules::manga_list::config::MangaListSettings;
use crate::modules::manga_list::domain::{
    entities::{
        BulkAddMangas, CreateMangaListData, MangaList, MangaListChanges, MangaListItem,
        MangaListItemChanges, MangaSummary, MangaTranslation, NewMangaList, NewMangaListItem,
        UpdateMangaListData, UpdateMangaListItemData,
    },
    value_objects::{BulkAddOutcome, ItemOrder, MangaListFilters, MangaListQuery},
    views::{BulkAddResult, MangaListItemView, MangaListStats, MangaListView, MangaView},
};
use crate::shared::application::PaginationParams;
use crate::shared::validation::{FieldRules, ValidationResult};

pub const NAME_MAX_LENGTH: usize = 100;
pub const COVER_MAX_LENGTH: usize = 500;
pub const MOOD_MAX_LENGTH: usize = 50;
pub const DESCRIPTION_MAX_LENGTH: usize = 1000;
pub const NOTE_MAX_LENGTH: usize = 500;
pub const BULK_ADD_MAX_ITEMS: usize = 100;

const UNTITLED: &str = "Untitled";

/// Pure business rules for manga lists: payload normalization and
/// validation, filter normalization, display projections and statistics.
///
/// Never touches storage.
#[derive(Debug, Clone, Default)]
pub struct MangaListDomainService {
    settings: MangaListSettings,
}

impl MangaListDomainService {
    pub fn new(settings: MangaListSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &MangaListSettings {
        &self.settings
    }

    // ---- lists ----

    /// Trim text fields, drop a blank description and apply defaults.
    pub fn normalize_create(&self, data: CreateMangaListData) -> NewMangaList {
        NewMangaList {
            owner_id: data.owner_id,
            name: data.name.trim().to_string(),
            cover: data.cover.trim().to_string(),
            mood: data.mood.trim().to_string(),
            description: non_blank(data.description),
            status: data.status.unwrap_or_default(),
            is_default: data.is_default.unwrap_or(false),
        }
    }

    pub fn validate_create(&self, list: &NewMangaList) -> ValidationResult {
        FieldRules::required_text("Name", &list.name, NAME_MAX_LENGTH)
            .merge(FieldRules::required_text("Cover", &list.cover, COVER_MAX_LENGTH))
            .merge(FieldRules::required_text("Mood", &list.mood, MOOD_MAX_LENGTH))
            .merge(FieldRules::optional_text(
                "Description",
                list.description.as_deref(),
                DESCRIPTION_MAX_LENGTH,
            ))
    }

    /// A present but blank description becomes "clear the description".
    pub fn normalize_update(&self, data: UpdateMangaListData) -> MangaListChanges {
        MangaListChanges {
            name: data.name.map(|v| v.trim().to_string()),
            cover: data.cover.map(|v| v.trim().to_string()),
            mood: data.mood.map(|v| v.trim().to_string()),
            description: data.description.map(|v| non_blank(Some(v))),
            status: data.status,
            is_default: data.is_default,
        }
    }

    pub fn validate_update(&self, changes: &MangaListChanges) -> ValidationResult {
        if changes.is_empty() {
            return ValidationResult::invalid("No fields to update".to_string());
        }

        let mut result = ValidationResult::valid();
        if let Some(name) = &changes.name {
            result = result.merge(FieldRules::required_text("Name", name, NAME_MAX_LENGTH));
        }
        if let Some(cover) = &changes.cover {
            result = result.merge(FieldRules::required_text("Cover", cover, COVER_MAX_LENGTH));
        }
        if let Some(mood) = &changes.mood {
            result = result.merge(FieldRules::required_text("Mood", mood, MOOD_MAX_LENGTH));
        }
        if let Some(Some(description)) = &changes.description {
            result = result.merge(FieldRules::max_length(
                "Description",
                description,
                DESCRIPTION_MAX_LENGTH,
            ));
        }
        result
    }

    // ---- items ----

    pub fn normalize_new_item(&self, item: NewMangaListItem) -> NewMangaListItem {
        NewMangaListItem {
            note: non_blank(item.note),
            ..item
        }
    }

    pub fn validate_new_item(&self, item: &NewMangaListItem) -> ValidationResult {
        ValidationResult::valid()
            .check(
                item.order.is_some_and(|order| order < 0),
                "Order must be a non-negative number",
            )
            .merge(FieldRules::optional_text(
                "Note",
                item.note.as_deref(),
                NOTE_MAX_LENGTH,
            ))
    }

    /// A present but blank note becomes "clear the note".
    pub fn normalize_item_update(&self, data: UpdateMangaListItemData) -> MangaListItemChanges {
        MangaListItemChanges {
            order: data.order,
            note: data.note.map(|v| non_blank(Some(v))),
        }
    }

    pub fn validate_item_changes(&self, changes: &MangaListItemChanges) -> ValidationResult {
        if changes.is_empty() {
            return ValidationResult::invalid("No fields to update".to_string());
        }

        let note = changes.note.as_ref().and_then(|n| n.as_deref());
        ValidationResult::valid()
            .check(
                changes.order.is_some_and(|order| order < 0),
                "Order must be a non-negative number",
            )
            .merge(FieldRules::optional_text("Note", note, NOTE_MAX_LENGTH))
    }

    pub fn validate_reorder(&self, orders: &[ItemOrder]) -> ValidationResult {
        if orders.is_empty() {
            return ValidationResult::invalid("At least one item order is required".to_string());
        }

        let mut seen = HashSet::with_capacity(orders.len());
        let has_duplicates = !orders.iter().all(|o| seen.insert(o.item_id));

        ValidationResult::valid()
            .check(has_duplicates, "Each item may appear only once in a reorder")
            .check(
                orders.iter().any(|o| o.order < 0),
                "Order must be a non-negative number",
            )
    }

    /// Collapse repeated ids and drop blank notes.
    pub fn normalize_bulk(&self, data: BulkAddMangas) -> BulkAddMangas {
        let manga_ids = dedupe_ids(&data.manga_ids);
        let notes: HashMap<_, _> = data
            .notes
            .into_iter()
            .filter_map(|(id, note)| non_blank(Some(note)).map(|note| (id, note)))
            .collect();

        BulkAddMangas { manga_ids, notes }
    }

    pub fn validate_bulk(&self, data: &BulkAddMangas) -> ValidationResult {
        let mut result = ValidationResult::valid()
            .check(data.manga_ids.is_empty(), "At least one manga id is required")
            .check(
                data.manga_ids.len() > BULK_ADD_MAX_ITEMS,
                format!(
                    "Cannot add more than {} mangas at once",
                    BULK_ADD_MAX_ITEMS
                ),
            );

        if data
            .notes
            .values()
            .any(|note| note.chars().count() > NOTE_MAX_LENGTH)
        {
            result = result.with_error(format!(
                "Note too long (max {} characters)",
                NOTE_MAX_LENGTH
            ));
        }
        result
    }

    // ---- queries ----

    /// Clamp pagination, trim text filters and apply sort defaults.
    pub fn normalize_filters(&self, filters: MangaListFilters) -> MangaListQuery {
        MangaListQuery {
            owner_id: filters.owner_id,
            status: filters.status,
            mood: non_blank(filters.mood),
            search: non_blank(filters.search),
            sort_by: filters.sort_by.unwrap_or_default(),
            sort_order: filters.sort_order.unwrap_or_default(),
            pagination: PaginationParams::clamped(
                filters.page,
                filters.limit,
                self.settings.default_page_size,
                self.settings.max_page_size,
            ),
        }
    }

    // ---- projections ----

    /// Title in the preferred language, else the first named translation,
    /// else "Untitled".
    pub fn display_title(&self, manga: &MangaSummary) -> String {
        self.pick_translation(&manga.translations)
            .map(|t| t.name.trim().to_string())
            .unwrap_or_else(|| UNTITLED.to_string())
    }

    fn pick_translation<'a>(
        &self,
        translations: &'a [MangaTranslation],
    ) -> Option<&'a MangaTranslation> {
        let preferred = self.settings.preferred_language.as_str();
        let named = || translations.iter().filter(|t| !t.name.trim().is_empty());

        named()
            .find(|t| language_matches(&t.language, preferred))
            .or_else(|| named().next())
    }

    pub fn to_manga_view(&self, manga: MangaSummary) -> MangaView {
        let translation = self.pick_translation(&manga.translations);
        let title = translation
            .map(|t| t.name.trim().to_string())
            .unwrap_or_else(|| UNTITLED.to_string());
        let description = translation.and_then(|t| t.description.clone());

        MangaView {
            id: manga.id,
            title,
            description,
            cover: manga.cover,
            external_ref: manga.external_ref,
        }
    }

    pub fn to_item_view(&self, item: MangaListItem) -> MangaListItemView {
        MangaListItemView {
            id: item.id,
            manga_id: item.manga_id,
            order: item.order,
            note: item.note,
            added_at: item.added_at,
            manga: item.manga.map(|m| self.to_manga_view(m)),
        }
    }

    pub fn to_list_view(&self, list: MangaList) -> MangaListView {
        MangaListView {
            id: list.id,
            owner_id: list.owner_id,
            name: list.name,
            cover: list.cover,
            mood: list.mood,
            description: list.description,
            status: list.status,
            is_default: list.is_default,
            items_count: list.items_count,
            likes_count: list.likes_count,
            created_at: list.created_at,
            updated_at: list.updated_at,
            items: list
                .items
                .into_iter()
                .map(|item| self.to_item_view(item))
                .collect(),
        }
    }

    pub fn bulk_add_result(&self, outcome: BulkAddOutcome) -> BulkAddResult {
        let message = match (outcome.added, outcome.skipped) {
            (0, skipped) => format!(
                "No mangas were added ({} skipped: already in the list or not found)",
                skipped
            ),
            (added, 0) => format!("Added {} manga(s) to the list", added),
            (added, skipped) => format!(
                "Added {} manga(s) to the list, {} skipped (already in the list or not found)",
                added, skipped
            ),
        };

        BulkAddResult {
            added: outcome.added,
            skipped: outcome.skipped,
            message,
        }
    }

    /// Statistics over a list loaded with its items.
    pub fn calculate_stats(&self, list: &MangaList, now: DateTime<Utc>) -> MangaListStats {
        let total_items = list.items.len();
        let items_with_notes = list
            .items
            .iter()
            .filter(|item| item.note.as_deref().is_some_and(|n| !n.trim().is_empty()))
            .count();
        let average_order = if total_items == 0 {
            0.0
        } else {
            list.items.iter().map(|item| item.order as f64).sum::<f64>() / total_items as f64
        };

        MangaListStats {
            total_items,
            likes_count: list.likes_count,
            average_order,
            has_notes: items_with_notes > 0,
            items_with_notes,
            days_since_created: (now - list.created_at).num_days().max(0),
            days_since_updated: (now - list.updated_at).num_days().max(0),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// `en` matches `en`, `EN` and `en-US`.
fn language_matches(language: &str, preferred: &str) -> bool {
    let language = language.trim();
    language.eq_ignore_ascii_case(preferred)
        || language
            .split(['-', '_'])
            .next()
            .is_some_and(|primary| primary.eq_ignore_ascii_case(preferred))
}
