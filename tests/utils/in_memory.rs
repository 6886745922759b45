/// In-memory stand-in for the three manga list repositories
///
/// One store implements every trait so a use case can be wired over shared
/// state. Writes mimic the relational store: list deletion cascades to
/// members, reorder is all-or-nothing, item reads are ordered by `order`
/// then insertion.
use async_trait::async_trait;
use chrono::Utc;
use manga_lists::modules::manga_list::domain::{
    entities::{
        BulkAddMangas, MangaList, MangaListChanges, MangaListItem, MangaListItemChanges,
        MangaSummary, NewMangaList, NewMangaListItem,
    },
    repositories::{MangaListItemRepository, MangaListRepository, ValidationRepository},
    services::ordering::{
        classify_bulk_candidates, dedupe_ids, next_order_after, order_range_exhausted,
        plan_bulk_insert,
    },
    value_objects::{
        BulkAddOutcome, BulkValidation, ItemOrder, MangaListQuery, MangaListSortBy, SortOrder,
    },
};
use manga_lists::shared::application::PaginatedResult;
use manga_lists::shared::errors::{AppError, AppResult};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use uuid::Uuid;

#[derive(Default)]
struct State {
    catalog: HashMap<Uuid, MangaSummary>,
    lists: Vec<MangaList>,
    /// Insertion order doubles as the `added_at` tie-breaker
    items: Vec<MangaListItem>,
    likes: HashMap<Uuid, i64>,
    /// Fail a reorder after applying this many entries
    reorder_failure_after: Option<usize>,
}

impl State {
    fn next_order(&self, list_id: Uuid) -> AppResult<i32> {
        next_order_after(
            self.items
                .iter()
                .filter(|i| i.list_id == list_id)
                .map(|i| i.order)
                .max(),
        )
        .ok_or_else(|| order_range_exhausted(list_id))
    }

    fn members_of(&self, list_id: Uuid) -> Vec<MangaListItem> {
        let mut members: Vec<MangaListItem> = self
            .items
            .iter()
            .filter(|i| i.list_id == list_id)
            .cloned()
            .collect();
        // stable: equal orders keep insertion order
        members.sort_by_key(|i| i.order);
        members
    }

    fn with_counts(&self, list: &MangaList) -> MangaList {
        let mut list = list.clone();
        list.items_count = self.items.iter().filter(|i| i.list_id == list.id).count() as i64;
        list.likes_count = self.likes.get(&list.id).copied().unwrap_or(0);
        list
    }

    fn classify(&self, list_id: Uuid, candidates: &[Uuid]) -> BulkValidation {
        let in_catalog: HashSet<Uuid> = self.catalog.keys().copied().collect();
        let members: HashSet<Uuid> = self
            .items
            .iter()
            .filter(|i| i.list_id == list_id)
            .map(|i| i.manga_id)
            .collect();
        classify_bulk_candidates(candidates, &in_catalog, &members)
    }

    fn new_item(&self, list_id: Uuid, manga_id: Uuid, order: i32, note: Option<String>) -> MangaListItem {
        MangaListItem {
            id: Uuid::new_v4(),
            list_id,
            manga_id,
            order,
            note,
            added_at: Utc::now(),
            manga: self.catalog.get(&manga_id).cloned(),
        }
    }
}

#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_catalog_manga(&self, manga: MangaSummary) -> Uuid {
        let id = manga.id;
        self.state.lock().unwrap().catalog.insert(id, manga);
        id
    }

    pub fn set_likes(&self, list_id: Uuid, likes: i64) {
        self.state.lock().unwrap().likes.insert(list_id, likes);
    }

    pub fn fail_reorder_after(&self, applied: usize) {
        self.state.lock().unwrap().reorder_failure_after = Some(applied);
    }

    /// Membership rows across every list
    pub fn total_items(&self) -> usize {
        self.state.lock().unwrap().items.len()
    }
}

#[async_trait]
impl ValidationRepository for InMemoryStore {
    async fn manga_exists(&self, manga_id: Uuid) -> AppResult<bool> {
        Ok(self.state.lock().unwrap().catalog.contains_key(&manga_id))
    }

    async fn mangas_exist(&self, manga_ids: &[Uuid]) -> AppResult<Vec<Uuid>> {
        let state = self.state.lock().unwrap();
        Ok(dedupe_ids(manga_ids)
            .into_iter()
            .filter(|id| state.catalog.contains_key(id))
            .collect())
    }

    async fn list_exists(&self, list_id: Uuid) -> AppResult<bool> {
        Ok(self.state.lock().unwrap().lists.iter().any(|l| l.id == list_id))
    }

    async fn item_exists(&self, list_id: Uuid, item_id: Uuid) -> AppResult<bool> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .items
            .iter()
            .any(|i| i.id == item_id && i.list_id == list_id))
    }

    async fn manga_in_list(&self, list_id: Uuid, manga_id: Uuid) -> AppResult<bool> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .items
            .iter()
            .any(|i| i.list_id == list_id && i.manga_id == manga_id))
    }

    async fn get_next_order(&self, list_id: Uuid) -> AppResult<i32> {
        self.state.lock().unwrap().next_order(list_id)
    }

    async fn can_reorder_items(&self, list_id: Uuid, item_ids: &[Uuid]) -> AppResult<bool> {
        let state = self.state.lock().unwrap();
        Ok(item_ids
            .iter()
            .all(|id| state.items.iter().any(|i| i.id == *id && i.list_id == list_id)))
    }

    async fn validate_bulk_operation(
        &self,
        list_id: Uuid,
        candidate_ids: &[Uuid],
    ) -> AppResult<BulkValidation> {
        Ok(self.state.lock().unwrap().classify(list_id, candidate_ids))
    }
}

#[async_trait]
impl MangaListItemRepository for InMemoryStore {
    async fn add_item(&self, list_id: Uuid, item: NewMangaListItem) -> AppResult<MangaListItem> {
        let mut state = self.state.lock().unwrap();
        let order = match item.order {
            Some(order) => order,
            None => state.next_order(list_id)?,
        };
        let created = state.new_item(list_id, item.manga_id, order, item.note);
        state.items.push(created.clone());
        Ok(created)
    }

    async fn remove_item(&self, list_id: Uuid, item_id: Uuid) -> AppResult<bool> {
        let mut state = self.state.lock().unwrap();
        let before = state.items.len();
        state
            .items
            .retain(|i| !(i.id == item_id && i.list_id == list_id));
        Ok(state.items.len() < before)
    }

    async fn update_item(
        &self,
        list_id: Uuid,
        item_id: Uuid,
        changes: MangaListItemChanges,
    ) -> AppResult<Option<MangaListItem>> {
        let mut state = self.state.lock().unwrap();
        let Some(item) = state
            .items
            .iter_mut()
            .find(|i| i.id == item_id && i.list_id == list_id)
        else {
            return Ok(None);
        };

        if let Some(order) = changes.order {
            item.order = order;
        }
        if let Some(note) = changes.note {
            item.note = note;
        }
        Ok(Some(item.clone()))
    }

    async fn reorder_items(&self, list_id: Uuid, items: Vec<ItemOrder>) -> AppResult<usize> {
        let mut state = self.state.lock().unwrap();
        let snapshot = state.items.clone();
        let failure_after = state.reorder_failure_after;

        let mut updated = 0;
        for (applied, entry) in items.iter().enumerate() {
            if failure_after == Some(applied) {
                state.items = snapshot;
                return Err(AppError::DatabaseError("simulated reorder failure".to_string()));
            }
            if let Some(item) = state
                .items
                .iter_mut()
                .find(|i| i.id == entry.item_id && i.list_id == list_id)
            {
                item.order = entry.order;
                updated += 1;
            }
        }
        Ok(updated)
    }

    async fn bulk_add_items(&self, list_id: Uuid, data: BulkAddMangas) -> AppResult<BulkAddOutcome> {
        let mut state = self.state.lock().unwrap();
        let requested = dedupe_ids(&data.manga_ids).len();

        let validation = state.classify(list_id, &data.manga_ids);
        if !validation.has_insertable() {
            return Ok(BulkAddOutcome::new(0, requested));
        }

        let start = state.next_order(list_id)?;
        let rows: Vec<MangaListItem> = plan_bulk_insert(&validation.valid_ids, start)
            .ok_or_else(|| order_range_exhausted(list_id))?
            .into_iter()
            .map(|(manga_id, order)| state.new_item(list_id, manga_id, order, data.note_for(&manga_id)))
            .collect();
        let added = rows.len();
        state.items.extend(rows);

        Ok(BulkAddOutcome::new(added, requested))
    }

    async fn get_items_by_list_id(&self, list_id: Uuid) -> AppResult<Vec<MangaListItem>> {
        Ok(self.state.lock().unwrap().members_of(list_id))
    }

    async fn item_exists(&self, list_id: Uuid, item_id: Uuid) -> AppResult<bool> {
        ValidationRepository::item_exists(self, list_id, item_id).await
    }

    async fn count_by_list_id(&self, list_id: Uuid) -> AppResult<i64> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .items
            .iter()
            .filter(|i| i.list_id == list_id)
            .count() as i64)
    }
}

#[async_trait]
impl MangaListRepository for InMemoryStore {
    async fn create(&self, list: NewMangaList) -> AppResult<MangaList> {
        let now = Utc::now();
        let created = MangaList {
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
            items_count: 0,
            likes_count: 0,
            items: Vec::new(),
        };
        self.state.lock().unwrap().lists.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<MangaList>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .lists
            .iter()
            .find(|l| l.id == id)
            .map(|l| state.with_counts(l)))
    }

    async fn find_by_id_with_items(&self, id: Uuid) -> AppResult<Option<MangaList>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .lists
            .iter()
            .find(|l| l.id == id)
            .map(|l| state.with_counts(l).with_items(state.members_of(id))))
    }

    async fn find_many(&self, query: MangaListQuery) -> AppResult<PaginatedResult<MangaList>> {
        let state = self.state.lock().unwrap();
        let contains = |haystack: &str, needle: &str| {
            haystack.to_lowercase().contains(&needle.to_lowercase())
        };

        let mut matches: Vec<MangaList> = state
            .lists
            .iter()
            .filter(|l| query.owner_id.map_or(true, |owner| l.owner_id == Some(owner)))
            .filter(|l| query.status.map_or(true, |status| l.status == status))
            .filter(|l| query.mood.as_deref().map_or(true, |mood| contains(&l.mood, mood)))
            .filter(|l| {
                query.search.as_deref().map_or(true, |term| {
                    contains(&l.name, term)
                        || l.description.as_deref().is_some_and(|d| contains(d, term))
                })
            })
            .map(|l| state.with_counts(l))
            .collect();

        matches.sort_by(|a, b| {
            let ordering = match query.sort_by {
                MangaListSortBy::CreatedAt => a.created_at.cmp(&b.created_at),
                MangaListSortBy::UpdatedAt => a.updated_at.cmp(&b.updated_at),
                MangaListSortBy::Name => a.name.cmp(&b.name),
                MangaListSortBy::LikesCount => a.likes_count.cmp(&b.likes_count),
            };
            match query.sort_order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        let total = matches.len() as u64;
        let page = matches
            .into_iter()
            .skip(query.pagination.offset() as usize)
            .take(query.pagination.limit() as usize)
            .collect();

        Ok(PaginatedResult::new(page, total, &query.pagination))
    }

    async fn update(&self, id: Uuid, changes: MangaListChanges) -> AppResult<Option<MangaList>> {
        let mut state = self.state.lock().unwrap();
        let Some(list) = state.lists.iter_mut().find(|l| l.id == id) else {
            return Ok(None);
        };

        if let Some(name) = changes.name {
            list.name = name;
        }
        if let Some(cover) = changes.cover {
            list.cover = cover;
        }
        if let Some(mood) = changes.mood {
            list.mood = mood;
        }
        if let Some(description) = changes.description {
            list.description = description;
        }
        if let Some(status) = changes.status {
            list.status = status;
        }
        if let Some(is_default) = changes.is_default {
            list.is_default = is_default;
        }
        list.updated_at = Utc::now();

        let updated = list.clone();
        Ok(Some(state.with_counts(&updated)))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut state = self.state.lock().unwrap();
        let before = state.lists.len();
        state.lists.retain(|l| l.id != id);
        if state.lists.len() == before {
            return Ok(false);
        }

        state.items.retain(|i| i.list_id != id);
        Ok(true)
    }
}
