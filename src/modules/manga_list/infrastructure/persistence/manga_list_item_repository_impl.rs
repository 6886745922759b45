use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::dsl::exists;
use diesel::prelude::*;
use tokio::task;
use uuid::Uuid;

use super::mapper::{item_changeset, new_item_model};
use super::queries;
use crate::modules::manga_list::domain::{
    entities::{BulkAddMangas, MangaListItem, MangaListItemChanges, NewMangaListItem},
    repositories::MangaListItemRepository,
    services::ordering::{dedupe_ids, order_range_exhausted, plan_bulk_insert},
    value_objects::{BulkAddOutcome, ItemOrder},
};
use crate::modules::manga_list::infrastructure::models::{
    MangaListItemModel, NewMangaListItemModel,
};
use crate::schema::manga_list_items;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::LogContext;
use crate::shared::Database;
use crate::{log_debug, log_info};

pub struct MangaListItemRepositoryImpl {
    db: Arc<Database>,
}

impl MangaListItemRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MangaListItemRepository for MangaListItemRepositoryImpl {
    async fn add_item(&self, list_id: Uuid, item: NewMangaListItem) -> AppResult<MangaListItem> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<MangaListItem> {
            let mut conn = db.get_connection()?;

            conn.transaction::<_, AppError, _>(|conn| {
                let order = match item.order {
                    Some(order) => order,
                    None => queries::next_order(conn, list_id)?,
                };

                let row = diesel::insert_into(manga_list_items::table)
                    .values(&new_item_model(
                        list_id,
                        item.manga_id,
                        order,
                        item.note,
                        Utc::now(),
                    ))
                    .returning(MangaListItemModel::as_returning())
                    .get_result::<MangaListItemModel>(conn)?;

                let mut items = queries::attach_summaries(conn, vec![row])?;
                items
                    .pop()
                    .ok_or_else(|| AppError::InternalError("Inserted item was not returned".into()))
            })
        })
        .await?
    }

    async fn remove_item(&self, list_id: Uuid, item_id: Uuid) -> AppResult<bool> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<bool> {
            let mut conn = db.get_connection()?;
            let deleted = diesel::delete(
                manga_list_items::table
                    .filter(manga_list_items::id.eq(item_id))
                    .filter(manga_list_items::list_id.eq(list_id)),
            )
            .execute(&mut conn)?;
            Ok(deleted > 0)
        })
        .await?
    }

    async fn update_item(
        &self,
        list_id: Uuid,
        item_id: Uuid,
        changes: MangaListItemChanges,
    ) -> AppResult<Option<MangaListItem>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<Option<MangaListItem>> {
            let mut conn = db.get_connection()?;
            let target = manga_list_items::table
                .filter(manga_list_items::id.eq(item_id))
                .filter(manga_list_items::list_id.eq(list_id));

            // diesel rejects an empty changeset
            let row = if changes.is_empty() {
                target
                    .select(MangaListItemModel::as_select())
                    .first::<MangaListItemModel>(&mut conn)
                    .optional()?
            } else {
                diesel::update(target)
                    .set(&item_changeset(changes))
                    .returning(MangaListItemModel::as_returning())
                    .get_result::<MangaListItemModel>(&mut conn)
                    .optional()?
            };

            match row {
                Some(row) => Ok(queries::attach_summaries(&mut conn, vec![row])?.pop()),
                None => Ok(None),
            }
        })
        .await?
    }

    async fn reorder_items(&self, list_id: Uuid, items: Vec<ItemOrder>) -> AppResult<usize> {
        let start = std::time::Instant::now();
        let requested = items.len();

        let updated = Arc::clone(&self.db)
            .with_transaction(move |conn| {
                let mut updated = 0;
                for entry in items {
                    updated += diesel::update(
                        manga_list_items::table
                            .filter(manga_list_items::id.eq(entry.item_id))
                            .filter(manga_list_items::list_id.eq(list_id)),
                    )
                    .set(manga_list_items::order_value.eq(entry.order))
                    .execute(conn)?;
                }
                Ok(updated)
            })
            .await?;

        LogContext::db_operation(
            "reorder",
            "manga_list_items",
            Some(start.elapsed().as_millis() as u64),
        );
        if updated < requested {
            log_debug!(
                "Reorder of list {} skipped {} item(s) not in the list",
                list_id,
                requested - updated
            );
        }

        Ok(updated)
    }

    async fn bulk_add_items(&self, list_id: Uuid, data: BulkAddMangas) -> AppResult<BulkAddOutcome> {
        let db = Arc::clone(&self.db);

        let outcome = task::spawn_blocking(move || -> AppResult<BulkAddOutcome> {
            let mut conn = db.get_connection()?;
            let requested = dedupe_ids(&data.manga_ids).len();

            // Classification and insert are separate statements; a concurrent
            // add between them can still produce a duplicate membership.
            let validation = queries::classify_candidates(&mut conn, list_id, &data.manga_ids)?;
            if !validation.has_insertable() {
                return Ok(BulkAddOutcome::new(0, requested));
            }

            let start = queries::next_order(&mut conn, list_id)?;
            let now = Utc::now();
            let rows: Vec<NewMangaListItemModel> = plan_bulk_insert(&validation.valid_ids, start)
                .ok_or_else(|| order_range_exhausted(list_id))?
                .into_iter()
                .map(|(manga_id, order)| {
                    new_item_model(list_id, manga_id, order, data.note_for(&manga_id), now)
                })
                .collect();

            let inserted = diesel::insert_into(manga_list_items::table)
                .values(&rows)
                .execute(&mut conn)?;

            Ok(BulkAddOutcome::new(inserted, requested))
        })
        .await??;

        log_info!(
            "Bulk add to list {}: {} added, {} skipped",
            list_id,
            outcome.added,
            outcome.skipped
        );

        Ok(outcome)
    }

    async fn get_items_by_list_id(&self, list_id: Uuid) -> AppResult<Vec<MangaListItem>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<Vec<MangaListItem>> {
            let mut conn = db.get_connection()?;
            Ok(queries::load_items(&mut conn, list_id)?)
        })
        .await?
    }

    async fn item_exists(&self, list_id: Uuid, item_id: Uuid) -> AppResult<bool> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<bool> {
            let mut conn = db.get_connection()?;
            let found = diesel::select(exists(
                manga_list_items::table
                    .filter(manga_list_items::id.eq(item_id))
                    .filter(manga_list_items::list_id.eq(list_id)),
            ))
            .get_result::<bool>(&mut conn)?;
            Ok(found)
        })
        .await?
    }

    async fn count_by_list_id(&self, list_id: Uuid) -> AppResult<i64> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<i64> {
            let mut conn = db.get_connection()?;
            let count = manga_list_items::table
                .filter(manga_list_items::list_id.eq(list_id))
                .count()
                .get_result::<i64>(&mut conn)?;
            Ok(count)
        })
        .await?
    }
}
