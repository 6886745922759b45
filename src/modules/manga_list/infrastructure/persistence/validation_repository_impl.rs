use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use tokio::task;
use uuid::Uuid;

use super::queries;
use crate::modules::manga_list::domain::{
    repositories::ValidationRepository, services::ordering::dedupe_ids,
    value_objects::BulkValidation,
};
use crate::schema::{manga, manga_list_items, manga_lists};
use crate::shared::errors::AppResult;
use crate::shared::utils::logger::LogContext;
use crate::shared::Database;

pub struct ValidationRepositoryImpl {
    db: Arc<Database>,
}

impl ValidationRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ValidationRepository for ValidationRepositoryImpl {
    async fn manga_exists(&self, manga_id: Uuid) -> AppResult<bool> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<bool> {
            let mut conn = db.get_connection()?;
            let found = diesel::select(exists(manga::table.filter(manga::id.eq(manga_id))))
                .get_result::<bool>(&mut conn)?;
            Ok(found)
        })
        .await?
    }

    async fn mangas_exist(&self, manga_ids: &[Uuid]) -> AppResult<Vec<Uuid>> {
        let db = Arc::clone(&self.db);
        let ids = dedupe_ids(manga_ids);
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        task::spawn_blocking(move || -> AppResult<Vec<Uuid>> {
            let mut conn = db.get_connection()?;
            let found: HashSet<Uuid> = manga::table
                .filter(manga::id.eq_any(&ids))
                .select(manga::id)
                .load::<Uuid>(&mut conn)?
                .into_iter()
                .collect();

            // caller's order, not the index scan's
            Ok(ids.into_iter().filter(|id| found.contains(id)).collect())
        })
        .await?
    }

    async fn list_exists(&self, list_id: Uuid) -> AppResult<bool> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<bool> {
            let mut conn = db.get_connection()?;
            let found = diesel::select(exists(manga_lists::table.find(list_id)))
                .get_result::<bool>(&mut conn)?;
            Ok(found)
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

    async fn manga_in_list(&self, list_id: Uuid, manga_id: Uuid) -> AppResult<bool> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<bool> {
            let mut conn = db.get_connection()?;
            let found = diesel::select(exists(
                manga_list_items::table
                    .filter(manga_list_items::list_id.eq(list_id))
                    .filter(manga_list_items::manga_id.eq(manga_id)),
            ))
            .get_result::<bool>(&mut conn)?;
            Ok(found)
        })
        .await?
    }

    async fn get_next_order(&self, list_id: Uuid) -> AppResult<i32> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<i32> {
            let mut conn = db.get_connection()?;
            queries::next_order(&mut conn, list_id)
        })
        .await?
    }

    async fn can_reorder_items(&self, list_id: Uuid, item_ids: &[Uuid]) -> AppResult<bool> {
        let db = Arc::clone(&self.db);
        let ids = dedupe_ids(item_ids);

        task::spawn_blocking(move || -> AppResult<bool> {
            if ids.is_empty() {
                return Ok(true);
            }

            let mut conn = db.get_connection()?;
            let owned = manga_list_items::table
                .filter(manga_list_items::list_id.eq(list_id))
                .filter(manga_list_items::id.eq_any(&ids))
                .count()
                .get_result::<i64>(&mut conn)?;

            Ok(owned == ids.len() as i64)
        })
        .await?
    }

    async fn validate_bulk_operation(
        &self,
        list_id: Uuid,
        candidate_ids: &[Uuid],
    ) -> AppResult<BulkValidation> {
        let db = Arc::clone(&self.db);
        let candidates = candidate_ids.to_vec();
        let start = std::time::Instant::now();

        let validation = task::spawn_blocking(move || -> AppResult<BulkValidation> {
            let mut conn = db.get_connection()?;
            Ok(queries::classify_candidates(&mut conn, list_id, &candidates)?)
        })
        .await??;

        LogContext::db_operation(
            "validate_bulk",
            "manga_list_items",
            Some(start.elapsed().as_millis() as u64),
        );

        Ok(validation)
    }
}
