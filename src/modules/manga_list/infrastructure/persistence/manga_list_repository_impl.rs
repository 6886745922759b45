use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::dsl::sql;
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use tokio::task;
use uuid::Uuid;

use super::mapper::{list_changeset, list_from_model, new_list_model};
use super::queries;
use crate::modules::manga_list::domain::{
    entities::{MangaList, MangaListChanges, NewMangaList},
    repositories::MangaListRepository,
    value_objects::{MangaListQuery, MangaListSortBy, SortOrder},
};
use crate::modules::manga_list::infrastructure::models::MangaListModel;
use crate::schema::manga_lists;
use crate::shared::application::PaginatedResult;
use crate::shared::errors::AppResult;
use crate::shared::utils::logger::LogContext;
use crate::shared::Database;
use crate::log_debug;

const LIKES_COUNT_SQL: &str =
    "(SELECT COUNT(*) FROM manga_list_likes WHERE manga_list_likes.list_id = manga_lists.id)";

pub struct MangaListRepositoryImpl {
    db: Arc<Database>,
}

impl MangaListRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MangaListRepository for MangaListRepositoryImpl {
    async fn create(&self, list: NewMangaList) -> AppResult<MangaList> {
        let db = Arc::clone(&self.db);

        let model = task::spawn_blocking(move || -> AppResult<MangaListModel> {
            let mut conn = db.get_connection()?;
            let model = diesel::insert_into(manga_lists::table)
                .values(&new_list_model(list, Utc::now()))
                .returning(MangaListModel::as_returning())
                .get_result::<MangaListModel>(&mut conn)?;
            Ok(model)
        })
        .await??;

        log_debug!("Created manga list {}", model.id);
        Ok(list_from_model(model, 0, 0))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<MangaList>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<Option<MangaList>> {
            let mut conn = db.get_connection()?;
            let Some(model) = find_model(&mut conn, id)? else {
                return Ok(None);
            };

            let mut lists = with_counts(&mut conn, vec![model])?;
            Ok(lists.pop())
        })
        .await?
    }

    async fn find_by_id_with_items(&self, id: Uuid) -> AppResult<Option<MangaList>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<Option<MangaList>> {
            let mut conn = db.get_connection()?;
            let Some(model) = find_model(&mut conn, id)? else {
                return Ok(None);
            };

            let likes = queries::like_counts(&mut conn, &[id])?;
            let items = queries::load_items(&mut conn, id)?;
            let list = list_from_model(model, 0, likes.get(&id).copied().unwrap_or(0));

            Ok(Some(list.with_items(items)))
        })
        .await?
    }

    async fn find_many(&self, query: MangaListQuery) -> AppResult<PaginatedResult<MangaList>> {
        let db = Arc::clone(&self.db);
        let start = std::time::Instant::now();

        let page = task::spawn_blocking(move || -> AppResult<PaginatedResult<MangaList>> {
            let mut conn = db.get_connection()?;

            let total = filtered(&query).count().get_result::<i64>(&mut conn)?;

            let models = sorted(filtered(&query), query.sort_by, query.sort_order)
                .offset(query.pagination.offset())
                .limit(query.pagination.limit())
                .load::<MangaListModel>(&mut conn)?;

            let lists = with_counts(&mut conn, models)?;
            Ok(PaginatedResult::new(
                lists,
                total.max(0) as u64,
                &query.pagination,
            ))
        })
        .await??;

        LogContext::db_operation(
            "find_many",
            "manga_lists",
            Some(start.elapsed().as_millis() as u64),
        );

        Ok(page)
    }

    async fn update(&self, id: Uuid, changes: MangaListChanges) -> AppResult<Option<MangaList>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<Option<MangaList>> {
            let mut conn = db.get_connection()?;

            let model = diesel::update(manga_lists::table.find(id))
                .set(&list_changeset(changes, Utc::now()))
                .returning(MangaListModel::as_returning())
                .get_result::<MangaListModel>(&mut conn)
                .optional()?;

            match model {
                Some(model) => Ok(with_counts(&mut conn, vec![model])?.pop()),
                None => Ok(None),
            }
        })
        .await?
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<bool> {
            let mut conn = db.get_connection()?;
            let deleted = diesel::delete(manga_lists::table.find(id)).execute(&mut conn)?;
            Ok(deleted > 0)
        })
        .await?
    }
}

fn find_model(conn: &mut PgConnection, id: Uuid) -> QueryResult<Option<MangaListModel>> {
    manga_lists::table
        .find(id)
        .select(MangaListModel::as_select())
        .first::<MangaListModel>(conn)
        .optional()
}

/// Attach member and like counts, keeping the input order.
fn with_counts(conn: &mut PgConnection, models: Vec<MangaListModel>) -> QueryResult<Vec<MangaList>> {
    if models.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();
    let members: HashMap<Uuid, i64> = queries::member_counts(conn, &ids)?;
    let likes: HashMap<Uuid, i64> = queries::like_counts(conn, &ids)?;

    Ok(models
        .into_iter()
        .map(|m| {
            let items_count = members.get(&m.id).copied().unwrap_or(0);
            let likes_count = likes.get(&m.id).copied().unwrap_or(0);
            list_from_model(m, items_count, likes_count)
        })
        .collect())
}

/// Boxed query carrying every filter of the search; built twice per search
/// (count and page) because boxed queries cannot be cloned.
fn filtered(query: &MangaListQuery) -> manga_lists::BoxedQuery<'static, Pg> {
    let mut q = manga_lists::table.into_boxed();

    if let Some(owner_id) = query.owner_id {
        q = q.filter(manga_lists::owner_id.eq(owner_id));
    }
    if let Some(status) = query.status {
        q = q.filter(manga_lists::status.eq(status));
    }
    if let Some(mood) = &query.mood {
        q = q.filter(manga_lists::mood.ilike(queries::like_pattern(mood)));
    }
    if let Some(search) = &query.search {
        let pattern = queries::like_pattern(search);
        q = q.filter(
            manga_lists::name
                .ilike(pattern.clone())
                .or(manga_lists::description.ilike(pattern)),
        );
    }

    q
}

/// Apply the requested sort with `id` as a stable tie-breaker.
fn sorted(
    q: manga_lists::BoxedQuery<'static, Pg>,
    sort_by: MangaListSortBy,
    sort_order: SortOrder,
) -> manga_lists::BoxedQuery<'static, Pg> {
    let q = match (sort_by, sort_order) {
        (MangaListSortBy::CreatedAt, SortOrder::Asc) => q.order(manga_lists::created_at.asc()),
        (MangaListSortBy::CreatedAt, SortOrder::Desc) => q.order(manga_lists::created_at.desc()),
        (MangaListSortBy::UpdatedAt, SortOrder::Asc) => q.order(manga_lists::updated_at.asc()),
        (MangaListSortBy::UpdatedAt, SortOrder::Desc) => q.order(manga_lists::updated_at.desc()),
        (MangaListSortBy::Name, SortOrder::Asc) => q.order(manga_lists::name.asc()),
        (MangaListSortBy::Name, SortOrder::Desc) => q.order(manga_lists::name.desc()),
        (MangaListSortBy::LikesCount, SortOrder::Asc) => {
            q.order(sql::<BigInt>(LIKES_COUNT_SQL).asc())
        }
        (MangaListSortBy::LikesCount, SortOrder::Desc) => {
            q.order(sql::<BigInt>(LIKES_COUNT_SQL).desc())
        }
    };

    q.then_order_by(manga_lists::id.asc())
}
