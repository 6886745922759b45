/// Persistence of the manga list aggregate.
///
/// `update`/`delete` report a missing list with `None`/`false`; turning that
/// into an error is the caller's decision.
use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::manga_list::domain::entities::{MangaList, MangaListChanges, NewMangaList};
use crate::modules::manga_list::domain::value_objects::MangaListQuery;
use crate::shared::application::PaginatedResult;
use crate::shared::errors::AppResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MangaListRepository: Send + Sync {
    async fn create(&self, list: NewMangaList) -> AppResult<MangaList>;

    /// List with derived counts, without members
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<MangaList>>;

    /// List with derived counts and every member in display order
    async fn find_by_id_with_items(&self, id: Uuid) -> AppResult<Option<MangaList>>;

    /// Filtered, sorted, offset-paginated search
    async fn find_many(&self, query: MangaListQuery) -> AppResult<PaginatedResult<MangaList>>;

    async fn update(&self, id: Uuid, changes: MangaListChanges) -> AppResult<Option<MangaList>>;

    /// Members are removed by the store's cascade
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}
