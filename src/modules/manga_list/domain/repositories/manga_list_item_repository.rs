/// Persistence of membership rows (list -> manga links).
///
/// Missing rows are reported through `Option`/`bool`, never as errors.
use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::manga_list::domain::entities::{
    BulkAddMangas, MangaListItem, MangaListItemChanges, NewMangaListItem,
};
use crate::modules::manga_list::domain::value_objects::{BulkAddOutcome, ItemOrder};
use crate::shared::errors::AppResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MangaListItemRepository: Send + Sync {
    /// Insert one membership row. When `order` is omitted it is set to the
    /// list's next order. Returns the row with its manga projection.
    async fn add_item(&self, list_id: Uuid, item: NewMangaListItem) -> AppResult<MangaListItem>;

    /// Returns whether a row was actually removed
    async fn remove_item(&self, list_id: Uuid, item_id: Uuid) -> AppResult<bool>;

    /// Partial update; `None` when the row does not exist in this list
    async fn update_item(
        &self,
        list_id: Uuid,
        item_id: Uuid,
        changes: MangaListItemChanges,
    ) -> AppResult<Option<MangaListItem>>;

    /// Apply every order change atomically. Rows of other lists are skipped.
    /// Returns the number of rows updated.
    async fn reorder_items(&self, list_id: Uuid, items: Vec<ItemOrder>) -> AppResult<usize>;

    /// Insert the candidates that exist in the catalog and are not members yet,
    /// with contiguous orders starting at the list's next order.
    async fn bulk_add_items(&self, list_id: Uuid, data: BulkAddMangas) -> AppResult<BulkAddOutcome>;

    /// All members ordered by `order` ascending, ties by insertion time
    async fn get_items_by_list_id(&self, list_id: Uuid) -> AppResult<Vec<MangaListItem>>;

    async fn item_exists(&self, list_id: Uuid, item_id: Uuid) -> AppResult<bool>;

    async fn count_by_list_id(&self, list_id: Uuid) -> AppResult<i64>;
}
