/// Read-only consistency checks against the catalog and list membership.
///
/// Nothing here mutates state, and store failures are returned unchanged.
use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::manga_list::domain::value_objects::BulkValidation;
use crate::shared::errors::AppResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ValidationRepository: Send + Sync {
    /// Whether the manga exists in the catalog
    async fn manga_exists(&self, manga_id: Uuid) -> AppResult<bool>;

    /// The subset of `manga_ids` that exists in the catalog
    async fn mangas_exist(&self, manga_ids: &[Uuid]) -> AppResult<Vec<Uuid>>;

    async fn list_exists(&self, list_id: Uuid) -> AppResult<bool>;

    /// Whether membership row `item_id` belongs to `list_id`
    async fn item_exists(&self, list_id: Uuid, item_id: Uuid) -> AppResult<bool>;

    async fn manga_in_list(&self, list_id: Uuid, manga_id: Uuid) -> AppResult<bool>;

    /// One past the current maximum order, or `0` for an empty list
    async fn get_next_order(&self, list_id: Uuid) -> AppResult<i32>;

    /// True iff every id is a membership row of `list_id`
    async fn can_reorder_items(&self, list_id: Uuid, item_ids: &[Uuid]) -> AppResult<bool>;

    /// Classify bulk-add candidates in a single round-trip
    async fn validate_bulk_operation(
        &self,
        list_id: Uuid,
        candidate_ids: &[Uuid],
    ) -> AppResult<BulkValidation>;
}
