use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::manga_list::domain::{
    entities::{
        BulkAddMangas, CreateMangaListData, NewMangaListItem, UpdateMangaListData,
        UpdateMangaListItemData,
    },
    errors::{MangaListError, MangaListResult},
    repositories::{MangaListItemRepository, MangaListRepository, ValidationRepository},
    services::MangaListDomainService,
    value_objects::{ItemOrder, MangaListFilters, MangaListStatus},
    views::{BulkAddResult, MangaListItemView, MangaListStats, MangaListView},
};
use crate::shared::application::PaginatedResult;
use crate::shared::errors::AppError;
use crate::shared::utils::logger::{LogContext, TimedOperation};
use crate::shared::validation::ValidationResult;
use crate::{log_debug, log_info};

/// Orchestrates the manga list repositories and domain rules.
///
/// Every operation runs validate -> mutate -> shape. Repositories signal
/// "missing" with `None`/`false`; this is the only layer turning that into
/// a `MangaListError`.
pub struct MangaListUseCase {
    list_repo: Arc<dyn MangaListRepository>,
    item_repo: Arc<dyn MangaListItemRepository>,
    validation_repo: Arc<dyn ValidationRepository>,
    service: MangaListDomainService,
}

impl MangaListUseCase {
    pub fn new(
        list_repo: Arc<dyn MangaListRepository>,
        item_repo: Arc<dyn MangaListItemRepository>,
        validation_repo: Arc<dyn ValidationRepository>,
        service: MangaListDomainService,
    ) -> Self {
        Self {
            list_repo,
            item_repo,
            validation_repo,
            service,
        }
    }

    pub fn service(&self) -> &MangaListDomainService {
        &self.service
    }

    // ---- lists ----

    pub async fn create_list(&self, data: CreateMangaListData) -> MangaListResult<MangaListView> {
        let timer = TimedOperation::new("create_manga_list");

        let list = self.service.normalize_create(data);
        reject_invalid("create_manga_list", self.service.validate_create(&list))?;

        let created = self.list_repo.create(list).await?;
        log_info!("Created manga list {} ({})", created.id, created.name);

        timer.finish();
        Ok(self.service.to_list_view(created))
    }

    pub async fn get_lists(
        &self,
        filters: MangaListFilters,
    ) -> MangaListResult<PaginatedResult<MangaListView>> {
        let query = self.service.normalize_filters(filters);
        log_debug!(
            "Searching manga lists: page {} limit {}",
            query.pagination.page,
            query.pagination.limit
        );

        let page = self.list_repo.find_many(query).await?;
        Ok(page.map(|list| self.service.to_list_view(list)))
    }

    /// Public lists only, whatever status the caller asked for
    pub async fn get_public_manga_lists(
        &self,
        filters: MangaListFilters,
    ) -> MangaListResult<PaginatedResult<MangaListView>> {
        self.get_lists(MangaListFilters {
            status: Some(MangaListStatus::Public),
            ..filters
        })
        .await
    }

    /// Lists whose mood contains `mood`; public lists unless a status is given
    pub async fn get_manga_lists_by_mood(
        &self,
        mood: &str,
        filters: MangaListFilters,
    ) -> MangaListResult<PaginatedResult<MangaListView>> {
        if mood.trim().is_empty() {
            LogContext::rejected("get_manga_lists_by_mood", "empty mood");
            return Err(MangaListError::InvalidData("Mood cannot be empty".to_string()));
        }

        self.get_lists(MangaListFilters {
            mood: Some(mood.to_string()),
            status: filters.status.or(Some(MangaListStatus::Public)),
            ..filters
        })
        .await
    }

    pub async fn get_lists_by_owner(
        &self,
        owner_id: Uuid,
        filters: MangaListFilters,
    ) -> MangaListResult<PaginatedResult<MangaListView>> {
        self.get_lists(MangaListFilters {
            owner_id: Some(owner_id),
            ..filters
        })
        .await
    }

    /// List with every member in display order
    pub async fn get_list_by_id(&self, id: Uuid) -> MangaListResult<MangaListView> {
        let list = self
            .list_repo
            .find_by_id_with_items(id)
            .await?
            .ok_or(MangaListError::ListNotFound(id))?;

        Ok(self.service.to_list_view(list))
    }

    pub async fn update_list(
        &self,
        id: Uuid,
        data: UpdateMangaListData,
    ) -> MangaListResult<MangaListView> {
        let timer = TimedOperation::new("update_manga_list");
        self.ensure_list_exists(id).await?;

        let changes = self.service.normalize_update(data);
        reject_invalid("update_manga_list", self.service.validate_update(&changes))?;

        let updated = self
            .list_repo
            .update(id, changes)
            .await?
            .ok_or(MangaListError::ListNotFound(id))?;
        log_info!("Updated manga list {}", id);

        timer.finish();
        Ok(self.service.to_list_view(updated))
    }

    /// Members go with the list through the store's cascade
    pub async fn delete_list(&self, id: Uuid) -> MangaListResult<()> {
        self.ensure_list_exists(id).await?;

        if !self.list_repo.delete(id).await? {
            return Err(MangaListError::ListNotFound(id));
        }
        log_info!("Deleted manga list {}", id);
        Ok(())
    }

    pub async fn get_manga_list_stats(&self, id: Uuid) -> MangaListResult<MangaListStats> {
        let list = self
            .list_repo
            .find_by_id_with_items(id)
            .await?
            .ok_or(MangaListError::ListNotFound(id))?;

        Ok(self.service.calculate_stats(&list, Utc::now()))
    }

    // ---- items ----

    pub async fn get_manga_list_items(
        &self,
        list_id: Uuid,
    ) -> MangaListResult<Vec<MangaListItemView>> {
        self.ensure_list_exists(list_id).await?;

        let items = self.item_repo.get_items_by_list_id(list_id).await?;
        Ok(items
            .into_iter()
            .map(|item| self.service.to_item_view(item))
            .collect())
    }

    pub async fn add_manga_to_list(
        &self,
        list_id: Uuid,
        data: NewMangaListItem,
    ) -> MangaListResult<MangaListItemView> {
        let timer = TimedOperation::new("add_manga_to_list");

        let item = self.service.normalize_new_item(data);
        reject_invalid("add_manga_to_list", self.service.validate_new_item(&item))?;

        self.ensure_list_exists(list_id).await?;
        if !self.validation_repo.manga_exists(item.manga_id).await? {
            return Err(MangaListError::MangaNotFound(item.manga_id));
        }
        if self
            .validation_repo
            .manga_in_list(list_id, item.manga_id)
            .await?
        {
            LogContext::rejected("add_manga_to_list", "manga already in list");
            return Err(MangaListError::MangaAlreadyInList(item.manga_id));
        }

        let created = self
            .item_repo
            .add_item(list_id, item)
            .await
            .map_err(|e| rejected_by_store("add_manga_to_list", e))?;
        log_info!(
            "Added manga {} to list {} at order {}",
            created.manga_id,
            list_id,
            created.order
        );

        timer.finish();
        Ok(self.service.to_item_view(created))
    }

    /// `item_id` is the membership row id
    pub async fn remove_manga_from_list(&self, list_id: Uuid, item_id: Uuid) -> MangaListResult<()> {
        self.ensure_item_exists(list_id, item_id).await?;

        if !self.item_repo.remove_item(list_id, item_id).await? {
            return Err(MangaListError::ListItemNotFound(item_id));
        }
        log_info!("Removed item {} from list {}", item_id, list_id);
        Ok(())
    }

    pub async fn update_manga_list_item(
        &self,
        list_id: Uuid,
        item_id: Uuid,
        data: UpdateMangaListItemData,
    ) -> MangaListResult<MangaListItemView> {
        self.ensure_item_exists(list_id, item_id).await?;

        let changes = self.service.normalize_item_update(data);
        reject_invalid(
            "update_manga_list_item",
            self.service.validate_item_changes(&changes),
        )?;

        let updated = self
            .item_repo
            .update_item(list_id, item_id, changes)
            .await?
            .ok_or(MangaListError::ListItemNotFound(item_id))?;
        log_info!("Updated item {} in list {}", item_id, list_id);

        Ok(self.service.to_item_view(updated))
    }

    /// Apply the new orders atomically and return the list's members in
    /// their new display order.
    pub async fn reorder_manga_list_items(
        &self,
        list_id: Uuid,
        items: Vec<ItemOrder>,
    ) -> MangaListResult<Vec<MangaListItemView>> {
        let timer = TimedOperation::new("reorder_manga_list_items");
        reject_invalid(
            "reorder_manga_list_items",
            self.service.validate_reorder(&items),
        )?;

        self.ensure_list_exists(list_id).await?;

        let item_ids: Vec<Uuid> = items.iter().map(|i| i.item_id).collect();
        if !self
            .validation_repo
            .can_reorder_items(list_id, &item_ids)
            .await?
        {
            LogContext::rejected("reorder_manga_list_items", "items outside the list");
            return Err(MangaListError::InvalidData(
                "One or more items do not belong to this list".to_string(),
            ));
        }

        let updated = self.item_repo.reorder_items(list_id, items).await?;
        log_info!("Reordered {} item(s) in list {}", updated, list_id);

        let reordered = self.item_repo.get_items_by_list_id(list_id).await?;
        timer.finish();
        Ok(reordered
            .into_iter()
            .map(|item| self.service.to_item_view(item))
            .collect())
    }

    /// Adds every candidate that exists in the catalog and is not a member
    /// yet. Fails only when none of the candidates exists in the catalog.
    pub async fn bulk_add_mangas_to_list(
        &self,
        list_id: Uuid,
        data: BulkAddMangas,
    ) -> MangaListResult<BulkAddResult> {
        let timer = TimedOperation::new("bulk_add_mangas_to_list");

        let data = self.service.normalize_bulk(data);
        reject_invalid("bulk_add_mangas_to_list", self.service.validate_bulk(&data))?;

        self.ensure_list_exists(list_id).await?;

        let validation = self
            .validation_repo
            .validate_bulk_operation(list_id, &data.manga_ids)
            .await?;
        if validation.nothing_in_catalog() {
            LogContext::rejected("bulk_add_mangas_to_list", "no candidate in catalog");
            return Err(MangaListError::InvalidData(
                "None of the provided mangas exist in the catalog".to_string(),
            ));
        }

        let outcome = self
            .item_repo
            .bulk_add_items(list_id, data)
            .await
            .map_err(|e| rejected_by_store("bulk_add_mangas_to_list", e))?;
        let result = self.service.bulk_add_result(outcome);

        timer.finish_with_info(&result.message);
        Ok(result)
    }

    // ---- preconditions ----

    async fn ensure_list_exists(&self, list_id: Uuid) -> MangaListResult<()> {
        if self.validation_repo.list_exists(list_id).await? {
            Ok(())
        } else {
            Err(MangaListError::ListNotFound(list_id))
        }
    }

    async fn ensure_item_exists(&self, list_id: Uuid, item_id: Uuid) -> MangaListResult<()> {
        self.ensure_list_exists(list_id).await?;

        if self.validation_repo.item_exists(list_id, item_id).await? {
            Ok(())
        } else {
            Err(MangaListError::ListItemNotFound(item_id))
        }
    }
}

fn reject_invalid(operation: &str, result: ValidationResult) -> MangaListResult<()> {
    if result.is_valid {
        return Ok(());
    }

    let message = result.message();
    LogContext::rejected(operation, &message);
    Err(MangaListError::InvalidData(message))
}

/// Input the store refused (an exhausted order range) is the caller's fault;
/// anything else stays a storage failure.
fn rejected_by_store(operation: &str, err: AppError) -> MangaListError {
    match err {
        AppError::InvalidInput(message) => {
            LogContext::rejected(operation, &message);
            MangaListError::InvalidData(message)
        }
        other => MangaListError::Storage(other),
    }
}
