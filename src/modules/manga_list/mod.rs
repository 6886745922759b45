pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

use std::sync::Arc;

use crate::log_info;
use crate::shared::errors::AppResult;
use crate::shared::Database;

// Re-exports for easy external access
pub use application::MangaListUseCase;
pub use config::MangaListSettings;
pub use domain::entities::{
    BulkAddMangas, CreateMangaListData, MangaList, MangaListItem, MangaSummary, MangaTranslation,
    NewMangaListItem, UpdateMangaListData, UpdateMangaListItemData,
};
pub use domain::repositories::{MangaListItemRepository, MangaListRepository, ValidationRepository};
pub use domain::value_objects::{
    ItemOrder, MangaListFilters, MangaListSortBy, MangaListStatus, SortOrder,
};
pub use domain::views::{
    BulkAddResult, MangaListItemView, MangaListStats, MangaListView, MangaView,
};
pub use domain::{MangaListDomainService, MangaListError, MangaListResult};
pub use infrastructure::{
    MangaListItemRepositoryImpl, MangaListRepositoryImpl, ValidationRepositoryImpl,
};

/// Composition root: the diesel repositories, the domain service and the
/// use case wired over one connection pool.
pub struct MangaListModule {
    pub use_case: Arc<MangaListUseCase>,
}

impl MangaListModule {
    pub fn from_database(db: Arc<Database>) -> Self {
        Self::with_settings(db, MangaListSettings::default())
    }

    pub fn with_settings(db: Arc<Database>, settings: MangaListSettings) -> Self {
        let list_repo = Arc::new(MangaListRepositoryImpl::new(Arc::clone(&db)));
        let item_repo = Arc::new(MangaListItemRepositoryImpl::new(Arc::clone(&db)));
        let validation_repo = Arc::new(ValidationRepositoryImpl::new(db));

        let use_case = MangaListUseCase::new(
            list_repo,
            item_repo,
            validation_repo,
            MangaListDomainService::new(settings),
        );

        Self {
            use_case: Arc::new(use_case),
        }
    }

    /// Build from `DATABASE_*` and `MANGA_LIST_*` environment variables,
    /// applying pending migrations first.
    pub fn from_env() -> AppResult<Self> {
        let db = Arc::new(Database::from_env()?);
        let applied = db.run_migrations()?;
        if applied > 0 {
            log_info!("Manga list schema is up to date ({} migration(s) applied)", applied);
        }

        Ok(Self::with_settings(db, MangaListSettings::from_env()?))
    }
}
