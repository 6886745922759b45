/// Test helper functions and use case builders
use super::in_memory::InMemoryStore;
use manga_lists::modules::manga_list::{
    MangaListDomainService, MangaListModule, MangaListSettings, MangaListUseCase,
};
use manga_lists::shared::Database;
use std::sync::Arc;

pub struct InMemoryHarness {
    pub store: Arc<InMemoryStore>,
    pub use_case: MangaListUseCase,
}

/// Use case wired over a fresh in-memory store
pub fn in_memory_use_case() -> InMemoryHarness {
    in_memory_use_case_with(MangaListSettings::default())
}

pub fn in_memory_use_case_with(settings: MangaListSettings) -> InMemoryHarness {
    let store = Arc::new(InMemoryStore::new());
    let use_case = MangaListUseCase::new(
        store.clone(),
        store.clone(),
        store.clone(),
        MangaListDomainService::new(settings),
    );

    InMemoryHarness { store, use_case }
}

/// Production wiring over the shared test pool
pub fn database_module() -> MangaListModule {
    let pool = super::db::get_test_db_pool();
    let db = Arc::new(Database::from_pool((*pool).clone()));
    MangaListModule::from_database(db)
}
