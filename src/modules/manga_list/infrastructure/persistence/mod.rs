pub mod manga_list_item_repository_impl;
pub mod manga_list_repository_impl;
pub mod mapper;
pub mod queries;
pub mod validation_repository_impl;

pub use manga_list_item_repository_impl::MangaListItemRepositoryImpl;
pub use manga_list_repository_impl::MangaListRepositoryImpl;
pub use validation_repository_impl::ValidationRepositoryImpl;
