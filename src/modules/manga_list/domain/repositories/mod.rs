pub mod manga_list_item_repository;
pub mod manga_list_repository;
pub mod validation_repository;

pub use manga_list_item_repository::MangaListItemRepository;
pub use manga_list_repository::MangaListRepository;
pub use validation_repository::ValidationRepository;

#[cfg(test)]
pub use manga_list_item_repository::MockMangaListItemRepository;
#[cfg(test)]
pub use manga_list_repository::MockMangaListRepository;
#[cfg(test)]
pub use validation_repository::MockValidationRepository;
