pub mod models;
pub mod persistence;

pub use persistence::{MangaListItemRepositoryImpl, MangaListRepositoryImpl, ValidationRepositoryImpl};
