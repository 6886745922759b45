pub mod entities;
pub mod errors;
pub mod repositories;
pub mod services;
pub mod value_objects;
pub mod views;

pub use errors::{MangaListError, MangaListResult};
pub use services::MangaListDomainService;
