pub mod modules;
mod schema;
pub mod shared;

pub use modules::manga_list::{MangaListModule, MangaListUseCase};
pub use shared::utils::logger::init_logger;
