pub mod manga_list_use_case;

pub use manga_list_use_case::MangaListUseCase;
