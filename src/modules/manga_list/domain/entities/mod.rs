pub mod manga_list;
pub mod manga_list_item;

pub use manga_list::{
    CreateMangaListData, MangaList, MangaListChanges, NewMangaList, UpdateMangaListData,
};
pub use manga_list_item::{
    BulkAddMangas, MangaListItem, MangaListItemChanges, MangaSummary, MangaTranslation,
    NewMangaListItem, UpdateMangaListItemData,
};
