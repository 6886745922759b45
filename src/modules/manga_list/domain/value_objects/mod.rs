pub mod bulk;
pub mod item_order;
pub mod list_filters;
pub mod list_status;

pub use bulk::{BulkAddOutcome, BulkValidation};
pub use item_order::ItemOrder;
pub use list_filters::{MangaListFilters, MangaListQuery, MangaListSortBy, SortOrder};
pub use list_status::MangaListStatus;
