use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::list_status::MangaListStatus;
use crate::shared::application::PaginationParams;

/// Column a list search is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MangaListSortBy {
    #[default]
    CreatedAt,
    UpdatedAt,
    Name,
    /// Derived from the likes table, not a stored column
    LikesCount,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Raw search input as it arrives from the calling layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MangaListFilters {
    pub owner_id: Option<Uuid>,
    pub status: Option<MangaListStatus>,
    pub mood: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<MangaListSortBy>,
    pub sort_order: Option<SortOrder>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Normalized search handed to the list repository.
///
/// Text filters are trimmed and non-empty, pagination is already clamped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MangaListQuery {
    pub owner_id: Option<Uuid>,
    pub status: Option<MangaListStatus>,
    /// Case-insensitive substring of the mood tag
    pub mood: Option<String>,
    /// Case-insensitive substring of name OR description
    pub search: Option<String>,
    pub sort_by: MangaListSortBy,
    pub sort_order: SortOrder,
    pub pagination: PaginationParams,
}
