/// Pagination support for queries
///
/// Standard offset pagination model used across all bounded contexts.
/// Pages are 1-based.
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Pagination parameters for queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationParams {
    pub page: u32,
    pub limit: u32,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PaginationParams {
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }

    /// Build parameters from raw caller input.
    ///
    /// `page = max(1, page)` and `limit = min(max_limit, max(1, limit))`;
    /// a missing value falls back to page 1 / `default_limit`.
    pub fn clamped(page: Option<i64>, limit: Option<i64>, default_limit: u32, max_limit: u32) -> Self {
        let page = page.unwrap_or(1).max(1).min(u32::MAX as i64) as u32;
        let limit = limit
            .unwrap_or(default_limit as i64)
            .max(1)
            .min(max_limit.max(1) as i64) as u32;

        Self { page, limit }
    }

    /// Calculate offset for database queries: `(page - 1) * limit`
    pub fn offset(&self) -> i64 {
        (self.page.saturating_sub(1) as i64) * self.limit as i64
    }

    /// Get limit for database queries
    pub fn limit(&self) -> i64 {
        self.limit as i64
    }
}

/// Page metadata returned alongside a page of results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    /// `total_pages = ceil(total / limit)`, so an empty result has zero pages.
    pub fn new(page: u32, limit: u32, total: u64) -> Self {
        let limit_u64 = limit.max(1) as u64;
        let total_pages = total.div_ceil(limit_u64).min(u32::MAX as u64) as u32;

        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

/// Paginated result wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> PaginatedResult<T> {
    pub fn new(items: Vec<T>, total: u64, params: &PaginationParams) -> Self {
        Self {
            items,
            pagination: Pagination::new(params.page, params.limit, total),
        }
    }

    /// Transform the items while keeping the page metadata.
    pub fn map<U, F>(self, f: F) -> PaginatedResult<U>
    where
        F: FnMut(T) -> U,
    {
        PaginatedResult {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}
