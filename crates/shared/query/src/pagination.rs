//! Page selection and the paginated result envelope.

use serde::Serialize;

/// First page number
pub const DEFAULT_PAGE_NUMBER: u64 = 1;

/// Page size for public search results
pub const DEFAULT_SEARCH_PAGE_SIZE: u64 = 9;

/// Page size for management and listing screens
pub const DEFAULT_LIST_PAGE_SIZE: u64 = 10;

/// Upper bound on any requested page size
pub const MAX_PAGE_SIZE: u64 = 100;

/// A validated page request. `page >= 1` and `1 <= limit <= MAX_PAGE_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u64,
    limit: u64,
}

impl Pagination {
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: page.max(DEFAULT_PAGE_NUMBER),
            limit: limit.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Coerce raw query values. Missing, non-numeric or zero values fall
    /// back to the defaults.
    pub fn from_params(page: Option<&str>, limit: Option<&str>, default_limit: u64) -> Self {
        Self::new(
            positive(page).unwrap_or(DEFAULT_PAGE_NUMBER),
            positive(limit).unwrap_or(default_limit),
        )
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Documents to skip before this page.
    pub fn skip(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.limit)
    }
}

fn positive(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| *value > 0)
}

/// One page of results plus the totals computed from the same filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub total_pages: u64,
    pub current_page: u64,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, total: u64, pagination: Pagination) -> Self {
        Self {
            items,
            total,
            total_pages: pagination.total_pages(total),
            current_page: pagination.page(),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            total_pages: self.total_pages,
            current_page: self.current_page,
        }
    }
}
