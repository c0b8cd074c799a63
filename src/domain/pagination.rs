//! Page slicing arithmetic shared by every store.

use serde::Serialize;
use utoipa::ToSchema;

/// Number of hotels returned per search page.
pub const SEARCH_PAGE_SIZE: u32 = 3;

/// A 1-based page of fixed size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    /// Creates a page request. Page and size are clamped to at least 1.
    #[must_use]
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    /// The 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Maximum number of items on the page.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.page_size as u64
    }

    /// Number of items before this page.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.page_size as u64
    }
}

/// Pagination metadata included in search responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct PaginationMeta {
    /// Total number of matching items.
    pub total: u64,
    /// Current page number.
    pub page: u32,
    /// Total number of pages.
    pub pages: u64,
}

impl PaginationMeta {
    /// Computes metadata for `total` matches viewed through `request`.
    #[must_use]
    pub fn new(total: u64, request: PageRequest) -> Self {
        Self {
            total,
            page: request.page(),
            pages: total.div_ceil(request.limit()),
        }
    }
}
