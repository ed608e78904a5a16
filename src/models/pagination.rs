//! Pagination primitives shared by the listing endpoints and upstream requests.

use serde::Deserialize;

/// Pagination query parameters.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Pagination {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl Pagination {
    /// Maximum items per page.
    const MAX_LIMIT: u32 = 500;

    /// Default items per page.
    const DEFAULT_LIMIT: u32 = 100;

    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(1, Self::MAX_LIMIT)
    }

    pub fn offset(&self) -> usize {
        (self.current_page() as usize - 1) * self.limit() as usize
    }

    pub fn current_page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    /// Slice one page out of a locally held list.
    pub fn apply<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.offset().min(items.len());
        let end = (start + self.limit() as usize).min(items.len());
        &items[start..end]
    }
}
