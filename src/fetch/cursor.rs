//! Pagination cursors.
//!
//! The upstream API only paginates forward by offset/limit. Descending
//! browsing is simulated by mirroring offsets from the end of the catalog.

use serde::{Deserialize, Serialize};

/// One `offset`/`limit` page request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub offset: u32,
    pub limit: u32,
}

impl PageRequest {
    pub fn new(offset: u32, limit: u32) -> Self {
        Self { offset, limit }
    }

    /// Smallest id this page covers (ids are 1-based, offsets 0-based)
    pub fn first_id(&self) -> u32 {
        self.offset + 1
    }

    /// Largest id this page covers
    pub fn last_id(&self) -> u32 {
        self.offset + self.limit
    }
}

/// Ascending cursor. Ids `1..=covered()` have been requested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ForwardCursor {
    next_offset: u32,
}

impl ForwardCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next page, or `None` once `max` is reached. The last page shrinks to fit.
    pub fn next_page(&self, page_size: u32, max: u32) -> Option<PageRequest> {
        if self.next_offset >= max {
            return None;
        }
        let limit = page_size.min(max - self.next_offset);
        Some(PageRequest::new(self.next_offset, limit))
    }

    pub fn advance(&mut self, page: PageRequest) {
        self.next_offset = self.next_offset.max(page.offset + page.limit);
    }

    /// Highest id requested so far (0 before the first page)
    pub fn covered(&self) -> u32 {
        self.next_offset
    }

    pub fn is_exhausted(&self, max: u32) -> bool {
        self.next_offset >= max
    }
}

/// Descending cursor. Ids `floor()+1..=max` have been requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DescendingCursor {
    end: u32,
}

impl DescendingCursor {
    /// Start at the end of a catalog of `max` records
    pub fn new(max: u32) -> Self {
        Self { end: max }
    }

    /// Next page walking backwards. The final page starts at offset 0 and
    /// its limit is whatever remains.
    pub fn next_page(&self, page_size: u32) -> Option<PageRequest> {
        if self.end == 0 {
            return None;
        }
        let offset = self.end.saturating_sub(page_size);
        Some(PageRequest::new(offset, self.end - offset))
    }

    pub fn advance(&mut self, page: PageRequest) {
        self.end = self.end.min(page.offset);
    }

    /// Ids above this value have been requested
    pub fn floor(&self) -> u32 {
        self.end
    }

    pub fn is_exhausted(&self) -> bool {
        self.end == 0
    }
}
