//! Fixed-size window over the ranked venue list.

use std::ops::RangeInclusive;

/// Default number of venues shown per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// A page of the ranked list.
///
/// After every operation `min` is a multiple of `size` and
/// `max == min + size - 1`. The list may end inside the window; use
/// [`PaginationWindow::visible`] for the indices actually shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationWindow {
    size: usize,
    min: usize,
    max: usize,
}

impl Default for PaginationWindow {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PaginationWindow {
    /// A window of `size` (at least 1) starting at the first item.
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        Self {
            size,
            min: 0,
            max: size - 1,
        }
    }

    /// Venues per page.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Index of the first venue on the page.
    pub fn min(&self) -> usize {
        self.min
    }

    /// Index of the last slot on the page, which may lie past the list end.
    pub fn max(&self) -> usize {
        self.max
    }

    /// Moves forward one page unless the next page would start past `len`.
    pub fn advance(&mut self, len: usize) -> bool {
        let next = self.min + self.size;
        if next >= len {
            return false;
        }
        self.set_min(next);
        true
    }

    /// Moves back one page, stopping at the first.
    pub fn retreat(&mut self) -> bool {
        if self.min == 0 {
            return false;
        }
        self.set_min(self.min.saturating_sub(self.size));
        true
    }

    /// Moves to the page containing `index`.
    pub fn target(&mut self, index: usize) {
        self.set_min(index / self.size * self.size);
    }

    pub fn reset(&mut self) {
        self.set_min(0);
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.min && index <= self.max
    }

    /// Indices shown for a list of `len` items, empty when the window is
    /// past the end.
    pub fn visible(&self, len: usize) -> RangeInclusive<usize> {
        if len == 0 || self.min >= len {
            return 1..=0;
        }
        self.min..=self.max.min(len - 1)
    }

    pub fn has_prior(&self) -> bool {
        self.min > 0
    }

    pub fn has_next(&self, len: usize) -> bool {
        self.max + 1 < len
    }

    /// Whether paging controls are worth showing at all.
    pub fn shows_controls(&self, len: usize) -> bool {
        len > self.size
    }

    /// 1-based first/last shown positions and the total, for "1-10 of 23".
    pub fn summary(&self, len: usize) -> PageSummary {
        PageSummary {
            low: (self.min + 1).min(len),
            high: (self.max + 1).min(len),
            total: len,
        }
    }

    fn set_min(&mut self, min: usize) {
        self.min = min;
        self.max = min + self.size - 1;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSummary {
    pub low: usize,
    pub high: usize,
    pub total: usize,
}
