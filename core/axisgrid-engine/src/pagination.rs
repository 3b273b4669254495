//! Page arithmetic. Pages are 1-based; everything except the current page
//! and page size is derived from the row count.

use serde::Serialize;
use std::ops::Range;

/// Number of pages needed for `total_rows`. Never less than one, so an
/// empty dataset still has a page to show.
#[must_use]
pub fn total_pages(total_rows: usize, page_size: usize) -> usize {
    total_rows.div_ceil(page_size.max(1)).max(1)
}

/// Pulls `page` into `[1, total_pages]`.
#[must_use]
pub fn clamp_page(page: usize, total_rows: usize, page_size: usize) -> usize {
    page.clamp(1, total_pages(total_rows, page_size))
}

/// The current page of a dataset of known size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    current_page: usize,
    page_size: usize,
    total_rows: usize,
}

impl Pagination {
    /// The requested page is clamped into range; a zero page size is
    /// treated as one.
    #[must_use]
    pub fn new(current_page: usize, page_size: usize, total_rows: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            current_page: clamp_page(current_page, total_rows, page_size),
            page_size,
            total_rows,
        }
    }

    /// Every row on one page.
    #[must_use]
    pub fn single_page(total_rows: usize) -> Self {
        Self::new(1, total_rows, total_rows)
    }

    #[must_use]
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    #[must_use]
    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    #[must_use]
    pub fn total_pages(&self) -> usize {
        total_pages(self.total_rows, self.page_size)
    }

    /// 1-based number of the first visible row, 0 when there are no rows.
    #[must_use]
    pub fn start_row(&self) -> usize {
        if self.total_rows == 0 {
            0
        } else {
            (self.current_page - 1) * self.page_size + 1
        }
    }

    /// 1-based number of the last visible row.
    #[must_use]
    pub fn end_row(&self) -> usize {
        (self.current_page * self.page_size).min(self.total_rows)
    }

    /// Half-open index range of the visible rows, clamped to the data.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        let start = ((self.current_page - 1) * self.page_size).min(self.total_rows);
        start..self.end_row()
    }

    /// The visible part of `items`.
    #[must_use]
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let range = self.range();
        let end = range.end.min(items.len());
        &items[range.start.min(end)..end]
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// At most `max_buttons` consecutive page numbers, always including the
    /// current page and centred on it where possible.
    #[must_use]
    pub fn page_numbers(&self, max_buttons: usize) -> Vec<usize> {
        let total = self.total_pages();
        let max_buttons = max_buttons.max(1);
        if total <= max_buttons {
            return (1..=total).collect();
        }
        let mut start = self.current_page.saturating_sub(max_buttons / 2).max(1);
        if start + max_buttons - 1 > total {
            start = total - max_buttons + 1;
        }
        (start..start + max_buttons).collect()
    }

    #[must_use]
    pub fn summary(&self) -> PaginationSummary {
        PaginationSummary {
            current_page: self.current_page,
            total_pages: self.total_pages(),
            start_row: self.start_row(),
            end_row: self.end_row(),
            total_rows: self.total_rows,
            page_size: self.page_size,
        }
    }
}

/// What the pager displays: "51 - 100 of 120".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationSummary {
    pub current_page: usize,
    pub total_pages: usize,
    pub start_row: usize,
    pub end_row: usize,
    pub total_rows: usize,
    pub page_size: usize,
}
