//! Caller-owned view state and its transitions.
//!
//! `GridState` holds everything the grid remembers between renders. Every
//! transition consumes the state and returns the next one, so the caller
//! decides where state lives and when it changes. Resets are part of the
//! transitions: a sort change or a page-size change returns to page 1.

use axisgrid_model::{Column, ColumnState, PinSide, Row, SortModel};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::column_state::{
    pin_column, read_column_state, reorder_column, resize_column, set_column_visible,
};
use crate::config::GridConfig;
use crate::error::{GridError, GridResult};
use crate::pagination::{Pagination, clamp_page, total_pages};
use crate::selection::{RowKey, Selection};
use crate::sort::next_sort;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridState {
    #[serde(default)]
    pub sort: Option<SortModel>,
    /// 1-based. May exceed the page count after the data shrinks; views
    /// clamp it.
    pub current_page: usize,
    pub page_size: usize,
    #[serde(default)]
    pub selection: Selection,
    #[serde(default)]
    pub column_state: ColumnState,
}

impl GridState {
    /// Page 1 at the default page size, unsorted, nothing selected, layout
    /// taken from the schema.
    #[must_use]
    pub fn new(config: &GridConfig, columns: &[Column]) -> Self {
        Self {
            sort: None,
            current_page: 1,
            page_size: config.default_page_size,
            selection: Selection::new(),
            column_state: read_column_state(columns),
        }
    }

    /// Starts from a persisted layout instead of the schema's.
    #[must_use]
    pub fn with_column_state(mut self, column_state: ColumnState) -> Self {
        self.column_state = column_state;
        self
    }

    /// Checks a restored state against the current schema and config. The
    /// sort must name a schema column and, on a paginated grid, the page
    /// size must be one of the options.
    pub fn validate(&self, columns: &[Column], config: &GridConfig) -> GridResult<()> {
        if let Some(sort) = &self.sort {
            find_column(columns, &sort.field)?;
        }
        if config.paginated {
            config.check_page_size(self.page_size)?;
        }
        Ok(())
    }

    // ── Sorting ──────────────────────────────────────────────────

    /// Header activation on `field`: cycles `asc → desc → none` on the same
    /// field, starts at `asc` on another. Columns that are not sortable, or
    /// a grid with sorting disabled, leave the state unchanged.
    pub fn apply_sort(self, field: &str, columns: &[Column], config: &GridConfig) -> GridResult<Self> {
        let column = find_column(columns, field)?;
        if !config.sortable || !column.sortable {
            debug!(field, "Ignoring sort on unsortable column");
            return Ok(self);
        }
        let next = next_sort(self.sort.as_ref(), column);
        Ok(self.replace_sort(next))
    }

    /// Sets the sort directly, e.g. from a saved view.
    pub fn set_sort(self, sort: Option<SortModel>, columns: &[Column]) -> GridResult<Self> {
        if let Some(sort) = &sort {
            find_column(columns, &sort.field)?;
        }
        Ok(self.replace_sort(sort))
    }

    fn replace_sort(mut self, next: Option<SortModel>) -> Self {
        if self.sort != next {
            debug!(
                field = next.as_ref().map(|s| s.field.as_str()),
                order = ?next.as_ref().map(|s| s.order),
                "Sort changed"
            );
            self.sort = next;
            self.current_page = 1;
        }
        self
    }

    // ── Paging ───────────────────────────────────────────────────

    /// Moves to `page`, clamped into `[1, total_pages]`.
    #[must_use]
    pub fn goto_page(mut self, page: usize, total_rows: usize) -> Self {
        let clamped = clamp_page(page, total_rows, self.page_size);
        if clamped != page {
            warn!(
                requested = page,
                total_pages = total_pages(total_rows, self.page_size),
                clamped,
                "Requested page out of range"
            );
        }
        self.current_page = clamped;
        self
    }

    #[must_use]
    pub fn next_page(self, total_rows: usize) -> Self {
        let page = self.current_page.saturating_add(1);
        let last = total_pages(total_rows, self.page_size);
        self.goto_page(page.min(last), total_rows)
    }

    #[must_use]
    pub fn previous_page(self, total_rows: usize) -> Self {
        let page = self.current_page.saturating_sub(1).max(1);
        let last = total_pages(total_rows, self.page_size);
        self.goto_page(page.min(last), total_rows)
    }

    /// Changes the page size and returns to page 1. The size must be one of
    /// the configured options.
    pub fn set_page_size(mut self, size: usize, config: &GridConfig) -> GridResult<Self> {
        let size = config.check_page_size(size)?;
        if size != self.page_size {
            debug!(from = self.page_size, to = size, "Page size changed");
        }
        self.page_size = size;
        self.current_page = 1;
        Ok(self)
    }

    /// The page to show for a dataset of `total_rows`.
    #[must_use]
    pub fn pagination(&self, total_rows: usize, config: &GridConfig) -> Pagination {
        if config.paginated {
            Pagination::new(self.current_page, self.page_size, total_rows)
        } else {
            Pagination::single_page(total_rows)
        }
    }

    // ── Selection ────────────────────────────────────────────────

    #[must_use]
    pub fn toggle_row(mut self, row: &Row, config: &GridConfig) -> Self {
        if !config.selectable {
            return self;
        }
        let key = RowKey::of(row, &config.row_key);
        debug!(key = %key, "Row selection toggled");
        self.selection = self.selection.toggled(key);
        self
    }

    /// Select-all restricted to `page`, the rows currently visible.
    #[must_use]
    pub fn toggle_select_all_on_page(mut self, page: &[&Row], config: &GridConfig) -> Self {
        if !config.selectable {
            return self;
        }
        self.selection = self.selection.toggle_page(page, &config.row_key);
        debug!(
            page_rows = page.len(),
            selected = self.selection.len(),
            "Page selection toggled"
        );
        self
    }

    #[must_use]
    pub fn clear_selection(mut self) -> Self {
        if !self.selection.is_empty() {
            debug!(cleared = self.selection.len(), "Selection cleared");
        }
        self.selection = Selection::new();
        self
    }

    #[must_use]
    pub fn is_selected(&self, row: &Row, config: &GridConfig) -> bool {
        self.selection.is_selected(row, &config.row_key)
    }

    /// Number of selected keys, including keys whose rows are no longer in
    /// the dataset.
    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    // ── Columns ──────────────────────────────────────────────────

    pub fn reorder_column(mut self, columns: &[Column], field: &str, to_index: usize) -> GridResult<Self> {
        self.column_state = reorder_column(&self.column_state, columns, field, to_index)?;
        Ok(self)
    }

    pub fn resize_column(mut self, columns: &[Column], field: &str, width: u32) -> GridResult<Self> {
        self.column_state = resize_column(&self.column_state, columns, field, width)?;
        Ok(self)
    }

    pub fn set_column_visible(mut self, columns: &[Column], field: &str, visible: bool) -> GridResult<Self> {
        self.column_state = set_column_visible(&self.column_state, columns, field, visible)?;
        Ok(self)
    }

    pub fn pin_column(mut self, columns: &[Column], field: &str, side: Option<PinSide>) -> GridResult<Self> {
        self.column_state = pin_column(&self.column_state, columns, field, side)?;
        Ok(self)
    }
}

fn find_column<'a>(columns: &'a [Column], field: &str) -> GridResult<&'a Column> {
    columns
        .iter()
        .find(|c| c.field == field)
        .ok_or_else(|| GridError::UnknownField(field.to_string()))
}
