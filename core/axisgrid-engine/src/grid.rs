//! The render pipeline: rows → sort → page → cells, with selection
//! reconciled against the visible page.

use axisgrid_model::{Column, ColumnSet, ColumnState, FilterModel, GridParams, Row, SortModel};
use tracing::{debug, warn};

use crate::cache::SortCache;
use crate::column_state::{apply_column_state, read_column_state, visible_columns};
use crate::config::GridConfig;
use crate::error::GridResult;
use crate::filter::validate_filter_model;
use crate::format::format_cell;
use crate::pagination::PaginationSummary;
use crate::selection::SelectionSummary;
use crate::sort::sort_rows;
use crate::state::GridState;

/// A dataset bound to its schema and configuration.
///
/// `Grid` holds no state of its own. Pass a [`GridState`] to [`Grid::view`]
/// to get what to render, and feed user actions through the `GridState`
/// transitions (or the shortcuts here that need the dataset).
#[derive(Debug, Clone, Copy)]
pub struct Grid<'a> {
    config: &'a GridConfig,
    columns: &'a ColumnSet,
    rows: &'a [Row],
}

impl<'a> Grid<'a> {
    pub fn new(config: &'a GridConfig, columns: &'a ColumnSet, rows: &'a [Row]) -> Self {
        Self {
            config,
            columns,
            rows,
        }
    }

    #[must_use]
    pub fn config(&self) -> &'a GridConfig {
        self.config
    }

    #[must_use]
    pub fn columns(&self) -> &'a [Column] {
        self.columns.as_slice()
    }

    #[must_use]
    pub fn rows(&self) -> &'a [Row] {
        self.rows
    }

    #[must_use]
    pub fn initial_state(&self) -> GridState {
        GridState::new(self.config, self.columns())
    }

    /// Checks a state restored from storage against this grid's schema and
    /// config. Run it before the first [`Grid::view`] of a restored state.
    pub fn check_state(&self, state: &GridState) -> GridResult<()> {
        state.validate(self.columns(), self.config)
    }

    /// Everything needed to draw the grid for `state`.
    ///
    /// A sort on a field the schema no longer has is dropped with a warning;
    /// [`Grid::check_state`] reports it as an error.
    #[must_use]
    pub fn view(&self, state: &GridState) -> GridView<'a> {
        let sorted = sort_rows(self.rows, self.active_sort(state));
        self.build_view(state, sorted)
    }

    /// Like [`Grid::view`], reusing the sort order in `cache` when neither
    /// `revision` nor the sort changed since the last call.
    pub fn view_cached(&self, state: &GridState, cache: &mut SortCache, revision: u64) -> GridView<'a> {
        let rows = self.rows;
        let sorted = cache
            .sorted_indices(revision, rows, self.active_sort(state))
            .iter()
            .map(|&i| &rows[i])
            .collect();
        self.build_view(state, sorted)
    }

    fn active_sort<'s>(&self, state: &'s GridState) -> Option<&'s SortModel> {
        let sort = state.sort.as_ref()?;
        if self.columns().iter().any(|c| c.field == sort.field) {
            Some(sort)
        } else {
            warn!(field = %sort.field, "Sort field is not in the schema, showing rows unsorted");
            None
        }
    }

    fn build_view(&self, state: &GridState, sorted_rows: Vec<&'a Row>) -> GridView<'a> {
        let pagination = state.pagination(self.rows.len(), self.config);
        let page_rows = pagination.slice(&sorted_rows).to_vec();
        let selection =
            SelectionSummary::new(&state.selection, self.rows, &page_rows, &self.config.row_key);
        debug!(
            page = pagination.current_page(),
            total_pages = pagination.total_pages(),
            visible = page_rows.len(),
            "Built grid view"
        );
        GridView {
            visible_columns: visible_columns(self.columns(), &state.column_state),
            page_numbers: pagination.page_numbers(self.config.page_button_count),
            has_previous: pagination.has_previous(),
            has_next: pagination.has_next(),
            pagination: pagination.summary(),
            sorted_rows,
            page_rows,
            selection,
        }
    }

    /// Display string for one cell.
    #[must_use]
    pub fn format_value(&self, row: &Row, column: &Column) -> String {
        format_cell(row, column)
    }

    pub fn apply_sort(&self, state: GridState, field: &str) -> GridResult<GridState> {
        state.apply_sort(field, self.columns(), self.config)
    }

    #[must_use]
    pub fn goto_page(&self, state: GridState, page: usize) -> GridState {
        state.goto_page(page, self.rows.len())
    }

    #[must_use]
    pub fn next_page(&self, state: GridState) -> GridState {
        state.next_page(self.rows.len())
    }

    #[must_use]
    pub fn previous_page(&self, state: GridState) -> GridState {
        state.previous_page(self.rows.len())
    }

    /// Toggles select-all for the page `state` currently shows.
    #[must_use]
    pub fn toggle_select_all_on_page(&self, state: GridState) -> GridState {
        let page = self.view(&state).page_rows;
        state.toggle_select_all_on_page(&page, self.config)
    }

    /// Fetch parameters for the page `state` shows, for a query layer that
    /// pages on its side. The state and the filter model are validated
    /// first. The row range is not clamped to the local rows, since the
    /// query layer owns the count.
    pub fn grid_params(&self, state: &GridState, filter: Option<&FilterModel>) -> GridResult<GridParams> {
        self.check_state(state)?;
        if let Some(filter) = filter {
            validate_filter_model(filter, self.columns())?;
        }
        let page_size = state.page_size.max(1);
        let start_row = state.current_page.saturating_sub(1).saturating_mul(page_size);
        Ok(GridParams {
            start_row,
            end_row: start_row.saturating_add(page_size),
            sort_model: state.sort.iter().cloned().collect(),
            filter_model: filter.cloned(),
        })
    }

    /// Layout of the schema as it stands, before any user change.
    #[must_use]
    pub fn read_column_state(&self) -> ColumnState {
        read_column_state(self.columns())
    }

    /// Schema columns laid out by `state`, hidden ones included.
    #[must_use]
    pub fn apply_column_state(&self, state: &ColumnState) -> Vec<Column> {
        apply_column_state(self.columns(), state)
    }
}

/// One rendered frame of the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridView<'a> {
    pub visible_columns: Vec<Column>,
    /// The whole dataset in display order.
    pub sorted_rows: Vec<&'a Row>,
    pub page_rows: Vec<&'a Row>,
    pub pagination: PaginationSummary,
    pub page_numbers: Vec<usize>,
    pub has_previous: bool,
    pub has_next: bool,
    pub selection: SelectionSummary<'a>,
}

impl GridView<'_> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pagination.total_rows == 0
    }

    /// Formatted cells of the visible page, one `Vec` per row, in visible
    /// column order.
    #[must_use]
    pub fn cells(&self) -> Vec<Vec<String>> {
        self.page_rows
            .iter()
            .map(|row| {
                self.visible_columns
                    .iter()
                    .map(|column| format_cell(row, column))
                    .collect()
            })
            .collect()
    }
}
