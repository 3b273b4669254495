//! Grid engine for the Axis data grid.
//!
//! Takes rows and a column schema and produces a sorted, paginated,
//! selectable, formatted view:
//!
//! - [`format_cell`]: display strings per column type (currency, dates,
//!   composites, ranges...)
//! - [`sort_rows`]: stable single-column sort with nulls at the end
//! - [`Pagination`]: page arithmetic and the page-button window
//! - [`Selection`]: key-based selection that survives sorting and paging
//! - [`validate_filter_model`]: shape checks for filter models handed to
//!   the query layer
//! - [`GridState`] and [`Grid`]: the caller-owned state and the pipeline
//!   that turns it into a [`GridView`]
//!
//! Formatting, sorting, paging and selection are total: bad cell data is
//! rendered or ordered somehow, never rejected. Only caller mistakes
//! (unknown fields, bad page sizes, malformed filters) return
//! [`GridError`].

mod cache;
mod column_state;
mod config;
mod error;
mod filter;
mod format;
mod grid;
mod pagination;
mod selection;
mod sort;
mod state;
mod value;

pub use cache::SortCache;
pub use column_state::{
    apply_column_state, pin_column, read_column_state, reorder_column, resize_column,
    set_column_visible, visible_columns,
};
pub use config::{DEFAULT_PAGE_SIZE_OPTIONS, GridConfig};
pub use error::{FilterViolation, GridError, GridResult, ViolationReason};
pub use filter::{parse_filter_model, validate_filter_model};
pub use format::{
    EMPTY, UNKNOWN, format_cell, format_change, format_currency, format_date, format_multiplier,
    format_number, format_percentage, format_value, parse_date,
};
pub use grid::{Grid, GridView};
pub use pagination::{Pagination, PaginationSummary, clamp_page, total_pages};
pub use selection::{PageSelection, RowKey, Selection, SelectionSummary};
pub use sort::{compare_values, next_sort, sort_rows, sorted_indices};
pub use state::GridState;
pub use value::{display_string, to_number};
