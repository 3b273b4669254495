//! Contract types for the Axis data grid.
//!
//! Defines the serializable value objects shared between the grid engine,
//! the dashboard widgets, and whatever persists view state:
//! - [`Column`]: one schema entry (field, display type, width bounds, flags)
//! - [`SortModel`]: the single active sort, or `None`
//! - [`FilterModel`]: declarative, unexecuted filter conditions per field
//! - [`ColumnState`]: persisted order/widths/visibility/pinning
//! - [`SavedView`] and [`GridParams`]: what gets stored and what gets sent
//!   to the query layer
//!
//! Nothing here has behavior beyond construction helpers; the engine crate
//! owns formatting, sorting, pagination and selection.

mod column;
mod column_state;
mod filter;
mod row;
mod sort;
mod view;

pub use column::{
    Align, Column, ColumnSet, ColumnType, CompositeFormat, PinSide, PrimaryType, RangeFormat,
    RangeUnit, SecondaryKind, SecondaryValue, DEFAULT_MIN_WIDTH,
};
pub use column_state::ColumnState;
pub use filter::{FilterClause, FilterCondition, FilterJoin, FilterModel, FilterOperator, FilterValue};
pub use row::{Row, field_value};
pub use sort::{SortModel, SortOrder};
pub use view::{GridParams, SavedView, ViewId};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or decoding contract objects.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("duplicate column field: {0}")]
    DuplicateField(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid view id: {0}")]
    InvalidViewId(#[from] uuid::Error),
}
