//! Applying and reading persisted column layout, and the explicit column
//! operations that are the only way layout changes.

use axisgrid_model::{Column, ColumnState, PinSide};
use tracing::debug;

use crate::error::{GridError, GridResult};

/// Captures the layout of `columns`: order, declared widths, visibility and
/// pinning of every field.
#[must_use]
pub fn read_column_state(columns: &[Column]) -> ColumnState {
    ColumnState {
        order: columns.iter().map(|c| c.field.clone()).collect(),
        widths: columns
            .iter()
            .filter_map(|c| c.width.map(|w| (c.field.clone(), w)))
            .collect(),
        visibility: columns
            .iter()
            .map(|c| (c.field.clone(), !c.hidden))
            .collect(),
        pinning: columns
            .iter()
            .map(|c| (c.field.clone(), c.pinned))
            .collect(),
    }
}

/// Lays `columns` out according to `state`.
///
/// Fields listed in `state.order` come first, in that order; schema fields
/// it does not mention follow in schema order. Fields in `state` that the
/// schema lacks are ignored. Any field without an entry keeps its schema
/// default.
#[must_use]
pub fn apply_column_state(columns: &[Column], state: &ColumnState) -> Vec<Column> {
    let mut remaining: Vec<Option<&Column>> = columns.iter().map(Some).collect();
    let mut ordered: Vec<&Column> = Vec::with_capacity(columns.len());
    for field in &state.order {
        if let Some(slot) = remaining
            .iter_mut()
            .find(|slot| slot.is_some_and(|c| &c.field == field))
        {
            ordered.extend(slot.take());
        }
    }
    ordered.extend(remaining.into_iter().flatten());

    ordered
        .into_iter()
        .map(|column| {
            let mut column = column.clone();
            if let Some(&width) = state.widths.get(&column.field) {
                column.width = Some(width);
            }
            if let Some(&visible) = state.visibility.get(&column.field) {
                column.hidden = !visible;
            }
            if let Some(&pinned) = state.pinning.get(&column.field) {
                column.pinned = pinned;
            }
            column
        })
        .collect()
}

/// Columns to render: laid out, with hidden ones dropped.
#[must_use]
pub fn visible_columns(columns: &[Column], state: &ColumnState) -> Vec<Column> {
    apply_column_state(columns, state)
        .into_iter()
        .filter(|c| !c.hidden)
        .collect()
}

fn find<'a>(columns: &'a [Column], field: &str) -> GridResult<&'a Column> {
    columns
        .iter()
        .find(|c| c.field == field)
        .ok_or_else(|| GridError::UnknownField(field.to_string()))
}

/// Moves `field` to position `to_index` (clamped to the last position).
pub fn reorder_column(
    state: &ColumnState,
    columns: &[Column],
    field: &str,
    to_index: usize,
) -> GridResult<ColumnState> {
    find(columns, field)?;
    let mut order: Vec<String> = apply_column_state(columns, state)
        .into_iter()
        .map(|c| c.field)
        .filter(|f| f != field)
        .collect();
    let to_index = to_index.min(order.len());
    order.insert(to_index, field.to_string());
    debug!(field, to_index, "Column reordered");
    Ok(ColumnState {
        order,
        ..state.clone()
    })
}

/// Sets the width of `field`, clamped to its bounds. Columns that are not
/// resizable keep their width.
pub fn resize_column(
    state: &ColumnState,
    columns: &[Column],
    field: &str,
    width: u32,
) -> GridResult<ColumnState> {
    let column = find(columns, field)?;
    if !column.resizable {
        debug!(field, "Ignoring resize of fixed-width column");
        return Ok(state.clone());
    }
    let width = column.clamp_width(width);
    let mut next = state.clone();
    next.widths.insert(field.to_string(), width);
    debug!(field, width, "Column resized");
    Ok(next)
}

pub fn set_column_visible(
    state: &ColumnState,
    columns: &[Column],
    field: &str,
    visible: bool,
) -> GridResult<ColumnState> {
    find(columns, field)?;
    let mut next = state.clone();
    next.visibility.insert(field.to_string(), visible);
    debug!(field, visible, "Column visibility changed");
    Ok(next)
}

/// Pins `field` to a side, or unpins it with `None`.
pub fn pin_column(
    state: &ColumnState,
    columns: &[Column],
    field: &str,
    side: Option<PinSide>,
) -> GridResult<ColumnState> {
    find(columns, field)?;
    let mut next = state.clone();
    next.pinning.insert(field.to_string(), side);
    debug!(field, side = ?side, "Column pinning changed");
    Ok(next)
}
