//! Single-column, stable sorting.

use axisgrid_model::{Column, Row, SortModel, SortOrder, field_value};
use serde_json::Value;
use std::cmp::Ordering;

use crate::value::{display_string, locale_compare};

/// Next sort after the header of `column` is activated.
///
/// The same field cycles `asc → desc → none`; a different field always
/// starts at `asc`, whatever it was sorted by before.
#[must_use]
pub fn next_sort(current: Option<&SortModel>, column: &Column) -> Option<SortModel> {
    match current {
        Some(sort) if sort.field == column.field => match sort.order {
            SortOrder::Asc => Some(SortModel::desc(&column.field)),
            SortOrder::Desc => None,
        },
        _ => Some(SortModel::asc(&column.field)),
    }
}

/// Compares two cell values for `order`.
///
/// Missing values (absent or `null`) go to the end of the chosen direction:
/// last for ascending, first for descending. Two missing values are equal.
#[must_use]
pub fn compare_values(a: Option<&Value>, b: Option<&Value>, order: SortOrder) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => match order {
            SortOrder::Asc => Ordering::Greater,
            SortOrder::Desc => Ordering::Less,
        },
        (Some(_), None) => match order {
            SortOrder::Asc => Ordering::Less,
            SortOrder::Desc => Ordering::Greater,
        },
        (Some(a), Some(b)) => {
            let ord = compare_present(a, b);
            match order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        }
    }
}

fn compare_present(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            _ => Ordering::Equal,
        },
        (Value::String(x), Value::String(y)) => locale_compare(x, y),
        _ => locale_compare(&display_string(a), &display_string(b)),
    }
}

/// Row positions in sorted order. Without a sort this is the identity.
///
/// Stable: rows that compare equal keep their input order. The input is
/// never reordered.
#[must_use]
pub fn sorted_indices(rows: &[Row], sort: Option<&SortModel>) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..rows.len()).collect();
    if let Some(sort) = sort {
        let field = sort.field.as_str();
        indices.sort_by(|&i, &j| {
            compare_values(
                field_value(&rows[i], field),
                field_value(&rows[j], field),
                sort.order,
            )
        });
    }
    indices
}

/// Borrowing view of `rows` in sorted order.
#[must_use]
pub fn sort_rows<'a>(rows: &'a [Row], sort: Option<&SortModel>) -> Vec<&'a Row> {
    sorted_indices(rows, sort)
        .into_iter()
        .map(|i| &rows[i])
        .collect()
}
