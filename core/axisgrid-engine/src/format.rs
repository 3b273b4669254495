//! Cell formatting.
//!
//! `format_cell(row, column)` maps a raw value to its display string using
//! one strategy per [`ColumnType`]. It never fails: a missing value renders
//! as [`EMPTY`], a non-numeric value in a numeric column renders as
//! [`EMPTY`], and an unparseable date renders as the raw input.

use axisgrid_model::{
    Column, ColumnType, CompositeFormat, RangeFormat, RangeUnit, Row, SecondaryKind,
    SecondaryValue, field_value,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::value::{display_string, grouped, is_truthy, to_fixed, to_number};

/// Placeholder for missing or unusable values.
pub const EMPTY: &str = "—";

/// Label shown by range columns whose row is flagged unknown.
pub const UNKNOWN: &str = "Unknown";

const MILLION: f64 = 1_000_000.0;
const THOUSAND: f64 = 1_000.0;

const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: [&str; 7] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
];

/// Formats the value of `column` in `row`.
///
/// Range columns read their min/max fields instead of `column.field`;
/// composite columns also read their secondary field.
#[must_use]
pub fn format_cell(row: &Row, column: &Column) -> String {
    match column.column_type {
        ColumnType::Range => match &column.range_format {
            Some(range) => format_range(row, range),
            None => format_value(field_value(row, &column.field), column),
        },
        ColumnType::Composite => match field_value(row, &column.field) {
            None => EMPTY.to_string(),
            Some(value) => format_composite(value, column.format.as_ref(), row),
        },
        _ => format_value(field_value(row, &column.field), column),
    }
}

/// Formats a single value without row context.
///
/// Composite columns render only their primary value here, and range
/// columns fall back to the raw value, since both need sibling fields.
#[must_use]
pub fn format_value(value: Option<&Value>, column: &Column) -> String {
    let Some(value) = value.filter(|v| !v.is_null()) else {
        return EMPTY.to_string();
    };
    match column.column_type {
        ColumnType::Text | ColumnType::Range => display_string(value),
        ColumnType::Number => numeric(value, format_number),
        ColumnType::Currency => numeric(value, format_currency),
        ColumnType::Percentage => numeric(value, format_percentage),
        ColumnType::Date => format_date(value),
        ColumnType::Boolean => format_boolean(value),
        ColumnType::Composite => {
            let primary = column
                .format
                .as_ref()
                .map_or(ColumnType::Number, |f| f.primary.into());
            format_primary(value, primary)
        }
    }
}

fn numeric(value: &Value, f: fn(f64) -> String) -> String {
    to_number(value).map_or_else(|| EMPTY.to_string(), f)
}

/// Compact notation: `1.0M`, `2.5K`, otherwise grouped with up to three
/// decimals. The sign is kept; thresholds test the magnitude.
#[must_use]
pub fn format_number(x: f64) -> String {
    if x.abs() >= MILLION {
        format!("{}M", to_fixed(x / MILLION, 1))
    } else if x.abs() >= THOUSAND {
        format!("{}K", to_fixed(x / THOUSAND, 1))
    } else {
        grouped(x, 3, 0)
    }
}

/// Same thresholds as [`format_number`] with a `$` after the sign and no
/// decimals below a thousand.
#[must_use]
pub fn format_currency(x: f64) -> String {
    let magnitude = x.abs();
    let body = if magnitude >= MILLION {
        format!("{}M", to_fixed(magnitude / MILLION, 1))
    } else if magnitude >= THOUSAND {
        format!("{}K", to_fixed(magnitude / THOUSAND, 1))
    } else {
        grouped(magnitude, 0, 0)
    };
    with_sign(x, format!("${body}"))
}

/// Values strictly between -1 and 1 (other than 0) are read as fractions
/// and scaled by 100; anything else is already a percentage. `0.5` is
/// therefore always 50%, never half a percent.
#[must_use]
pub fn format_percentage(x: f64) -> String {
    let display = if x != 0.0 && x.abs() < 1.0 { x * 100.0 } else { x };
    format!("{}%", to_fixed(display, 1))
}

/// Percentage with an explicit `+` for gains.
#[must_use]
pub fn format_change(x: f64) -> String {
    let pct = format_percentage(x);
    if x > 0.0 { format!("+{pct}") } else { pct }
}

#[must_use]
pub fn format_multiplier(x: f64) -> String {
    format!("{}x", to_fixed(x, 1))
}

/// `Jan 5, 2024`. Falsy input renders [`EMPTY`]; input that does not parse
/// as a date is returned unchanged.
#[must_use]
pub fn format_date(value: &Value) -> String {
    if !is_truthy(value) {
        return EMPTY.to_string();
    }
    let raw = display_string(value);
    match value.as_str().and_then(parse_date) {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => raw,
    }
}

/// Parses the date forms the dashboard backend emits. Timestamps with an
/// offset keep the calendar date of that offset.
#[must_use]
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.date_naive());
    }
    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        })
}

fn format_boolean(value: &Value) -> String {
    let label = if is_truthy(value) { "Yes" } else { "No" };
    label.to_string()
}

fn format_primary(value: &Value, primary: ColumnType) -> String {
    match primary {
        ColumnType::Currency => numeric(value, format_currency),
        ColumnType::Percentage => numeric(value, format_percentage),
        _ => numeric(value, format_number),
    }
}

fn format_composite(value: &Value, format: Option<&CompositeFormat>, row: &Row) -> String {
    let Some(format) = format else {
        return format_primary(value, ColumnType::Number);
    };
    if to_number(value).is_none() {
        return EMPTY.to_string();
    }
    let primary = format_primary(value, format.primary.into());
    match format.secondary.as_ref().and_then(|s| format_secondary(row, s)) {
        Some(secondary) => format!("{primary} {secondary}"),
        None => primary,
    }
}

fn format_secondary(row: &Row, secondary: &SecondaryValue) -> Option<String> {
    let x = field_value(row, &secondary.field).and_then(to_number)?;
    let body = match secondary.kind {
        SecondaryKind::Percentage => format_percentage(x),
        SecondaryKind::Change => format_change(x),
        SecondaryKind::Multiplier => format_multiplier(x),
    };
    Some(format!("{}{}{}", secondary.prefix(), body, secondary.suffix()))
}

fn format_range(row: &Row, range: &RangeFormat) -> String {
    let unknown = range
        .is_unknown_field
        .as_deref()
        .and_then(|flag| field_value(row, flag))
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if unknown {
        return UNKNOWN.to_string();
    }

    let bound = |field: &str| {
        field_value(row, field)
            .and_then(to_number)
            .map(|x| format_range_bound(x, range.unit_type))
    };
    match (bound(&range.min_field), bound(&range.max_field)) {
        (None, None) => EMPTY.to_string(),
        (min, max) => format!(
            "{} to {}",
            min.as_deref().unwrap_or(EMPTY),
            max.as_deref().unwrap_or(EMPTY)
        ),
    }
}

fn format_range_bound(x: f64, unit: RangeUnit) -> String {
    match unit {
        RangeUnit::Dollars => with_sign(x, format!("${}", grouped(x.abs(), 2, 2))),
        RangeUnit::Years => to_fixed(x, 0),
        RangeUnit::Sqft => format!("{} sqft", grouped(x, 0, 0)),
        RangeUnit::Acres => format!("{} acres", grouped(x, 2, 0)),
    }
}

fn with_sign(x: f64, body: String) -> String {
    if x < 0.0 && body.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        format!("-{body}")
    } else {
        body
    }
}
