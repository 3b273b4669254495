//! Coercions of loosely-typed cell values.
//!
//! Rows arrive as JSON from the dashboard backend, so a "number" column may
//! hold `"12.5"` and a text column may hold `true`. These helpers give every
//! value a string form, a numeric form and a truthiness, and implement the
//! decimal rounding and digit grouping the formatter builds on.

use serde_json::{Number, Value};
use std::cmp::Ordering;

/// String form of any value: strings verbatim, integral numbers without a
/// decimal point, arrays comma-joined, objects as an opaque marker.
#[must_use]
pub fn display_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_string(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => display_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

pub(crate) fn number_string(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    n.as_f64().map(float_string).unwrap_or_default()
}

fn float_string(x: f64) -> String {
    if x == 0.0 {
        "0".to_string()
    } else if x.fract() == 0.0 && x.abs() < 1e21 {
        format!("{x:.0}")
    } else {
        format!("{x}")
    }
}

/// Numeric form of a value. Numbers pass through; strings are read by their
/// leading numeric prefix (`"12.5%"` → 12.5). Everything else, and anything
/// non-finite, has no numeric form.
#[must_use]
pub fn to_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_float_prefix(s),
        _ => None,
    }
    .filter(|x| x.is_finite())
}

fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }
    s[..end].parse().ok()
}

/// Truthiness: `null`, `false`, `0` and `""` are false, everything else true.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|x| x != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Fixed-point rendering with `digits` decimals. Exact ties round away from
/// zero (`1.25` → `"1.3"`), unlike `format!`, which rounds ties to even.
#[must_use]
pub fn to_fixed(x: f64, digits: usize) -> String {
    let plain = format!("{x:.digits$}");
    let wide = format!("{:.*}", digits + 20, x.abs());
    let tail = wide.split_once('.').map_or("", |(_, frac)| &frac[digits..]);
    let is_tie = tail.starts_with('5') && tail[1..].bytes().all(|b| b == b'0');
    let rendered = if is_tie {
        let nudge = 10f64.powi(-(digits as i32) - 2);
        format!("{:.digits$}", x + nudge.copysign(x))
    } else {
        plain
    };
    strip_negative_zero(rendered)
}

fn strip_negative_zero(s: String) -> String {
    match s.strip_prefix('-') {
        Some(rest) if rest.bytes().all(|b| b == b'0' || b == b'.') => rest.to_string(),
        _ => s,
    }
}

/// Digit-grouped rendering (`1234567.891` → `"1,234,567.891"`) with at most
/// `max_frac` and at least `min_frac` decimals.
#[must_use]
pub fn grouped(x: f64, max_frac: usize, min_frac: usize) -> String {
    let fixed = to_fixed(x.abs(), max_frac);
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let mut frac = frac_part.trim_end_matches('0').to_string();
    while frac.len() < min_frac {
        frac.push('0');
    }
    let mut out = group_thousands(int_part);
    if !frac.is_empty() {
        out.push('.');
        out.push_str(&frac);
    }
    if x < 0.0 && out.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        out.insert(0, '-');
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Case-insensitive first, then lowercase before uppercase at the first
/// case-only difference, then code point order.
#[must_use]
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded
        .then_with(|| case_order(a, b))
        .then_with(|| a.cmp(b))
}

fn case_order(a: &str, b: &str) -> Ordering {
    for (x, y) in a.chars().zip(b.chars()) {
        if x == y {
            continue;
        }
        match (x.is_lowercase(), y.is_lowercase()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }
    }
    Ordering::Equal
}
