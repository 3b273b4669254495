//! Row selection by identity key.
//!
//! Selection is a set of [`RowKey`]s, never of row positions, so it survives
//! re-sorting, paging and dataset refreshes. Selected rows are always
//! recomputed from the keys against the current dataset.

use axisgrid_model::Row;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;
use tracing::{debug, warn};

use crate::value::number_string;

/// Normalized row identity.
///
/// String keys are used verbatim and numeric keys are stringified, so the
/// number `1` and the string `"1"` are the same key. A row whose key field
/// is missing or not a string/number is identified by its whole JSON
/// encoding instead; that key is stable only while the row's content is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowKey(String);

impl RowKey {
    /// Key of `row` under `key_field`, with the content fallback.
    #[must_use]
    pub fn of(row: &Row, key_field: &str) -> Self {
        match row.get(key_field) {
            Some(Value::String(s)) => Self(s.clone()),
            Some(Value::Number(n)) => Self(number_string(n)),
            other => {
                debug!(
                    key_field,
                    found = ?other.map(|v| v.to_string()),
                    "Row has no usable key, falling back to content key"
                );
                Self(serde_json::to_string(row).unwrap_or_default())
            }
        }
    }

    /// Whether `row` carries a string or number under `key_field`.
    #[must_use]
    pub fn is_keyed(row: &Row, key_field: &str) -> bool {
        matches!(row.get(key_field), Some(Value::String(_) | Value::Number(_)))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RowKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RowKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<i64> for RowKey {
    fn from(n: i64) -> Self {
        Self(n.to_string())
    }
}

/// Selection state of the rows on the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSelection {
    /// No visible row is selected, or the page is empty.
    Empty,
    /// Some but not all visible rows are selected.
    Partial,
    /// The page is non-empty and every visible row is selected.
    Full,
}

impl PageSelection {
    #[must_use]
    pub fn is_all_selected(self) -> bool {
        self == Self::Full
    }

    /// The header checkbox's indeterminate state.
    #[must_use]
    pub fn is_some_selected(self) -> bool {
        self == Self::Partial
    }
}

/// The set of selected keys. Transitions return a new value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    keys: BTreeSet<RowKey>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_keys(keys: impl IntoIterator<Item = RowKey>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn keys(&self) -> &BTreeSet<RowKey> {
        &self.keys
    }

    #[must_use]
    pub fn contains(&self, key: &RowKey) -> bool {
        self.keys.contains(key)
    }

    #[must_use]
    pub fn is_selected(&self, row: &Row, key_field: &str) -> bool {
        self.contains(&RowKey::of(row, key_field))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Flips membership of one key.
    #[must_use]
    pub fn toggled(&self, key: RowKey) -> Self {
        let mut keys = self.keys.clone();
        if !keys.remove(&key) {
            keys.insert(key);
        }
        Self { keys }
    }

    #[must_use]
    pub fn toggle_row(&self, row: &Row, key_field: &str) -> Self {
        self.toggled(RowKey::of(row, key_field))
    }

    /// Select-all for the visible page only.
    ///
    /// If every row of `page` is selected they are all deselected, otherwise
    /// they are all selected. Keys of rows on other pages are untouched.
    #[must_use]
    pub fn toggle_page(&self, page: &[&Row], key_field: &str) -> Self {
        let page_keys: Vec<RowKey> = page.iter().map(|r| RowKey::of(r, key_field)).collect();
        let mut keys = self.keys.clone();
        if self.status_of(&page_keys).is_all_selected() {
            for key in &page_keys {
                keys.remove(key);
            }
        } else {
            keys.extend(page_keys);
        }
        Self { keys }
    }

    #[must_use]
    pub fn page_status(&self, page: &[&Row], key_field: &str) -> PageSelection {
        let page_keys: Vec<RowKey> = page.iter().map(|r| RowKey::of(r, key_field)).collect();
        self.status_of(&page_keys)
    }

    fn status_of(&self, page_keys: &[RowKey]) -> PageSelection {
        let selected = page_keys.iter().filter(|k| self.keys.contains(k)).count();
        if selected == 0 {
            PageSelection::Empty
        } else if selected == page_keys.len() {
            PageSelection::Full
        } else {
            PageSelection::Partial
        }
    }

    /// Rows of `rows` whose key is selected, in dataset order. Keys with no
    /// matching row are kept in the set but produce nothing here.
    #[must_use]
    pub fn selected_rows<'a>(&self, rows: &'a [Row], key_field: &str) -> Vec<&'a Row> {
        if self.keys.is_empty() {
            return Vec::new();
        }
        rows.iter()
            .filter(|row| self.is_selected(row, key_field))
            .collect()
    }
}

/// Selection as seen from the current view.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionSummary<'a> {
    pub selected_keys: BTreeSet<RowKey>,
    pub selected_rows: Vec<&'a Row>,
    pub is_all_selected_on_page: bool,
    pub is_some_selected_on_page: bool,
    /// Rows identified by their content because the key field is unusable.
    pub unkeyed_rows: usize,
}

impl<'a> SelectionSummary<'a> {
    #[must_use]
    pub fn new(selection: &Selection, rows: &'a [Row], page: &[&Row], key_field: &str) -> Self {
        let status = selection.page_status(page, key_field);
        let unkeyed_rows = rows.iter().filter(|r| !RowKey::is_keyed(r, key_field)).count();
        if unkeyed_rows > 0 {
            warn!(
                key_field,
                unkeyed_rows,
                "Rows without a usable key are selected by content"
            );
        }
        Self {
            selected_keys: selection.keys().clone(),
            selected_rows: selection.selected_rows(rows, key_field),
            is_all_selected_on_page: status.is_all_selected(),
            is_some_selected_on_page: status.is_some_selected(),
            unkeyed_rows,
        }
    }
}
