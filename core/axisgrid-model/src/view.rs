//! Saved views and the request shape sent to the query layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::{ColumnState, FilterModel, SortModel};

/// Identifier of a saved view. UUID v7 so views list in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewId(Uuid);

impl ViewId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }

    pub fn parse(s: &str) -> crate::Result<Self> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for ViewId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ViewId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A named combination of filters, sort and column layout.
///
/// `sort_model` is a list on the wire for forward compatibility with
/// multi-column sort; the grid only ever writes zero or one entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedView {
    pub id: ViewId,
    pub name: String,
    #[serde(default)]
    pub filter_model: FilterModel,
    #[serde(default)]
    pub sort_model: Vec<SortModel>,
    #[serde(default)]
    pub column_state: ColumnState,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_default: bool,
}

impl SavedView {
    pub fn new(name: &str, column_state: ColumnState) -> Self {
        Self {
            id: ViewId::new(),
            name: name.into(),
            filter_model: FilterModel::default(),
            sort_model: Vec::new(),
            column_state,
            is_default: false,
        }
    }

    /// The active sort, if any. Extra entries are ignored.
    #[must_use]
    pub fn sort(&self) -> Option<&SortModel> {
        self.sort_model.first()
    }

    pub fn set_sort(&mut self, sort: Option<SortModel>) {
        self.sort_model = sort.into_iter().collect();
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Server-side fetch parameters for one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridParams {
    /// First row index, 0-based.
    pub start_row: usize,
    /// One past the last row index.
    pub end_row: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sort_model: Vec<SortModel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_model: Option<FilterModel>,
}
