use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::PinSide;

/// Persisted view configuration, independent of the data.
///
/// Created from the schema on first use and changed only through explicit
/// column operations; sorting, filtering and paging never touch it.
/// Missing entries fall back to the schema's defaults when applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnState {
    /// Field names, leftmost first.
    #[serde(default)]
    pub order: Vec<String>,
    /// Field → width in pixels.
    #[serde(default)]
    pub widths: BTreeMap<String, u32>,
    /// Field → visible.
    #[serde(default)]
    pub visibility: BTreeMap<String, bool>,
    /// Field → pin side; `null` means unpinned.
    #[serde(default)]
    pub pinning: BTreeMap<String, Option<PinSide>>,
}

impl ColumnState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps only entries for the given fields. Used to compare states
    /// against a schema that may have gained or lost columns.
    #[must_use]
    pub fn restricted_to<'a>(&self, fields: impl IntoIterator<Item = &'a str>) -> Self {
        let keep: Vec<&str> = fields.into_iter().collect();
        let known = |f: &String| keep.contains(&f.as_str());
        Self {
            order: self.order.iter().filter(|f| known(f)).cloned().collect(),
            widths: self
                .widths
                .iter()
                .filter(|(f, _)| known(f))
                .map(|(f, w)| (f.clone(), *w))
                .collect(),
            visibility: self
                .visibility
                .iter()
                .filter(|(f, _)| known(f))
                .map(|(f, v)| (f.clone(), *v))
                .collect(),
            pinning: self
                .pinning
                .iter()
                .filter(|(f, _)| known(f))
                .map(|(f, p)| (f.clone(), *p))
                .collect(),
        }
    }
}
