//! Memoized sort order.
//!
//! Sorting is the only step of a render whose cost grows faster than the
//! row count, and most state changes (paging, selection, column layout) do
//! not affect it. `SortCache` keeps the last order and recomputes it only
//! when the data revision or the sort model changes.

use axisgrid_model::{Row, SortModel};
use tracing::debug;

use crate::sort::sorted_indices;

/// Last computed order, keyed on `(revision, sort)`.
///
/// The revision is the caller's: bump it whenever the rows change. The
/// cache never inspects row contents.
#[derive(Debug, Clone, Default)]
pub struct SortCache {
    key: Option<(u64, Option<SortModel>)>,
    order: Vec<usize>,
    hits: u64,
    misses: u64,
}

impl SortCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Indices of `rows` in display order for `sort`.
    pub fn sorted_indices(&mut self, revision: u64, rows: &[Row], sort: Option<&SortModel>) -> &[usize] {
        let fresh = matches!(
            &self.key,
            Some((rev, cached)) if *rev == revision && cached.as_ref() == sort
                && self.order.len() == rows.len()
        );
        if fresh {
            self.hits += 1;
        } else {
            self.misses += 1;
            debug!(revision, rows = rows.len(), "Recomputing sort order");
            self.order = sorted_indices(rows, sort);
            self.key = Some((revision, sort.cloned()));
        }
        &self.order
    }

    pub fn invalidate(&mut self) {
        self.key = None;
        self.order.clear();
    }

    #[must_use]
    pub fn hits(&self) -> u64 {
        self.hits
    }

    #[must_use]
    pub fn misses(&self) -> u64 {
        self.misses
    }
}
