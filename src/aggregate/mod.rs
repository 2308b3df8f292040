//! Page view aggregation.
//!
//! Pure functions over already-fetched report rows:
//! - [`canonicalize`] folds tracking and extension-less variants into the
//!   canonical `.html` slug
//! - [`summarize_totals`] sums the raw counts
//!
//! Nothing here performs I/O or can fail.

mod canonical;
mod types;

pub use canonical::{canonicalize, parent_path};
pub use types::{AggregateResult, CanonicalViewTable, RawViewRow, RawViewTable};

/// Sum of all counts in a raw (pre-canonicalization) table.
///
/// Folding never affects this number.
pub fn summarize_totals(raw: &RawViewTable) -> u64 {
    raw.iter()
        .fold(0u64, |acc, (_, count)| acc.saturating_add(count))
}
