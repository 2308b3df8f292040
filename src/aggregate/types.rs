//! View table types.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// One reporting record: a page path and its view count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawViewRow {
    /// URL path as reported, possibly with a query string
    pub path: String,
    /// Raw view count
    pub count: u64,
}

impl RawViewRow {
    pub fn new(path: impl Into<String>, count: u64) -> Self {
        Self {
            path: path.into(),
            count,
        }
    }
}

/// Path → count mapping for a single date-range query.
///
/// Built from the rows of one fetch. Duplicate paths are merged additively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawViewTable(HashMap<String, u64>);

impl RawViewTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from fetched rows, summing counts of repeated paths.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = RawViewRow>,
    {
        let mut table = Self::new();
        for row in rows {
            table.add(row.path, row.count);
        }
        table
    }

    /// Adds `count` to the entry for `path`, creating it if needed.
    pub fn add(&mut self, path: impl Into<String>, count: u64) {
        let slot = self.0.entry(path.into()).or_insert(0);
        *slot = slot.saturating_add(count);
    }

    pub fn get(&self, path: &str) -> Option<u64> {
        self.0.get(path).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.0.iter().map(|(path, count)| (path.as_str(), *count))
    }
}

impl<K: Into<String>> FromIterator<(K, u64)> for RawViewTable {
    fn from_iter<T: IntoIterator<Item = (K, u64)>>(iter: T) -> Self {
        let mut table = Self::new();
        for (path, count) in iter {
            table.add(path, count);
        }
        table
    }
}

/// Path → count mapping with variant counts folded into their canonical slug.
///
/// Only produced by [`canonicalize`](super::canonicalize). Sorted so the
/// published context is stable between builds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalViewTable(BTreeMap<String, u64>);

impl CanonicalViewTable {
    pub(crate) fn from_map(map: BTreeMap<String, u64>) -> Self {
        Self(map)
    }

    pub fn get(&self, path: &str) -> Option<u64> {
        self.0.get(path).copied()
    }

    /// Count for `path`, or 0 when the page has no recorded views.
    pub fn count_for(&self, path: &str) -> u64 {
        self.get(path).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.0.iter().map(|(path, count)| (path.as_str(), *count))
    }

    pub fn total(&self) -> u64 {
        self.0.values().fold(0u64, |acc, v| acc.saturating_add(*v))
    }
}

/// Output of one analytics pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateResult {
    /// Canonical counts over the long window
    pub page_view: CanonicalViewTable,
    /// Canonical counts over the short ("popular") window
    pub popular_page_view: CanonicalViewTable,
    /// Sum of all raw long-window counts
    pub total_page_view: u64,
    /// Distinct users over the long window
    pub total_num_users: u64,
}
