//! The reporting source seam.

use super::types::ReportQuery;
use crate::aggregate::RawViewRow;
use crate::error_handling::AnalyticsError;

/// Anything that can answer the three questions an analytics pass asks.
///
/// Implemented by [`ReportingClient`](super::ReportingClient) for the real
/// API; tests substitute in-memory sources.
#[allow(async_fn_in_trait)]
pub trait ReportSource {
    /// First profile of the first web property of the first account, if any.
    async fn first_profile_id(&self) -> Result<Option<String>, AnalyticsError>;

    /// All `(path, count)` rows of a dimensioned query, across every page.
    async fn fetch_rows(&self, query: &ReportQuery) -> Result<Vec<RawViewRow>, AnalyticsError>;

    /// The query's total for its metric.
    async fn fetch_scalar(&self, query: &ReportQuery) -> Result<u64, AnalyticsError>;
}
