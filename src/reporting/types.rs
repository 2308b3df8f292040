//! Reporting API request and response types.

use std::collections::HashMap;

use serde::Deserialize;

use crate::config::PAGE_PATH_DIMENSION;

/// One data query against a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportQuery {
    pub profile_id: String,
    pub metric: String,
    /// Row dimension; `None` for scalar (totals-only) queries
    pub dimension: Option<String>,
    pub start_date: String,
    pub end_date: String,
}

impl ReportQuery {
    /// Per-page rows of `metric` over a date range.
    pub fn page_paths(profile_id: &str, metric: &str, start_date: &str, end_date: &str) -> Self {
        Self {
            profile_id: profile_id.to_string(),
            metric: metric.to_string(),
            dimension: Some(PAGE_PATH_DIMENSION.to_string()),
            start_date: start_date.to_string(),
            end_date: end_date.to_string(),
        }
    }

    /// Total of `metric` over a date range, without a dimension.
    pub fn scalar(profile_id: &str, metric: &str, start_date: &str, end_date: &str) -> Self {
        Self {
            dimension: None,
            ..Self::page_paths(profile_id, metric, start_date, end_date)
        }
    }

    /// The `ids` parameter value.
    pub fn ids(&self) -> String {
        format!("ga:{}", self.profile_id)
    }
}

/// A management list response (accounts, web properties, or profiles).
#[derive(Debug, Deserialize)]
pub(crate) struct ManagementList {
    #[serde(default)]
    pub items: Vec<ManagementItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ManagementItem {
    pub id: String,
}

/// One page of a data query response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DataPage {
    /// Absent when the query matched nothing
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
    #[serde(default)]
    pub total_results: Option<u64>,
    #[serde(default)]
    pub next_link: Option<String>,
    #[serde(default)]
    pub totals_for_all_results: HashMap<String, String>,
}
