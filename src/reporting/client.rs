//! HTTP client for the reporting and management APIs.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use url::Url;

use super::source::ReportSource;
use super::types::{DataPage, ManagementList, ReportQuery};
use crate::aggregate::RawViewRow;
use crate::auth::AccessToken;
use crate::config::{DEFAULT_PAGE_SIZE, MAX_REPORT_PAGES};
use crate::error_handling::{body_excerpt, describe_reqwest_error, describe_status, AnalyticsError};

/// Authenticated client for one analytics pass.
#[derive(Debug, Clone)]
pub struct ReportingClient {
    http: Arc<reqwest::Client>,
    base_url: String,
    token: AccessToken,
    page_size: u32,
}

impl ReportingClient {
    /// Creates a client against `base_url` (e.g. `https://www.googleapis.com/analytics/v3`).
    pub fn new(http: Arc<reqwest::Client>, base_url: impl Into<String>, token: AccessToken) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            token,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Sets the rows requested per page, clamped to what the API accepts.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.clamp(1, DEFAULT_PAGE_SIZE);
        self
    }

    fn endpoint(&self, path: &str) -> Result<Url, AnalyticsError> {
        let raw = format!("{}/{}", self.base_url.trim_end_matches('/'), path);
        Url::parse(&raw)
            .map_err(|e| AnalyticsError::fetch_with(format!("invalid API URL {}", raw), e))
    }

    fn data_url(
        &self,
        query: &ReportQuery,
        start_index: u64,
        max_results: u32,
    ) -> Result<Url, AnalyticsError> {
        let mut url = self.endpoint("data/ga")?;
        {
            let mut params = url.query_pairs_mut();
            params
                .append_pair("ids", &query.ids())
                .append_pair("start-date", &query.start_date)
                .append_pair("end-date", &query.end_date)
                .append_pair("metrics", &query.metric)
                .append_pair("max-results", &max_results.to_string())
                .append_pair("start-index", &start_index.to_string());
            if let Some(dimension) = &query.dimension {
                params.append_pair("dimensions", dimension);
            }
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, what: &str) -> Result<T, AnalyticsError> {
        log::debug!("GET {}", url);

        let response = self
            .http
            .get(url)
            .bearer_auth(self.token.as_str())
            .send()
            .await
            .map_err(|e| {
                AnalyticsError::fetch_with(
                    format!("{} request failed: {}", what, describe_reqwest_error(&e)),
                    e,
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AnalyticsError::fetch(format!(
                "{} returned {}: {}",
                what,
                describe_status(status),
                body_excerpt(&body)
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AnalyticsError::fetch_with(format!("malformed {} response", what), e))
    }

    async fn first_item(&self, path: &str, what: &str) -> Result<Option<String>, AnalyticsError> {
        let list: ManagementList = self.get_json(self.endpoint(path)?, what).await?;
        Ok(list.items.into_iter().next().map(|item| item.id))
    }
}

impl ReportSource for ReportingClient {
    async fn first_profile_id(&self) -> Result<Option<String>, AnalyticsError> {
        let Some(account) = self.first_item("management/accounts", "account list").await? else {
            log::warn!("No analytics accounts are visible to this service account");
            return Ok(None);
        };

        let Some(property) = self
            .first_item(
                &format!("management/accounts/{}/webproperties", account),
                "web property list",
            )
            .await?
        else {
            log::warn!("Account {} has no web properties", account);
            return Ok(None);
        };

        let profile = self
            .first_item(
                &format!(
                    "management/accounts/{}/webproperties/{}/profiles",
                    account, property
                ),
                "profile list",
            )
            .await?;
        if profile.is_none() {
            log::warn!("Web property {} has no profiles", property);
        }
        Ok(profile)
    }

    async fn fetch_rows(&self, query: &ReportQuery) -> Result<Vec<RawViewRow>, AnalyticsError> {
        let mut rows = Vec::new();
        let mut start_index: u64 = 1;

        for _ in 0..MAX_REPORT_PAGES {
            let url = self.data_url(query, start_index, self.page_size)?;
            let page: DataPage = self.get_json(url, "data query").await?;

            let fetched = page.rows.len();
            for row in page.rows {
                rows.push(parse_row(row)?);
            }
            log::debug!(
                "Fetched {} rows for {} .. {} ({} so far, {} expected)",
                fetched,
                query.start_date,
                query.end_date,
                rows.len(),
                page.total_results
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| "?".to_string())
            );

            let complete = page
                .total_results
                .is_some_and(|total| rows.len() as u64 >= total);
            if fetched == 0 || page.next_link.is_none() || complete {
                return Ok(rows);
            }
            start_index += fetched as u64;
        }

        Err(AnalyticsError::fetch(format!(
            "data query for {} .. {} did not finish within {} pages",
            query.start_date, query.end_date, MAX_REPORT_PAGES
        )))
    }

    async fn fetch_scalar(&self, query: &ReportQuery) -> Result<u64, AnalyticsError> {
        let url = self.data_url(query, 1, 1)?;
        let page: DataPage = self.get_json(url, "totals query").await?;

        let value = page
            .totals_for_all_results
            .get(&query.metric)
            .ok_or_else(|| {
                AnalyticsError::fetch(format!("response has no total for {}", query.metric))
            })?;
        parse_count(value)
    }
}

fn parse_row(row: Vec<String>) -> Result<RawViewRow, AnalyticsError> {
    let mut columns = row.into_iter();
    match (columns.next(), columns.next()) {
        (Some(path), Some(count)) => Ok(RawViewRow::new(path, parse_count(&count)?)),
        _ => Err(AnalyticsError::fetch(
            "malformed data row, expected [path, count]",
        )),
    }
}

fn parse_count(value: &str) -> Result<u64, AnalyticsError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|e| AnalyticsError::fetch_with(format!("non-integer count '{}'", value), e))
}
