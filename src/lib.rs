//! ga_page_view library: page view analytics for static site builds
//!
//! This library fetches per-page view counts from the Google Analytics
//! reporting API once per site build, folds tracking-parameter and
//! extension-less URL variants into their canonical `.html` slug, and
//! publishes the totals into the template context of the site generator.
//!
//! # Example
//!
//! ```no_run
//! use ga_page_view::{run_page_views, Config};
//! use std::path::PathBuf;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     key_file: Some(PathBuf::from("service-account.json")),
//!     ..Default::default()
//! };
//!
//! // Never fails on analytics errors; the context is simply left empty.
//! let context = run_page_views(&config).await;
//! println!("total page views: {:?}", context.total_page_view);
//! context.merge_into_file(&config.output).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

pub mod aggregate;
pub mod auth;
pub mod config;
pub mod context;
pub mod dates;
pub mod error_handling;
pub mod initialization;
pub mod reporting;

// Re-export public API
pub use aggregate::{canonicalize, parent_path, summarize_totals, AggregateResult};
pub use config::{Config, LogFormat, LogLevel};
pub use context::SiteContext;
pub use error_handling::{AnalyticsError, FailureKind};
pub use run::{collect_page_views, fetch_page_views, run_page_views};

// Internal run module (contains the analytics pass)
mod run {
    use chrono::{Local, NaiveDate, Utc};
    use log::{error, info};

    use crate::aggregate::{canonicalize, summarize_totals, AggregateResult, RawViewTable};
    use crate::auth::{authenticate, Credentials};
    use crate::config::{Config, ANALYTICS_READONLY_SCOPE, USERS_METRIC};
    use crate::context::SiteContext;
    use crate::dates::resolve_date;
    use crate::error_handling::AnalyticsError;
    use crate::initialization::init_client;
    use crate::reporting::{ReportQuery, ReportSource, ReportingClient};

    /// Runs one analytics pass against an already-authenticated source.
    ///
    /// Resolves the date settings relative to `today`, picks the profile
    /// (configured, or the first one the source exposes), then fetches the
    /// long window, the popular window and the user total, in that order.
    ///
    /// # Errors
    ///
    /// Any failure aborts the pass; no partial result is returned.
    pub async fn collect_page_views<S: ReportSource>(
        config: &Config,
        source: &S,
        today: NaiveDate,
    ) -> Result<AggregateResult, AnalyticsError> {
        let start_date = resolve_date(&config.start_date, today)
            .map_err(|e| AnalyticsError::invalid_date("start date", e))?;
        let end_date = resolve_date(&config.end_date, today)
            .map_err(|e| AnalyticsError::invalid_date("end date", e))?;
        let popular_start = resolve_date(&config.popular_start, today)
            .map_err(|e| AnalyticsError::invalid_date("popular start", e))?;

        let profile_id = match config.profile_id.as_deref() {
            Some(id) => id.to_string(),
            None => source
                .first_profile_id()
                .await?
                .ok_or(AnalyticsError::NoProfile)?,
        };
        info!("Querying profile ga:{}", profile_id);

        let rows = source
            .fetch_rows(&ReportQuery::page_paths(
                &profile_id,
                &config.metric,
                &start_date,
                &end_date,
            ))
            .await?;
        let raw = RawViewTable::from_rows(rows);
        let total_page_view = summarize_totals(&raw);
        let page_view = canonicalize(&raw);
        info!(
            "{} paths, {} page views between {} and {}",
            raw.len(),
            total_page_view,
            start_date,
            end_date
        );

        let popular_rows = source
            .fetch_rows(&ReportQuery::page_paths(
                &profile_id,
                &config.metric,
                &popular_start,
                &end_date,
            ))
            .await?;
        let popular_page_view = canonicalize(&RawViewTable::from_rows(popular_rows));
        info!(
            "{} paths viewed between {} and {}",
            popular_page_view.len(),
            popular_start,
            end_date
        );

        let total_num_users = source
            .fetch_scalar(&ReportQuery::scalar(
                &profile_id,
                USERS_METRIC,
                &start_date,
                &end_date,
            ))
            .await?;
        info!("{} users between {} and {}", total_num_users, start_date, end_date);

        Ok(AggregateResult {
            page_view,
            popular_page_view,
            total_page_view,
            total_num_users,
        })
    }

    /// Authenticates against the reporting API and runs the analytics pass.
    ///
    /// # Errors
    ///
    /// Returns the first authentication or fetch failure.
    pub async fn fetch_page_views(config: &Config) -> Result<AggregateResult, AnalyticsError> {
        let http = init_client(config)
            .map_err(|e| AnalyticsError::fetch_with("failed to build HTTP client", e))?;
        let credentials = Credentials::from_config(config).await?;
        let token = authenticate(&http, &credentials, ANALYTICS_READONLY_SCOPE, Utc::now()).await?;

        let source = ReportingClient::new(http, config.api_base.as_str(), token)
            .with_page_size(config.page_size);
        collect_page_views(config, &source, Local::now().date_naive()).await
    }

    /// Best-effort analytics pass.
    ///
    /// On success the returned context carries both totals and both per-slug
    /// tables. On any failure the error and its cause chain are logged and
    /// an empty context is returned, so a broken analytics setup never
    /// breaks the site build.
    pub async fn run_page_views(config: &Config) -> SiteContext {
        match fetch_page_views(config).await {
            Ok(result) => {
                info!(
                    "Published {} page views from {} users",
                    result.total_page_view, result.total_num_users
                );
                SiteContext::from_result(result)
            }
            Err(e) => {
                let kind = e.kind();
                error!(
                    "Failed to fetch page view information ({}): {:#}",
                    kind,
                    anyhow::Error::from(e)
                );
                SiteContext::default()
            }
        }
    }
}
