//! Configuration constants.
//!
//! Defaults for every setting, API endpoints, and operational limits.

// Setting defaults
/// First day of the long window
pub const DEFAULT_START_DATE: &str = "2005-01-01";
pub const DEFAULT_END_DATE: &str = "today";
/// Start of the short ("popular") window
pub const DEFAULT_POPULAR_START: &str = "a month ago";
pub const DEFAULT_METRIC: &str = "ga:pageviews";
pub const DEFAULT_OUTPUT_PATH: &str = "./ga_context.json";
/// Save-as pattern used to compute page URLs when annotating pages
pub const DEFAULT_SAVE_AS: &str = "{slug}.html";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// Reporting API
/// Dimension that keys every page-level row
pub const PAGE_PATH_DIMENSION: &str = "ga:pagePath";
/// Metric used for the total user count
pub const USERS_METRIC: &str = "ga:users";
pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com/analytics/v3";
/// Rows requested per page of a data query (the API caps this at 10,000)
pub const DEFAULT_PAGE_SIZE: u32 = 10_000;
/// Upper bound on pages followed for one query
pub const MAX_REPORT_PAGES: usize = 1_000;

// Auth
pub const ANALYTICS_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/analytics.readonly";
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
pub const JWT_BEARER_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
/// Lifetime requested for the signed assertion (the token endpoint allows at most one hour)
pub const ASSERTION_LIFETIME_SECS: i64 = 3600;

// Error message limits
/// Maximum response body excerpt carried in an error message
pub const MAX_ERROR_BODY_CHARS: usize = 300;

/// User-Agent sent with every API request
pub const USER_AGENT: &str = concat!("ga_page_view/", env!("CARGO_PKG_VERSION"));

// Context keys read by templates
pub const TOTAL_PAGE_VIEW_KEY: &str = "total_page_view";
pub const TOTAL_NUM_USERS_KEY: &str = "total_num_users";
pub const PAGES_KEY: &str = "pages";
