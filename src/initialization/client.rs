//! HTTP client initialization.

use std::sync::Arc;
use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::{Config, USER_AGENT};
use crate::error_handling::InitializationError;

/// Connect timeout, kept below the per-request timeout so a dead network fails fast
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Initializes the HTTP client used for token exchange and reporting calls.
///
/// Creates a `reqwest::Client` configured with:
/// - the crate's User-Agent
/// - the configured per-request timeout
/// - a connect timeout no longer than the request timeout
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, InitializationError> {
    let timeout = Duration::from_secs(config.timeout_seconds.max(1));
    let client = ClientBuilder::new()
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(CONNECT_TIMEOUT_SECS)))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(Arc::new(client))
}
