//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration. Every analytics setting can also come from the
//! environment (or a `.env` file), using the setting names site configs
//! already use.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::*;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Analytics pass configuration.
///
/// Parsed from the command line and environment by the binary, or built
/// programmatically by library users.
///
/// # Examples
///
/// ```no_run
/// use ga_page_view::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     key_file: Some(PathBuf::from("service-account.json")),
///     popular_start: "2 weeks ago".to_string(),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "ga_page_view",
    version,
    about = "Publishes page view analytics into a site generator's template context"
)]
pub struct Config {
    /// Service account key file (JSON)
    #[arg(long, env = "GOOGLE_KEY_FILE")]
    pub key_file: Option<PathBuf>,

    /// Service account email (defaults to the key file's client_email)
    #[arg(long, env = "GOOGLE_SERVICE_ACCOUNT")]
    pub service_account: Option<String>,

    /// Pre-issued OAuth2 access token; skips the service account flow
    #[arg(long, env = "GA_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Analytics view (profile) id; the first visible profile is used when unset
    #[arg(long, env = "GA_PROFILE_ID")]
    pub profile_id: Option<String>,

    /// Start of the long window
    #[arg(long, env = "GA_START_DATE", default_value = DEFAULT_START_DATE)]
    pub start_date: String,

    /// End of both windows
    #[arg(long, env = "GA_END_DATE", default_value = DEFAULT_END_DATE)]
    pub end_date: String,

    /// Start of the popular window, e.g. "a month ago" or "2 weeks ago"
    #[arg(long, env = "POPULAR_POST_START", default_value = DEFAULT_POPULAR_START)]
    pub popular_start: String,

    /// Metric counted per page
    #[arg(long, env = "GA_METRIC", default_value = DEFAULT_METRIC)]
    pub metric: String,

    /// JSON context file to merge the results into
    #[arg(long, env = "GA_CONTEXT_FILE", default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// JSON array of pages to annotate with their view counts
    #[arg(long)]
    pub pages: Option<PathBuf>,

    /// URL pattern of annotated pages, with {field} placeholders
    #[arg(long, default_value = DEFAULT_SAVE_AS)]
    pub save_as: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Rows requested per page of a data query
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: u32,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Reporting API base URL
    #[arg(long, hide = true, default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Token endpoint override (defaults to the key file's token_uri)
    #[arg(long, hide = true)]
    pub token_uri: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            key_file: None,
            service_account: None,
            access_token: None,
            profile_id: None,
            start_date: DEFAULT_START_DATE.to_string(),
            end_date: DEFAULT_END_DATE.to_string(),
            popular_start: DEFAULT_POPULAR_START.to_string(),
            metric: DEFAULT_METRIC.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT_PATH),
            pages: None,
            save_as: DEFAULT_SAVE_AS.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            page_size: DEFAULT_PAGE_SIZE,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            api_base: DEFAULT_API_BASE.to_string(),
            token_uri: None,
        }
    }
}

impl Config {
    /// Logs the effective settings at debug level, marking defaulted ones.
    ///
    /// Secrets are never logged.
    pub fn log_settings(&self) {
        fn mark(value: &str, default: &str) -> &'static str {
            if value == default {
                " (default)"
            } else {
                ""
            }
        }

        log::debug!(
            "Long window: {}{} .. {}{}",
            self.start_date,
            mark(&self.start_date, DEFAULT_START_DATE),
            self.end_date,
            mark(&self.end_date, DEFAULT_END_DATE)
        );
        log::debug!(
            "Popular window start: {}{}",
            self.popular_start,
            mark(&self.popular_start, DEFAULT_POPULAR_START)
        );
        log::debug!("Metric: {}{}", self.metric, mark(&self.metric, DEFAULT_METRIC));
        match &self.profile_id {
            Some(id) => log::debug!("Profile: ga:{}", id),
            None => log::debug!("Profile: first visible profile (default)"),
        }
        if self.access_token.is_some() {
            log::debug!("Credentials: pre-issued access token");
        } else if let Some(path) = &self.key_file {
            log::debug!("Credentials: service account key {}", path.display());
        } else {
            log::debug!("Credentials: none configured");
        }
    }
}
