//! Error type definitions.
//!
//! This module defines all error types used throughout the application.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

use crate::dates::DateError;

/// Boxed error used as the `source` of analytics failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Failures of the analytics pass.
///
/// Every variant aborts the whole pass; there is no partial result. The
/// orchestration layer logs the full cause chain and publishes an empty
/// context instead of failing the site build.
#[derive(Error, Debug)]
pub enum AnalyticsError {
    /// Credential loading, signing, or token exchange failed.
    #[error("authentication failed: {context}")]
    Authentication {
        /// What was being attempted
        context: String,
        /// Underlying cause, if any
        #[source]
        source: Option<BoxError>,
    },

    /// A reporting or management API call failed, or its response was malformed.
    #[error("report fetch failed: {context}")]
    Fetch {
        /// What was being attempted
        context: String,
        /// Underlying cause, if any
        #[source]
        source: Option<BoxError>,
    },

    /// The account has no account, web property, or profile to query.
    #[error("no analytics profile is visible to this service account")]
    NoProfile,

    /// A date setting could not be resolved.
    #[error("invalid {setting} setting")]
    InvalidDate {
        /// Name of the offending setting
        setting: &'static str,
        /// Parse failure
        #[source]
        source: DateError,
    },
}

impl AnalyticsError {
    pub fn auth(context: impl Into<String>) -> Self {
        AnalyticsError::Authentication {
            context: context.into(),
            source: None,
        }
    }

    pub fn auth_with(context: impl Into<String>, source: impl Into<BoxError>) -> Self {
        AnalyticsError::Authentication {
            context: context.into(),
            source: Some(source.into()),
        }
    }

    pub fn fetch(context: impl Into<String>) -> Self {
        AnalyticsError::Fetch {
            context: context.into(),
            source: None,
        }
    }

    pub fn fetch_with(context: impl Into<String>, source: impl Into<BoxError>) -> Self {
        AnalyticsError::Fetch {
            context: context.into(),
            source: Some(source.into()),
        }
    }

    pub fn invalid_date(setting: &'static str, source: DateError) -> Self {
        AnalyticsError::InvalidDate { setting, source }
    }

    /// Coarse category of this failure, used for the diagnostic summary.
    pub fn kind(&self) -> FailureKind {
        match self {
            AnalyticsError::Authentication { .. } => FailureKind::Authentication,
            AnalyticsError::Fetch { .. } | AnalyticsError::NoProfile => FailureKind::Fetch,
            AnalyticsError::InvalidDate { .. } => FailureKind::Configuration,
        }
    }
}

/// Categories of analytics failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Credential or key-loading failure from the identity provider
    Authentication,
    /// Network or API-level failure during a data fetch
    Fetch,
    /// A setting is present but unusable
    Configuration,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Authentication => "Authentication failure",
            FailureKind::Fetch => "Fetch failure",
            FailureKind::Configuration => "Invalid configuration",
        }
    }
}
