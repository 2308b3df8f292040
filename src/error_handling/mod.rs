//! Error handling.
//!
//! This module provides:
//! - Error type definitions (`InitializationError`, `AnalyticsError`)
//! - Failure categorisation (`FailureKind`)
//! - Short descriptions of HTTP failures for log messages
//!
//! Analytics failures are never fatal to the caller: the orchestration layer
//! logs them and publishes an empty context.

mod categorization;
mod types;

// Re-export public API
pub use categorization::{body_excerpt, describe_reqwest_error, describe_status};
pub use types::{AnalyticsError, BoxError, FailureKind, InitializationError};
