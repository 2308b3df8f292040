//! Reporting API access.
//!
//! [`ReportSource`] is what the analytics pass depends on; [`ReportingClient`]
//! implements it over HTTP, handling profile discovery and pagination.

mod client;
mod source;
mod types;

pub use client::ReportingClient;
pub use source::ReportSource;
pub use types::ReportQuery;
