//! Error categorization for HTTP failures.
//!
//! Turns `reqwest` failures and non-success responses into short, log-friendly
//! descriptions that are attached to `AnalyticsError` contexts.

use reqwest::StatusCode;

use crate::config::MAX_ERROR_BODY_CHARS;

/// Describes a `reqwest::Error` in a few words.
///
/// Status codes are checked first, then the reqwest error kind.
pub fn describe_reqwest_error(error: &reqwest::Error) -> String {
    if let Some(status) = error.status() {
        return describe_status(status);
    }

    let kind = if error.is_builder() {
        "request builder error"
    } else if error.is_timeout() {
        "request timed out"
    } else if error.is_connect() {
        "connection failed"
    } else if error.is_redirect() {
        "redirect error"
    } else if error.is_body() {
        "response body error"
    } else if error.is_decode() {
        "response decode error"
    } else if error.is_request() {
        "request error"
    } else {
        "HTTP error"
    };
    kind.to_string()
}

/// Describes an HTTP status code, naming the common API failure cases.
pub fn describe_status(status: StatusCode) -> String {
    match status.as_u16() {
        400 => "bad request (400)".to_string(),
        401 => "unauthorized (401)".to_string(),
        403 => "forbidden (403), check that the service account can read the view".to_string(),
        404 => "not found (404)".to_string(),
        429 => "quota exceeded (429)".to_string(),
        500 => "internal server error (500)".to_string(),
        503 => "service unavailable (503)".to_string(),
        code => format!("HTTP status {}", code),
    }
}

/// Truncates a response body for inclusion in an error message.
pub fn body_excerpt(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= MAX_ERROR_BODY_CHARS {
        return trimmed.to_string();
    }
    let excerpt: String = trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect();
    format!("{}... (truncated)", excerpt)
}
