//! Date setting resolution.
//!
//! Date settings are accepted in several forms and turned into strings the
//! reporting API understands:
//!
//! - `today`, `yesterday`, `NdaysAgo`: passed through (the API resolves them)
//! - `YYYY-MM-DD`: validated and passed through
//! - `a month ago`, `2 weeks ago`, `an hour ago`: resolved against today
//! - humantime durations followed by `ago` (`90days ago`, `1y 2months ago`)

use chrono::{Days, Months, NaiveDate};
use thiserror::Error;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Failure to resolve a date setting.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// The expression matches none of the accepted forms.
    #[error("unrecognized date expression '{0}'")]
    Unrecognized(String),

    /// The expression resolves outside chrono's representable range.
    #[error("date expression '{0}' is out of range")]
    OutOfRange(String),
}

/// Resolves a date setting relative to `today`.
///
/// # Errors
///
/// Returns `DateError::Unrecognized` for unknown forms and
/// `DateError::OutOfRange` when the offset underflows the calendar.
pub fn resolve_date(expr: &str, today: NaiveDate) -> Result<String, DateError> {
    let normalized = expr.trim().to_lowercase();

    match normalized.as_str() {
        "today" | "yesterday" => return Ok(normalized),
        "now" => return Ok("today".to_string()),
        _ => {}
    }

    if let Some(days) = normalized.strip_suffix("daysago") {
        if !days.is_empty() && days.chars().all(|c| c.is_ascii_digit()) {
            return Ok(format!("{}daysAgo", days));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(&normalized, DATE_FORMAT) {
        return Ok(date.format(DATE_FORMAT).to_string());
    }

    let Some(offset) = normalized.strip_suffix("ago").map(str::trim) else {
        return Err(DateError::Unrecognized(expr.to_string()));
    };

    let resolved = match parse_phrase(offset) {
        Some(back) => back.apply(today),
        None => match humantime::parse_duration(offset) {
            Ok(duration) => today.checked_sub_days(Days::new(duration.as_secs() / 86_400)),
            Err(_) => return Err(DateError::Unrecognized(expr.to_string())),
        },
    };

    resolved
        .map(|date| date.format(DATE_FORMAT).to_string())
        .ok_or_else(|| DateError::OutOfRange(expr.to_string()))
}

/// Calendar offset parsed from a phrase like `a month` or `3 weeks`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Offset {
    Days(u64),
    Months(u64),
}

impl Offset {
    fn apply(self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            Offset::Days(n) => today.checked_sub_days(Days::new(n)),
            Offset::Months(n) => u32::try_from(n)
                .ok()
                .and_then(|n| today.checked_sub_months(Months::new(n))),
        }
    }
}

fn parse_phrase(phrase: &str) -> Option<Offset> {
    let mut words = phrase.split_whitespace();
    let quantity = words.next()?;
    let unit = words.next()?;
    if words.next().is_some() {
        return None;
    }

    let n: u64 = match quantity {
        "a" | "an" | "one" => 1,
        digits => digits.parse().ok()?,
    };

    match unit.trim_end_matches('s') {
        "hour" => Some(Offset::Days(n / 24)),
        "minute" => Some(Offset::Days(n / (24 * 60))),
        "second" => Some(Offset::Days(n / 86_400)),
        "day" => Some(Offset::Days(n)),
        "week" => n.checked_mul(7).map(Offset::Days),
        "month" => Some(Offset::Months(n)),
        "year" => n.checked_mul(12).map(Offset::Months),
        _ => None,
    }
}
