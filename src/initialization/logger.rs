//! Logger initialization.
//!
//! Log lines are interleaved with the site generator's own output, so every
//! plain line is tagged `[ga_page_view]` and names the component it came
//! from (`auth`, `reporting`, `context`, ...). JSON lines carry the same
//! component as a field.

use std::io::Write;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::*;
use log::{Level, LevelFilter};

const CRATE_TARGET: &str = "ga_page_view";

/// Component name for a log target: the first module below the crate root.
///
/// Records from the crate root report `run`; foreign targets (dependencies)
/// are reported as their own crate name.
fn component(target: &str) -> &str {
    if target == CRATE_TARGET {
        return "run";
    }
    match target.strip_prefix(CRATE_TARGET).and_then(|t| t.strip_prefix("::")) {
        Some(rest) => rest.split("::").next().unwrap_or("run"),
        None => target.split("::").next().unwrap_or(target),
    }
}

fn colored_level(level: Level) -> ColoredString {
    let name = level.to_string();
    match level {
        Level::Error => name.red().bold(),
        Level::Warn => name.yellow(),
        Level::Info => name.green(),
        Level::Debug => name.blue(),
        Level::Trace => name.purple(),
    }
}

/// Initializes the logger with the specified level and format.
///
/// `RUST_LOG` is read first and `level` overrides it for this crate, so
/// `RUST_LOG=reqwest=debug` still works next to `--log-level`. Dependency
/// chatter from the HTTP stack is capped at `info`.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// # Trace token exchange and pagination
/// ga_page_view --key-file key.json --log-level debug
///
/// # Machine-readable output for CI logs
/// ga_page_view --key-file key.json --log-format json
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();

    builder.filter_level(level);
    for noisy in ["reqwest", "hyper", "hyper_util"] {
        builder.filter_module(noisy, LevelFilter::Info.min(level));
    }
    builder.filter_module(CRATE_TARGET, level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{{\"ts\":{},\"level\":\"{}\",\"component\":\"{}\",\"msg\":{}}}",
                    chrono::Utc::now().timestamp_millis(),
                    record.level(),
                    component(record.target()),
                    serde_json::to_string(&record.args().to_string())
                        .unwrap_or_else(|_| "\"\"".into())
                )
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "[{}] {} {}: {}",
                    CRATE_TARGET.cyan(),
                    colored_level(record.level()),
                    component(record.target()).dimmed(),
                    record.args()
                )
            });
        }
    }

    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_of_crate_modules() {
        assert_eq!(component("ga_page_view"), "run");
        assert_eq!(component("ga_page_view::auth::token"), "auth");
        assert_eq!(component("ga_page_view::reporting::client"), "reporting");
        assert_eq!(component("ga_page_view::dates"), "dates");
    }

    #[test]
    fn test_component_of_dependencies() {
        assert_eq!(component("reqwest::connect"), "reqwest");
        assert_eq!(component("hyper_util::client::legacy"), "hyper_util");
        // Not a submodule of this crate despite the shared prefix.
        assert_eq!(component("ga_page_view_extra::x"), "ga_page_view_extra");
    }

    #[test]
    fn test_second_init_reports_logger_error() {
        // env_logger can only be installed once per process; whichever call
        // comes first wins and every later one must fail cleanly.
        let _ = init_logger_with(LevelFilter::Info, LogFormat::Plain);
        let result = init_logger_with(LevelFilter::Debug, LogFormat::Json);
        assert!(matches!(result, Err(InitializationError::LoggerError(_))));
    }
}
