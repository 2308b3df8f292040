//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `ga_page_view` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - Page annotation and writing the context file
//!
//! Analytics failures never change the exit code: the build continues with
//! an empty context. Only local failures (logger, pages file, output file)
//! exit with status 1.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use ga_page_view::context::{annotate_pages, load_pages};
use ga_page_view::initialization::init_logger_with;
use ga_page_view::{run_page_views, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists)
    // Try loading from current directory first, then from the executable's directory
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    // Parse command-line arguments (and env) into Config
    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;
    config.log_settings();

    match run(&config).await {
        Ok(published) => {
            if published {
                println!("Page view analytics written to {}", config.output.display());
            } else {
                println!(
                    "Page view analytics unavailable; wrote empty context to {}",
                    config.output.display()
                );
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("ga_page_view error: {:#}", e);
            process::exit(1);
        }
    }
}

/// Runs the pass, annotates pages, and writes the context. Returns whether
/// aggregates were published.
async fn run(config: &Config) -> Result<bool> {
    let mut context = run_page_views(config).await;

    if let Some(pages_path) = &config.pages {
        let pages = load_pages(pages_path).await?;
        log::info!("Annotating {} pages", pages.len());
        context.pages = annotate_pages(pages, &config.save_as, &context);
    }

    context.merge_into_file(&config.output).await?;
    Ok(context.has_aggregates())
}
