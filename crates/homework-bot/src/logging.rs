use std::{fs::OpenOptions, path::Path, sync::Mutex};

use anyhow::Context;
use tracing::Subscriber;
use tracing_subscriber::{EnvFilter, prelude::*};

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "warn,homework_bot=info,review_client=info,telegram_client=info";

/// `RUST_LOG` takes full directive syntax; without it the workspace crates log at info.
fn env_filter_from(rust_log: Option<&str>) -> anyhow::Result<EnvFilter> {
    let directives = rust_log
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(DEFAULT_LOG_FILTER);
    EnvFilter::try_new(directives)
        .with_context(|| format!("Failed to create tracing filter from `{}`", directives))
}

fn env_filter() -> anyhow::Result<EnvFilter> {
    env_filter_from(std::env::var("RUST_LOG").ok().as_deref())
}

/// Subscriber writing to stderr and appending to `log_file`
pub fn build_subscriber(log_file: &Path) -> anyhow::Result<impl Subscriber + Send + Sync> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("Failed to open log file {}", log_file.display()))?;

    Ok(tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(env_filter()?),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .with_filter(env_filter()?),
        ))
}

pub fn init_logging(log_file: &Path) -> anyhow::Result<()> {
    build_subscriber(log_file)?
        .try_init()
        .context("Failed to install tracing subscriber")
}
