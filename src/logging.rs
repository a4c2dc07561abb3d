use std::env;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::error::Result;

pub const LOG_FILE: &str = "quickfox.log";
pub const DEBUG_ENV: &str = "QUICKFOX_LOG";

/// Filter precedence: `QUICKFOX_LOG`, then `RUST_LOG`, then the config value
pub fn build_filter(quickfox_log: Option<&str>, fallback: &str) -> EnvFilter {
    match quickfox_log {
        Some(v) if matches!(v, "1" | "true" | "TRUE" | "yes" | "YES") => EnvFilter::new("debug"),
        Some(v) if !v.is_empty() => EnvFilter::new(v),
        _ => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
    }
}

/// Route tracing output to a file; the terminal belongs to the TUI.
///
/// Keep the returned guard alive until exit or buffered lines are lost.
pub fn init(log_dir: &Path, fallback_filter: &str) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)?;
    let appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = build_filter(env::var(DEBUG_ENV).ok().as_deref(), fallback_filter);
    // a second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init();

    Ok(guard)
}
