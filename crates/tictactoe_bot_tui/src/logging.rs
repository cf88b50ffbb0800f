//! Tracing subscriber setup.

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Logs to `path` so output does not corrupt the terminal UI.
pub fn init_file(path: &Path, fallback_filter: &str) -> Result<()> {
    let log_file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    // Don't fail if a subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(fallback_filter))
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

/// Logs to stderr, for headless commands.
pub fn init_stderr(fallback_filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(fallback_filter))
        .with_writer(std::io::stderr)
        .try_init();
}
