//! Log file setup
//!
//! The TUI owns the terminal, so logs go to a file in the data directory.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use tracing_subscriber::EnvFilter;

use crate::config::GridConfig;

const LOG_FILE: &str = "cgrid.log";

/// Install the global subscriber. Returns the log file path.
pub fn init(verbose: bool) -> Result<PathBuf> {
    let dir = GridConfig::data_dir()?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let directive = if verbose {
        "content_grid=debug"
    } else {
        "content_grid=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive.parse()?))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to install log subscriber: {e}"))?;

    Ok(path)
}
