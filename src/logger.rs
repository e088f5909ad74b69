//! Debug logging support for rename
//!
//! When debug mode is enabled (`--debug` or `[logging] debug = true`), planned
//! and performed renames are logged to ~/.rename/rename.log.
//! `RENAME_LOG` overrides the default `rename=info` filter.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, registry};

const LOG_ENV: &str = "RENAME_LOG";
const DEFAULT_FILTER: &str = "rename=info";

/// Initialize the debug logging system
///
/// Returns the path to the log file, or None if logging is not enabled or the
/// log file could not be opened.
pub fn init_debug_logging(debug_enabled: bool) -> Result<Option<PathBuf>> {
    if !debug_enabled {
        return Ok(None);
    }

    let log_path = get_log_path()?;
    init_file_logging(&log_path)
}

fn open_log_file(log_path: &Path) -> Result<fs::File> {
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }

    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))
}

fn init_file_logging(log_path: &Path) -> Result<Option<PathBuf>> {
    match open_log_file(log_path) {
        Ok(log_file) => {
            let filter = EnvFilter::try_from_env(LOG_ENV)
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

            let subscriber = registry()
                .with(
                    fmt::layer()
                        .with_writer(log_file)
                        .with_ansi(false)
                        .with_target(false)
                        .with_thread_ids(false)
                        .with_file(false)
                        .with_line_number(false),
                )
                .with(filter);

            tracing::subscriber::set_global_default(subscriber)
                .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

            Ok(Some(log_path.to_path_buf()))
        }
        Err(e) => {
            // A broken log file must not stop the rename itself
            eprintln!("Warning: Could not create log file: {:#}", e);
            Ok(None)
        }
    }
}

/// Get the log file path
fn get_log_path() -> Result<PathBuf> {
    Ok(crate::config::rename_dir()?.join("rename.log"))
}
