//! Logging init: append to a file under the XDG state dir, or stderr as a fallback.
//!
//! User-facing progress goes to stdout; the log records what was planned and
//! run, for inspecting a sync after the fact.

use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,srcsync=debug,srcsync_core=debug";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// `~/.local/state/srcsync/srcsync.log`.
pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("srcsync")?;
    Ok(xdg_dirs.get_state_home().join("srcsync").join("srcsync.log"))
}

/// Initialize structured logging to [`log_file_path`] and return that path.
/// On failure (e.g. log dir unwritable) the caller should use [`init_logging_stderr`].
pub fn init_logging() -> Result<PathBuf> {
    let path = log_file_path()?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = fs::OpenOptions::new().create(true).append(true).open(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        cwd = %std::env::current_dir().unwrap_or_default().display(),
        log = %path.display(),
        "srcsync session started"
    );
    Ok(path)
}

/// Initialize logging to stderr only. Used when the log file cannot be opened.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
    tracing::warn!("log file unavailable; logging to stderr");
}
