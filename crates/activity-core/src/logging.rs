use crate::{ActivityError, ActivityResult};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

pub const DEBUG_LOG_ENV: &str = "ACTIVITY_DEBUG_LOG";

/// Where diagnostic output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Append DEBUG-level output to a file.
    File(PathBuf),
    /// WARN-level output on stderr.
    Stderr,
    /// No subscriber at all. Used by the TUI when no log file is configured.
    Disabled,
}

impl LogTarget {
    /// Reads `ACTIVITY_DEBUG_LOG`. Interactive sessions own the terminal, so
    /// they never log to stderr.
    pub fn from_env(interactive: bool) -> Self {
        match std::env::var(DEBUG_LOG_ENV) {
            Ok(path) if !path.is_empty() => LogTarget::File(PathBuf::from(path)),
            _ if interactive => LogTarget::Disabled,
            _ => LogTarget::Stderr,
        }
    }
}

pub fn init(target: &LogTarget) -> ActivityResult<()> {
    match target {
        LogTarget::File(path) => {
            let log_file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;

            tracing_subscriber::fmt()
                .with_writer(log_file)
                .with_env_filter(filter_or("debug"))
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .with_ansi(false)
                .try_init()
                .map_err(|e| ActivityError::Internal(e.to_string()))
        }
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter_or("warn"))
            .try_init()
            .map_err(|e| ActivityError::Internal(e.to_string())),
        LogTarget::Disabled => Ok(()),
    }
}

fn filter_or(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}
