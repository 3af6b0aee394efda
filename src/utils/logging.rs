//! Logging system initialization
//!
//! Sets up tracing-based logging. By default events go to stderr; with a log
//! directory they go to `simple-wol.log` in that directory instead, and the
//! previous sessions' logs are rotated on startup, keeping five of them.

use crate::error::{Result, StringError, WolError};
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt};

/// Maximum number of historical log files to keep (simple-wol.log.1 through .5)
const MAX_LOG_FILES: u8 = 5;

/// Base name of the log file inside the log directory
const LOG_FILE_NAME: &str = "simple-wol.log";

/// How logging should be set up
#[derive(Debug, Clone, Default)]
pub struct LoggingOptions {
    /// Lower the default level from `warn` to `info`
    pub verbose: bool,
    /// Write to a file in this directory instead of stderr
    pub log_dir: Option<PathBuf>,
}

impl LoggingOptions {
    fn default_filter(&self) -> &'static str {
        if self.verbose { "info" } else { "warn" }
    }
}

/// Initialize the logging system
///
/// The level can always be overridden with the `RUST_LOG` environment variable.
pub fn init_logging(options: &LoggingOptions) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(options.default_filter()));

    match options.log_dir {
        Some(ref log_dir) => {
            std::fs::create_dir_all(log_dir).map_err(|e| WolError::LoggingError(Box::new(e)))?;
            rotate_logs_on_startup(&log_dir.join(LOG_FILE_NAME))?;

            // Rotation happens once per session above, not by time
            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::NEVER)
                .filename_prefix(LOG_FILE_NAME)
                .build(log_dir)
                .map_err(|e| WolError::LoggingError(Box::new(e)))?;

            let subscriber = fmt()
                .with_writer(file_appender)
                .with_env_filter(filter)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .finish();

            tracing::subscriber::set_global_default(subscriber)
                .map_err(|e| WolError::LoggingError(Box::new(e)))?;
        }
        None => {
            let subscriber = fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(filter)
                .with_target(false)
                .finish();

            tracing::subscriber::set_global_default(subscriber)
                .map_err(|e| WolError::LoggingError(Box::new(e)))?;
        }
    }

    tracing::info!("simple-wol v{} started", env!("CARGO_PKG_VERSION"));

    Ok(())
}

/// Shift `simple-wol.log` to `.1`, `.1` to `.2` and so on, dropping the oldest
fn rotate_logs_on_startup(log_path: &Path) -> Result<()> {
    if !log_path.exists() {
        return Ok(());
    }

    let log_dir = log_path
        .parent()
        .ok_or_else(|| WolError::LoggingError(StringError::new("Invalid log path")))?;
    let log_name = log_path
        .file_name()
        .ok_or_else(|| WolError::LoggingError(StringError::new("Invalid log filename")))?
        .to_string_lossy();

    let io_err = |e: std::io::Error| WolError::LoggingError(Box::new(e));

    let oldest_log = log_dir.join(format!("{log_name}.{MAX_LOG_FILES}"));
    if oldest_log.exists() {
        std::fs::remove_file(&oldest_log).map_err(io_err)?;
    }

    for i in (1..MAX_LOG_FILES).rev() {
        let current_log = log_dir.join(format!("{log_name}.{i}"));
        if current_log.exists() {
            let next_log = log_dir.join(format!("{log_name}.{}", i + 1));
            std::fs::rename(&current_log, &next_log).map_err(io_err)?;
        }
    }

    std::fs::rename(log_path, log_dir.join(format!("{log_name}.1"))).map_err(io_err)?;

    Ok(())
}
