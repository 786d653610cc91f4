//! Tracing setup for the binary.
//!
//! Everything at `info` and above goes to `cleanmate.log` in the log
//! directory. The terminal only shows warnings and errors unless verbose
//! output is requested, so log lines do not fight with the progress bar.

use std::env;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "CLEANMATE_LOG";

const LOG_FILE_NAME: &str = "cleanmate.log";

/// Installs the global subscriber.
///
/// The returned guard flushes the file writer on drop and must be held for
/// the life of the program. `None` means the log file could not be opened and
/// only terminal logging is active.
pub fn init_logger(log_dir: &Path, verbose: bool) -> Option<WorkerGuard> {
    let default_filter = if verbose { "debug" } else { "info" };
    let filter = env::var(LOG_ENV).unwrap_or_else(|_| default_filter.to_string());

    let terminal_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let terminal_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact()
        .with_filter(terminal_level);

    let file_appender = std::fs::create_dir_all(log_dir)
        .map_err(|e| e.to_string())
        .and_then(|()| {
            RollingFileAppender::builder()
                .rotation(Rotation::NEVER)
                .filename_prefix(LOG_FILE_NAME)
                .build(log_dir)
                .map_err(|e| e.to_string())
        });

    match file_appender {
        Ok(appender) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(terminal_layer)
                .with(
                    fmt::layer()
                        .with_writer(non_blocking)
                        .with_ansi(false)
                        .with_filter(EnvFilter::new(filter)),
                )
                .init();
            Some(guard)
        }
        Err(reason) => {
            tracing_subscriber::registry().with(terminal_layer).init();
            tracing::warn!(
                "Could not open log file in {}: {}",
                log_dir.display(),
                reason
            );
            None
        }
    }
}
