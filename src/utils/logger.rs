//! Logging initialization.
//!
//! Logs go to `<ted home>/logs/ted.log.<date>` so they never mix with the
//! command output the user is reading. Files roll over daily.
//!
//! The level is controlled by `RUST_LOG` and defaults to `info`:
//! - `RUST_LOG=debug` - include storage and request details
//! - `RUST_LOG=warn` - warnings and errors only

use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_FILE_PREFIX: &str = "ted.log";

/// Install the global subscriber writing into `log_dir`.
///
/// The returned guard flushes the background writer when dropped, so the
/// caller keeps it alive until exit. Returns `None` when the directory cannot
/// be created or a subscriber is already installed; ted still runs without
/// logs in that case.
pub fn init_logging(log_dir: &Path) -> Option<WorkerGuard> {
    if let Err(e) = fs::create_dir_all(log_dir) {
        eprintln!("Warning: Failed to create logs directory {}: {}", log_dir.display(), e);
        return None;
    }

    let appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Err(e) = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
    {
        eprintln!("Warning: Failed to initialize logging: {}", e);
        return None;
    }

    tracing::info!("Logging initialized - writing to {}", log_dir.display());
    Some(guard)
}
