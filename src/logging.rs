//! Logging setup
//!
//! `--debug` writes timestamped records to a file in the temp directory.
//! Without it, one-shot runs log to stderr under `RUST_LOG`; the TUI keeps the
//! terminal to itself and logs nothing.

use log::{debug, error, info, warn};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Once;

// run once in a single thread. this prevents race conditions
static INIT: Once = Once::new();

const QUIET_MODULES: [&str; 5] = ["reqwest", "hyper", "hyper_util", "crossterm", "ratatui"];

fn base_builder(level: log::LevelFilter) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    for module in QUIET_MODULES {
        builder.filter_module(module, log::LevelFilter::Warn);
    }
    builder
}

/// Initializes file logging when debug mode is enabled
/// Creates a file in the temp directory and sets up logger with timestamps
pub fn init_debug_logging() -> crate::Result<PathBuf> {
    let mut log_path = std::env::temp_dir();
    log_path.push(crate::constants::DEBUG_LOG_FILE);

    // Create or truncate the log file
    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&log_path)
        .map_err(|e| {
            crate::LookupError::IoError(std::io::Error::new(
                e.kind(),
                format!("Failed to create log file {}: {}", log_path.display(), e),
            ))
        })?;

    INIT.call_once(move || {
        base_builder(log::LevelFilter::Debug)
            .target(env_logger::Target::Pipe(Box::new(log_file)))
            .format(|buf, record| {
                writeln!(
                    buf,
                    "{} [{}] {}:{} - {}",
                    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S.%3f UTC"),
                    record.level(),
                    record.file().unwrap_or("unknown"),
                    record.line().unwrap_or(0),
                    record.args()
                )
            })
            .init();
    });

    info!("Debug logging initialized to: {}", log_path.display());

    Ok(log_path)
}

/// Stderr logging for one-shot runs, filtered by `RUST_LOG` (default `warn`)
pub fn init_stderr_logging() {
    INIT.call_once(|| {
        let mut builder = base_builder(log::LevelFilter::Warn);
        if let Ok(filters) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filters);
        }
        builder.target(env_logger::Target::Stderr).init();
    });
}

/// Log a debug message
pub fn debug_log(msg: &str) {
    debug!("{}", msg);
}

/// Log an info message
pub fn info_log(msg: &str) {
    info!("{}", msg);
}

/// Log a warning message
pub fn warn_log(msg: &str) {
    warn!("{}", msg);
}

/// Log an error message
pub fn error_log(msg: &str) {
    error!("{}", msg);
}
