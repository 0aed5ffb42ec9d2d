//! Logging infrastructure for cartomark hosts.
//!
//! Structured logging with file and console output:
//! - Writes to a log file in the given directory (cleared on session start)
//! - Also prints to stdout for tailing during development
//! - Configurable via the RUST_LOG environment variable
//!
//! The engine itself only emits `tracing` events; hosts that already
//! install their own subscriber can skip this module entirely.

use std::fs;
use std::io;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Guard that must be kept alive for the duration of logging.
///
/// Dropping this guard will flush and close the log file writer.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

/// Initialize the logging system.
///
/// Creates the log directory if needed, clears the previous log file,
/// and sets up dual output to both file and stdout.
///
/// # Errors
///
/// Returns an error if the log directory cannot be created or the log
/// file cannot be cleared.
pub fn init_logging(log_dir: &str, log_file: &str) -> Result<LoggingGuard, io::Error> {
    fs::create_dir_all(log_dir)?;

    // Clearing by writing empty content handles both the existing and
    // the not-yet-existing file.
    let log_path = Path::new(log_dir).join(log_file);
    fs::write(&log_path, "")?;

    let file_appender = tracing_appender::rolling::never(log_dir, log_file);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stdout)
        .with_ansi(true);

    // Defaults to INFO when RUST_LOG is not set
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .init();

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

/// Get the default log directory path.
pub fn default_log_dir() -> &'static str {
    "logs"
}

/// Get the default log file name.
pub fn default_log_file() -> &'static str {
    "cartomark.log"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        assert_eq!(default_log_dir(), "logs");
        assert_eq!(default_log_file(), "cartomark.log");
    }

    #[test]
    fn test_creates_directory_and_clears_file() {
        // init_logging itself can't run twice per process (global
        // subscriber), so exercise the file operations it performs.
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let log_dir = dir.path().join("nested").join("logs");
        let log_dir_str = log_dir.to_str().unwrap();

        fs::create_dir_all(log_dir_str).expect("Failed to create directory");
        let log_path = log_dir.join("test.log");
        fs::write(&log_path, "old log data").expect("Failed to write");
        fs::write(&log_path, "").expect("Failed to clear log file");

        assert_eq!(
            fs::read_to_string(&log_path).unwrap(),
            "",
            "Log file should be cleared"
        );
    }
}
