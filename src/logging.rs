//! Logging setup: stdout always, plus a log file in debug builds.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::prelude::*;

const LOG_FILE_NAME: &str = "photoscribe.log";

/// Install the global subscriber.
///
/// Keep the returned guard alive for the duration of the program so the file
/// writer flushes.
pub fn setup_logging() -> Option<WorkerGuard> {
    let (file_writer, guard) = if cfg!(debug_assertions) {
        match open_log_file(&crate::paths::logs_dir()) {
            Some((writer, guard)) => (Some(writer), Some(guard)),
            None => (None, None),
        }
    } else {
        (None, None)
    };

    // Configure file layer (no ANSI colors for file output)
    let file_layer = file_writer.map(|writer| {
        tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(true)
            .with_level(true)
    });

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true)
        .with_target(true)
        .with_level(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,photoscribe=debug"));

    if let Err(e) = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stdout_layer)
        .try_init()
    {
        eprintln!("Logging already initialized: {}", e);
    }

    guard
}

fn open_log_file(logs_dir: &Path) -> Option<(NonBlocking, WorkerGuard)> {
    if std::fs::create_dir_all(logs_dir).is_err() {
        eprintln!("Failed to create logs directory");
        return None;
    }

    write_session_separator(&logs_dir.join(LOG_FILE_NAME));

    let file_appender = tracing_appender::rolling::never(logs_dir, LOG_FILE_NAME);
    Some(tracing_appender::non_blocking(file_appender))
}

/// Append a session separator to an existing log file.
fn write_session_separator(log_file_path: &Path) {
    if let Ok(mut file) = OpenOptions::new().append(true).open(log_file_path) {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let separator = "=".repeat(80);
        let _ = writeln!(
            file,
            "\n\n{}\n=== New Session Started at {} ===\n{}\n",
            separator, timestamp, separator
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separator_appends_to_existing_log() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LOG_FILE_NAME);
        std::fs::write(&path, "earlier line\n").unwrap();

        write_session_separator(&path);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("earlier line\n"));
        assert!(contents.contains("=== New Session Started at "));
    }

    #[test]
    fn test_separator_skips_missing_log() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LOG_FILE_NAME);
        write_session_separator(&path);
        assert!(!path.exists());
    }
}
