//! Logging Infrastructure
//!
//! The desk writes its own output to stdout, so log records go to stderr,
//! or to a daily rolling file when a log directory is configured.

use std::fs;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize the logger with optional file output
///
/// `level` accepts anything `EnvFilter` does (`warn`, `stock_client=debug`).
pub fn init_logger_with_file(level: &str, log_dir: Option<&Path>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    let installed = match log_dir {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            let file_appender = tracing_appender::rolling::daily(dir, "stock-desk");
            subscriber
                .with_ansi(false)
                .with_writer(file_appender)
                .try_init()
        }
        None => subscriber.with_writer(std::io::stderr).try_init(),
    };

    installed.map_err(|e| anyhow::anyhow!("Failed to install logger: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_logger_creates_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        let log_dir = dir.path().join("logs");

        init_logger_with_file("info", Some(&log_dir)).unwrap();
        tracing::info!("written to file");

        assert!(log_dir.is_dir());
        // A second subscriber cannot be installed in the same process
        assert!(init_logger_with_file("info", None).is_err());
    }
}
