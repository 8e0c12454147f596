//! Tracing subscriber setup for chatspace binaries.

use std::path::Path;

use chatspace_core::error::{ChatspaceError, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const LOG_FILE_PREFIX: &str = "chatspace.log";

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` overrides `default_filter`. With a `log_dir`, output goes to a
/// daily-rotated file and the returned guard must be kept alive until exit;
/// otherwise output goes to stderr.
pub fn init_logging(default_filter: &str, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .map_err(|e| ChatspaceError::config(format!("Invalid log filter: {}", e)))?;

    match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(writer)
                .with_ansi(false)
                .try_init()
                .map_err(|e| ChatspaceError::config(format!("Failed to init logging: {}", e)))?;
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(|e| ChatspaceError::config(format!("Failed to init logging: {}", e)))?;
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_an_error() {
        // The global subscriber can only be installed once per process.
        let _ = init_logging("warn", None);
        assert!(init_logging("warn", None).is_err());
    }
}
