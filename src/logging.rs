//! Tracing setup.
//!
//! The terminal belongs to the UI, so log records go to a file in the data
//! directory. The filter comes from `TASKBOARD_LOG` (default `info`).

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, LOG_ENV};
use crate::error::{Error, Result};

/// Install the global subscriber writing to `config.log_path`.
///
/// Records are written on a background thread; keep the returned guard alive
/// until the process is about to exit, dropping it flushes what is pending.
pub fn init_logging(config: &Config) -> Result<WorkerGuard> {
    std::fs::create_dir_all(&config.data_dir)?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    let file_name = config
        .log_path
        .file_name()
        .ok_or_else(|| Error::Config(format!("bad log path {}", config.log_path.display())))?;
    let dir = config.log_path.parent().unwrap_or(config.data_dir.as_path());
    let appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .try_init()
        .map_err(|e| Error::Config(format!("logging already initialised: {e}")))?;
    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // The only test that installs the global subscriber.
    #[test]
    fn test_records_reach_log_file_once_guard_drops() {
        let dir = TempDir::new().unwrap();
        let data_dir = dir.path().join("data");
        let config = Config::resolve_with(None, Some(data_dir.as_path()), |_: &str| None).unwrap();

        let guard = init_logging(&config).unwrap();
        tracing::error!(error = "boom", "command failed");
        drop(guard);

        let written = std::fs::read_to_string(&config.log_path).unwrap();
        assert!(written.contains("command failed"));
        assert!(written.contains("boom"));
    }
}
