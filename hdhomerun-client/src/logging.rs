//! Logging system with console output and optional rotated file output.
//!
//! `log` records (including those forwarded by [`LogCrateSink`]) are
//! bridged into `tracing`.
//!
//! [`LogCrateSink`]: hdhomerun_client::LogCrateSink

use std::fs;
use std::io;
use std::path::Path;

use chrono::Local;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LOG_FILE_NAME: &str = "hdhrctl.log";

/// Initialize logging.
///
/// # Arguments
/// * `verbose` - Whether to enable debug-level logging
/// * `level` - Level from the config file, used when not verbose
/// * `log_dir` - Directory for daily rotated log files, if any
/// * `retention_days` - Number of days to keep log files
///
/// The returned guard flushes the file writer when dropped.
pub(crate) fn init_logging(
    verbose: bool,
    level: Option<&str>,
    log_dir: Option<&Path>,
    retention_days: u64,
) -> Result<Option<WorkerGuard>, Box<dyn std::error::Error>> {
    let default_level = if verbose { "debug" } else { level.unwrap_or("info") };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let console = fmt::layer()
        .with_writer(io::stderr)
        .with_target(verbose)
        .with_level(true)
        .with_timer(LocalTimeTimer);

    let (file, guard) = match log_dir {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            clean_old_logs(dir, retention_days)?;

            let file_appender = tracing_appender::rolling::daily(dir, LOG_FILE_NAME);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::layer()
                .with_writer(non_blocking)
                .with_target(true)
                .with_level(true)
                .with_ansi(false)
                .with_timer(LocalTimeTimer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console)
        .with(file);

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| format!("Failed to set default subscriber: {}", e))?;

    tracing_log::LogTracer::init()
        .map_err(|e| format!("Failed to initialize LogTracer: {}", e))?;

    Ok(guard)
}

/// Remove log files older than `retention_days`.
fn clean_old_logs(log_dir: &Path, retention_days: u64) -> io::Result<()> {
    let cutoff = Local::now() - chrono::Duration::days(retention_days as i64);

    for entry in fs::read_dir(log_dir)? {
        let entry = entry?;
        let path = entry.path();

        let is_log = path.is_file()
            && path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with(LOG_FILE_NAME));
        if !is_log {
            continue;
        }

        let modified: chrono::DateTime<Local> = match entry.metadata().and_then(|m| m.modified()) {
            Ok(modified) => modified.into(),
            Err(_) => continue,
        };
        if modified < cutoff {
            if let Err(e) = fs::remove_file(&path) {
                eprintln!("Failed to remove old log file {:?}: {}", path, e);
            }
        }
    }

    Ok(())
}

/// Custom timer for local time formatting in logs
#[derive(Debug, Clone, Copy)]
struct LocalTimeTimer;

impl fmt::time::FormatTime for LocalTimeTimer {
    fn format_time(&self, w: &mut fmt::format::Writer) -> std::fmt::Result {
        write!(w, "{}", Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_old_logs_keeps_fresh_files() {
        let dir = std::env::temp_dir().join(format!("hdhrctl-logs-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let log = dir.join(format!("{}.2026-01-01", LOG_FILE_NAME));
        let other = dir.join("unrelated.txt");
        fs::write(&log, "x").unwrap();
        fs::write(&other, "y").unwrap();

        clean_old_logs(&dir, 7).unwrap();
        assert!(log.exists());
        assert!(other.exists());

        fs::remove_dir_all(&dir).unwrap();
    }
}
