//! Logging setup.
//!
//! The TUI owns the terminal, so log output goes to a daily-rotated file
//! under the configured directory instead of stderr. `PRISMA_LOG` overrides
//! the configured filter.

use std::fs;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::LogConfig;

/// Environment variable that overrides the configured filter.
pub const LOG_ENV_VAR: &str = "PRISMA_LOG";

/// File name prefix for rotated log files.
const LOG_FILE_PREFIX: &str = "prisma.log";

/// Installs the global subscriber.
///
/// Keep the returned guard alive for the lifetime of the program; dropping
/// it flushes and stops the background writer.
pub fn init(config: &LogConfig) -> Result<WorkerGuard> {
    let directory = config.effective_directory();
    fs::create_dir_all(&directory)
        .with_context(|| format!("Failed to create log directory {}", directory.display()))?;

    let filter = build_filter(std::env::var(LOG_ENV_VAR).ok().as_deref(), &config.level)?;

    let appender = tracing_appender::rolling::daily(&directory, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}

/// Builds the filter, preferring a non-empty override over the configured level.
fn build_filter(env_override: Option<&str>, level: &str) -> Result<EnvFilter> {
    let directives = match env_override.map(str::trim) {
        Some(value) if !value.is_empty() => value,
        _ => level,
    };
    EnvFilter::try_new(directives).with_context(|| format!("Invalid log filter '{directives}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_uses_configured_level() {
        let filter = build_filter(None, "debug").unwrap();
        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    fn test_build_filter_prefers_override() {
        let filter = build_filter(Some("prisma_core=trace"), "info").unwrap();
        assert_eq!(filter.to_string(), "prisma_core=trace");
    }

    #[test]
    fn test_build_filter_ignores_blank_override() {
        let filter = build_filter(Some("  "), "warn").unwrap();
        assert_eq!(filter.to_string(), "warn");
    }

    #[test]
    fn test_build_filter_rejects_garbage() {
        let err = build_filter(None, "prisma_core=loud").unwrap_err();
        assert!(err.to_string().contains("Invalid log filter"));
    }
}
