//! Shared logging utilities for docprep binaries.

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Environment variable holding an `EnvFilter` directive string.
const LOG_ENV: &str = "DOCPREP_LOG";

/// Logging configuration shared by docprep binaries.
pub struct LogConfig<'a> {
    pub app_name: &'a str,
    pub verbose: bool,
}

/// Initialize tracing with an env-filtered stderr output.
///
/// The filter comes from `DOCPREP_LOG` when set, otherwise defaults to
/// `<app_name>=info` (`debug` with `verbose`). Logs go to stderr so that
/// stdout stays clean for command output and `--json` payloads.
pub fn init_logging(config: LogConfig<'_>) -> Result<()> {
    let default_directive = if config.verbose {
        format!("{}=debug", config.app_name)
    } else {
        format!("{}=info", config.app_name)
    };

    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(filter),
        )
        .try_init()
        .context("Failed to set global tracing subscriber")?;

    Ok(())
}
