//! Logging setup for the `sqlsight` binary
//!
//! Logs go to stderr so stdout carries only the JSON report. RUST_LOG takes
//! precedence over the configured filter.

use std::io::IsTerminal;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Filter used when RUST_LOG is unset
    pub default_filter: String,

    /// Emit one JSON object per event instead of human-readable lines
    pub json: bool,

    /// Whether to include file/line information in logs
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default_filter: "warn".to_string(),
            json: false,
            include_location: cfg!(debug_assertions),
        }
    }
}

/// Initialize the logging system with the given configuration
pub fn init(config: &LoggingConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    let layer = if config.json {
        fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .json()
            .with_current_span(true)
            .with_writer(std::io::stderr)
            .with_filter(env_filter)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_ansi(std::io::stderr().is_terminal())
            .with_writer(std::io::stderr)
            .with_filter(env_filter)
            .boxed()
    };

    tracing_subscriber::registry().with(layer).try_init()?;

    tracing::debug!(
        filter = %config.default_filter,
        json = config.json,
        "Logging system initialized"
    );

    Ok(())
}
