//! Structured logging setup
//!
//! - One log line = one event
//! - Events carry an `event` field naming what happened, plus key/value fields
//! - `json` format emits one JSON object per line, `pretty` is for terminals
//! - Level filtering through `RUST_LOG`, falling back to the configured level

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Output format of the log stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    Pretty,
    /// One JSON object per line
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Pretty => write!(f, "pretty"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

/// Logger initialisation failure (a global subscriber is already set)
#[derive(Debug, thiserror::Error)]
#[error("Failed to initialise logging: {0}")]
pub struct LoggerError(String);

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Install the global subscriber writing to stdout
pub fn init(format: LogFormat, default_level: &str) -> Result<(), LoggerError> {
    init_with_writer(format, default_level, std::io::stdout)
}

/// Install the global subscriber writing to `writer`
pub fn init_with_writer<W>(
    format: LogFormat,
    default_level: &str,
    writer: W,
) -> Result<(), LoggerError>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_level))
        .with_writer(writer)
        .with_target(false);

    let result = match format {
        LogFormat::Json => builder.json().flatten_event(true).try_init(),
        LogFormat::Pretty => builder.try_init(),
    };

    result.map_err(|e| LoggerError(e.to_string()))
}
