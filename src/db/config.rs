//! Database Configuration
//!
//! Connection string, TLS mode and pool bounds for the connection provider.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use sqlx::postgres::{PgConnectOptions, PgSslMode};

use super::errors::{DbError, DbResult};

/// TLS negotiation mode for the store connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SslMode {
    Disable,
    Prefer,
    Require,
    VerifyCa,
    VerifyFull,
}

impl From<SslMode> for PgSslMode {
    fn from(mode: SslMode) -> Self {
        match mode {
            SslMode::Disable => PgSslMode::Disable,
            SslMode::Prefer => PgSslMode::Prefer,
            SslMode::Require => PgSslMode::Require,
            SslMode::VerifyCa => PgSslMode::VerifyCa,
            SslMode::VerifyFull => PgSslMode::VerifyFull,
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection string (never serialized, it carries credentials)
    #[serde(skip_serializing)]
    pub url: String,

    /// TLS mode (default: require)
    #[serde(default = "default_ssl_mode")]
    pub ssl_mode: SslMode,

    /// Upper bound on pooled connections (default: 5)
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Seconds to wait for a free connection (default: 10)
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
}

fn default_ssl_mode() -> SslMode {
    SslMode::Require
}

fn default_max_connections() -> u32 {
    5
}

fn default_acquire_timeout_secs() -> u64 {
    10
}

impl DatabaseConfig {
    /// Build a config from an optional connection string.
    ///
    /// A missing or blank string is a configuration fault.
    pub fn from_url(url: Option<String>) -> DbResult<Self> {
        let url = url
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .ok_or(DbError::MissingUrl)?;

        Ok(Self {
            url,
            ssl_mode: default_ssl_mode(),
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout_secs(),
        })
    }

    /// Override the TLS mode
    pub fn with_ssl_mode(mut self, ssl_mode: SslMode) -> Self {
        self.ssl_mode = ssl_mode;
        self
    }

    /// Override the pool bound (clamped to at least one connection)
    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections.max(1);
        self
    }

    /// Override the acquire timeout
    pub fn with_acquire_timeout_secs(mut self, secs: u64) -> Self {
        self.acquire_timeout_secs = secs;
        self
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    /// Parse the connection string and apply the configured TLS mode
    pub fn connect_options(&self) -> DbResult<PgConnectOptions> {
        let options: PgConnectOptions = self
            .url
            .parse()
            .map_err(|e: sqlx::Error| DbError::InvalidUrl(e.to_string()))?;

        Ok(options.ssl_mode(self.ssl_mode.into()))
    }
}
