//! CLI argument definitions using clap
//!
//! Commands:
//! - motores-api serve [--host ..] [--port ..] [--database-url ..]
//! - motores-api schema

use clap::{Args, Parser, Subcommand};

use crate::db::SslMode;
use crate::observability::LogFormat;

/// motores-api - CRUD HTTP service for the engine catalogue
#[derive(Parser, Debug)]
#[command(name = "motores-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Print the DDL for the engine, brand and engine-type tables
    Schema,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind to
    #[arg(long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// PostgreSQL connection string (required)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// TLS mode for the database connection
    #[arg(long, env = "DATABASE_SSL_MODE", value_enum, default_value_t = SslMode::Require)]
    pub ssl_mode: SslMode,

    /// Maximum pooled database connections
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 5)]
    pub max_connections: u32,

    /// Seconds to wait for a free database connection
    #[arg(long, env = "DATABASE_ACQUIRE_TIMEOUT_SECS", default_value_t = 10)]
    pub acquire_timeout_secs: u64,

    /// Allowed CORS origins, comma separated. Empty allows any origin
    #[arg(long = "cors-origin", env = "CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Vec<String>,

    /// Log output format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_serve_flags() {
        let cli = Cli::try_parse_from([
            "motores-api",
            "serve",
            "--port",
            "9000",
            "--database-url",
            "postgres://localhost/motores",
            "--ssl-mode",
            "disable",
            "--cors-origin",
            "https://a.app,https://b.app",
            "--log-format",
            "json",
        ])
        .unwrap();

        let Command::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.port, 9000);
        assert_eq!(args.database_url.as_deref(), Some("postgres://localhost/motores"));
        assert_eq!(args.ssl_mode, SslMode::Disable);
        assert_eq!(args.cors_origins, vec!["https://a.app", "https://b.app"]);
        assert_eq!(args.log_format, LogFormat::Json);
    }

    #[test]
    fn test_schema_subcommand() {
        let cli = Cli::try_parse_from(["motores-api", "schema"]).unwrap();
        assert!(matches!(cli.command, Command::Schema));
    }
}
