//! CLI command implementations
//!
//! `serve` resolves configuration before anything else: a missing
//! connection string stops the process before a socket is bound.

use std::sync::Arc;

use tracing::info;

use crate::db::{ConnectionProvider, DatabaseConfig};
use crate::http_server::{HttpServer, HttpServerConfig};
use crate::motores::{PgMotorStore, SCHEMA_SQL};
use crate::observability;

use super::args::{Command, ServeArgs};
use super::errors::{CliError, CliResult};

/// Dispatch a parsed command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Serve(args) => serve(args),
        Command::Schema => schema(),
    }
}

/// Resolve database settings from the serve flags
pub fn database_config(args: &ServeArgs) -> CliResult<DatabaseConfig> {
    let config = DatabaseConfig::from_url(args.database_url.clone())?
        .with_ssl_mode(args.ssl_mode)
        .with_max_connections(args.max_connections)
        .with_acquire_timeout_secs(args.acquire_timeout_secs);

    // Surface an unparseable URL now rather than on the first request
    config.connect_options()?;

    Ok(config)
}

/// Resolve HTTP settings from the serve flags
pub fn http_config(args: &ServeArgs) -> HttpServerConfig {
    let origins = args
        .cors_origins
        .iter()
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .collect();

    HttpServerConfig::with_port(args.port)
        .with_host(args.host.clone())
        .with_cors_origins(origins)
}

/// Start the HTTP server against PostgreSQL
pub fn serve(args: ServeArgs) -> CliResult<()> {
    let db_config = database_config(&args)?;
    let http_config = http_config(&args);

    observability::init(args.log_format, "info")?;
    info!(
        event = "boot",
        version = env!("CARGO_PKG_VERSION"),
        ssl_mode = ?db_config.ssl_mode,
        max_connections = db_config.max_connections,
    );

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    let provider = {
        let _guard = rt.enter();
        ConnectionProvider::connect_lazy(&db_config)?
    };

    rt.block_on(async {
        let store = Arc::new(PgMotorStore::new(provider.clone()));
        let server = HttpServer::with_store(http_config, store);

        let result = server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)));

        provider.close().await;
        result
    })
}

/// Print the table definitions
pub fn schema() -> CliResult<()> {
    println!("{}", SCHEMA_SQL);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::errors::CliErrorCode;
    use crate::db::SslMode;
    use crate::observability::LogFormat;

    fn args(database_url: Option<&str>) -> ServeArgs {
        ServeArgs {
            host: "127.0.0.1".to_string(),
            port: 8081,
            database_url: database_url.map(str::to_string),
            ssl_mode: SslMode::Disable,
            max_connections: 3,
            acquire_timeout_secs: 2,
            cors_origins: vec![" https://a.app ".to_string(), String::new()],
            log_format: LogFormat::Json,
        }
    }

    #[test]
    fn test_missing_database_url_is_fatal() {
        let err = database_config(&args(None)).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::ConfigError);
    }

    #[test]
    fn test_invalid_database_url_is_fatal() {
        let err = database_config(&args(Some("::nope::"))).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::ConfigError);
    }

    #[test]
    fn test_serve_without_database_url_does_not_start() {
        let err = serve(args(None)).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::ConfigError);
    }

    #[test]
    fn test_database_config_applies_flags() {
        let config = database_config(&args(Some("postgres://localhost/motores"))).unwrap();
        assert_eq!(config.ssl_mode, SslMode::Disable);
        assert_eq!(config.max_connections, 3);
        assert_eq!(config.acquire_timeout_secs, 2);
    }

    #[test]
    fn test_http_config_trims_origins() {
        let config = http_config(&args(None));
        assert_eq!(config.socket_addr(), "127.0.0.1:8081");
        assert_eq!(config.cors_origins, vec!["https://a.app"]);
    }
}
