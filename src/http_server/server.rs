//! # HTTP Server
//!
//! Combines the liveness and engine routers behind the CORS and trace
//! layers, and binds the listener.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::motores::{motor_routes, MotorStore, MOTORES_PATH};

use super::config::HttpServerConfig;
use super::docs::docs_routes;
use super::observability_routes::health_routes;

/// HTTP server for the engine API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server over the given store
    pub fn with_store<S: MotorStore + 'static>(config: HttpServerConfig, store: Arc<S>) -> Self {
        let router = build_router(&config, store);
        Self { config, router }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process is stopped
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Invalid socket address '{}': {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        info!(
            event = "http_listening",
            addr = %addr,
            resource = MOTORES_PATH,
            cors_permissive = self.config.cors_is_permissive(),
        );

        axum::serve(listener, self.router).await?;

        Ok(())
    }
}

/// Build the combined router with all endpoints
pub fn build_router<S: MotorStore + 'static>(config: &HttpServerConfig, store: Arc<S>) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(docs_routes())
        .merge(motor_routes(store))
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
}

/// CORS with credentials allowed.
///
/// `*` cannot be combined with credentials, so the permissive form mirrors
/// the request's origin, method and headers instead.
pub fn cors_layer(config: &HttpServerConfig) -> CorsLayer {
    let origin = if config.cors_is_permissive() {
        AllowOrigin::mirror_request()
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|s| match s.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(event = "cors_origin_ignored", origin = %s);
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
