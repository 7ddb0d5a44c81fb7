//! Liveness HTTP Routes
//!
//! Root liveness message and the health check.

use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

/// Liveness message returned at `/`
pub const ROOT_MESSAGE: &str = "API de Motores activa. Ve a /docs para la documentación.";

/// Root response
#[derive(Debug, Serialize, ToSchema)]
pub struct RootResponse {
    pub message: String,
}

/// Health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// `/` and `/health`
pub fn health_routes() -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Root",
    responses((status = 200, description = "Liveness message", body = RootResponse))
)]
async fn root_handler() -> impl IntoResponse {
    Json(RootResponse {
        message: ROOT_MESSAGE.to_string(),
    })
}

/// Health check handler
#[utoipa::path(
    get,
    path = "/health",
    tag = "Root",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
async fn health_handler() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}
