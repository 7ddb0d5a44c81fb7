//! # HTTP Server Module
//!
//! Axum server for the engine API.
//!
//! # Endpoints
//!
//! - `/` - Liveness message
//! - `/health` - Health check
//! - `/docs`, `/openapi.json` - API documentation
//! - `/motores/*` - Engine CRUD

pub mod config;
pub mod docs;
pub mod errors;
pub mod observability_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use docs::ApiDoc;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use server::{build_router, HttpServer};
