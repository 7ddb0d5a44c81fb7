//! API Documentation Routes
//!
//! OpenAPI document for the engine API, served as JSON and rendered with
//! Redoc.

use axum::{routing::get, Json, Router};
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use crate::motores::{Motor, MotorCreate};

use super::errors::ErrorResponse;
use super::observability_routes::{HealthResponse, RootResponse};

/// Rendered documentation page
pub const DOCS_PATH: &str = "/docs";

/// Raw OpenAPI document
pub const OPENAPI_PATH: &str = "/openapi.json";

/// OpenAPI description of every route (version taken from the crate)
#[derive(OpenApi)]
#[openapi(
    info(
        title = "API CRUD de Motores",
        description = "API RESTful para la gestión del catálogo de motores."
    ),
    paths(
        crate::http_server::observability_routes::root_handler,
        crate::http_server::observability_routes::health_handler,
        crate::motores::routes::list_handler,
        crate::motores::routes::get_handler,
        crate::motores::routes::create_handler,
        crate::motores::routes::update_handler,
        crate::motores::routes::delete_handler,
    ),
    components(schemas(Motor, MotorCreate, ErrorResponse, RootResponse, HealthResponse)),
    tags(
        (name = "Motores", description = "Engine catalogue CRUD"),
        (name = "Root", description = "Liveness")
    )
)]
pub struct ApiDoc;

/// `/docs` and `/openapi.json`
pub fn docs_routes() -> Router {
    Router::new()
        .merge(Redoc::with_url(DOCS_PATH, ApiDoc::openapi()))
        .route(OPENAPI_PATH, get(openapi_handler))
}

async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_covers_engine_routes() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();

        assert_eq!(doc["info"]["title"], "API CRUD de Motores");
        assert_eq!(doc["info"]["version"], env!("CARGO_PKG_VERSION"));

        let paths = doc["paths"].as_object().unwrap();
        for path in ["/", "/health", "/motores/", "/motores/{id}"] {
            assert!(paths.contains_key(path), "missing {}", path);
        }
        for method in ["get", "put", "delete"] {
            assert!(doc["paths"]["/motores/{id}"].get(method).is_some());
        }
        assert!(doc["paths"]["/motores/"].get("post").is_some());
    }

    #[test]
    fn test_write_payload_schema_has_no_id() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let schemas = &doc["components"]["schemas"];

        assert!(schemas["Motor"]["properties"].get("id").is_some());
        assert!(schemas["MotorCreate"]["properties"].get("id").is_none());
        assert_eq!(schemas["MotorCreate"]["properties"]["litraje"]["type"], "number");

        let required: Vec<&str> = schemas["MotorCreate"]["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        for field in ["nombre_modelo", "litraje", "marca_id", "tipo_motor_id"] {
            assert!(required.contains(&field), "{} must be required", field);
        }
        assert!(!required.contains(&"potencia_hp"));
    }
}
