//! # HTTP Errors
//!
//! Error taxonomy of the HTTP surface and its mapping to status codes.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::db::DbError;

/// Result type for HTTP handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP API errors
#[derive(Debug, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Requested engine does not exist
    #[error("Motor no encontrado")]
    NotFound,

    /// The store rejected a write
    #[error("Error de base de datos: {0}")]
    BadRequest(String),

    /// Body failed to parse or did not conform to the write payload
    #[error("{message}")]
    InvalidBody { status: StatusCode, message: String },

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Connection or transaction fault, details logged under the id
    #[error("Internal server error")]
    Internal { correlation_id: Uuid },
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidBody { status, .. } => *status,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Rejected(message) => ApiError::BadRequest(message),
            other => {
                let correlation_id = Uuid::new_v4();
                error!(
                    event = "store_fault",
                    correlation_id = %correlation_id,
                    error = %other,
                );
                ApiError::Internal { correlation_id }
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub detail: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
}

impl From<ApiError> for ErrorResponse {
    fn from(err: ApiError) -> Self {
        let correlation_id = match &err {
            ApiError::Internal { correlation_id } => Some(correlation_id.to_string()),
            _ => None,
        };

        Self {
            code: err.status_code().as_u16(),
            detail: err.to_string(),
            correlation_id,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::BadRequest("x".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Internal {
                correlation_id: Uuid::new_v4()
            }
            .status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_rejection_forwards_store_message() {
        let err = ApiError::from(DbError::Rejected("violates foreign key".to_string()));
        assert_eq!(err.to_string(), "Error de base de datos: violates foreign key");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_connection_fault_hides_cause() {
        let err = ApiError::from(DbError::Connection(sqlx::Error::PoolTimedOut));
        let body = ErrorResponse::from(err);

        assert_eq!(body.code, 500);
        assert_eq!(body.detail, "Internal server error");
        assert!(body.correlation_id.is_some());
    }

    #[test]
    fn test_not_found_body_has_no_correlation_id() {
        let json = serde_json::to_value(ErrorResponse::from(ApiError::NotFound)).unwrap();
        assert_eq!(json["detail"], "Motor no encontrado");
        assert_eq!(json["code"], 404);
        assert!(json.get("correlation_id").is_none());
    }
}
