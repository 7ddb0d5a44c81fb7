//! Engine HTTP Routes
//!
//! The five CRUD endpoints of the `/motores` resource. Each handler makes
//! exactly one store call.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::info;

use crate::http_server::errors::{ApiError, ApiResult, ErrorResponse};

use super::schema::{Motor, MotorCreate};
use super::store::MotorStore;

/// Resource path prefix
pub const MOTORES_PATH: &str = "/motores";

type StoreState<S> = Arc<S>;

/// Create engine routes.
///
/// The collection answers both with and without the trailing slash.
pub fn motor_routes<S: MotorStore + 'static>(store: Arc<S>) -> Router {
    Router::new()
        .route("/motores", get(list_handler::<S>).post(create_handler::<S>))
        .route("/motores/", get(list_handler::<S>).post(create_handler::<S>))
        .route(
            "/motores/:id",
            get(get_handler::<S>)
                .put(update_handler::<S>)
                .delete(delete_handler::<S>),
        )
        .with_state(store)
}

/// List every engine
#[utoipa::path(
    get,
    path = "/motores/",
    tag = "Motores",
    responses(
        (status = 200, description = "All engines, in store order", body = [Motor]),
        (status = 500, description = "Connection fault", body = ErrorResponse)
    )
)]
async fn list_handler<S: MotorStore>(
    State(store): State<StoreState<S>>,
) -> ApiResult<Json<Vec<Motor>>> {
    let motores = store.list().await?;
    Ok(Json(motores))
}

/// Get one engine
#[utoipa::path(
    get,
    path = "/motores/{id}",
    tag = "Motores",
    params(("id" = String, Path, description = "Engine id")),
    responses(
        (status = 200, description = "The engine", body = Motor),
        (status = 404, description = "No engine with this id", body = ErrorResponse)
    )
)]
async fn get_handler<S: MotorStore>(
    State(store): State<StoreState<S>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Motor>> {
    let motor = store.get(&id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(motor))
}

/// Create an engine with a generated id
#[utoipa::path(
    post,
    path = "/motores/",
    tag = "Motores",
    request_body = MotorCreate,
    responses(
        (status = 201, description = "Created engine, id included", body = Motor),
        (status = 400, description = "Rejected by the store", body = ErrorResponse),
        (status = 422, description = "Payload does not conform", body = ErrorResponse)
    )
)]
async fn create_handler<S: MotorStore>(
    State(store): State<StoreState<S>>,
    payload: Result<Json<MotorCreate>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Motor>)> {
    let Json(payload) = payload?;

    let motor = store.create(payload).await?;
    info!(event = "motor_created", id = %motor.id);

    Ok((StatusCode::CREATED, Json(motor)))
}

/// Replace every field of an engine
#[utoipa::path(
    put,
    path = "/motores/{id}",
    tag = "Motores",
    params(("id" = String, Path, description = "Engine id")),
    request_body = MotorCreate,
    responses(
        (status = 200, description = "Updated engine", body = Motor),
        (status = 400, description = "Rejected by the store", body = ErrorResponse),
        (status = 404, description = "No engine with this id", body = ErrorResponse),
        (status = 422, description = "Payload does not conform", body = ErrorResponse)
    )
)]
async fn update_handler<S: MotorStore>(
    State(store): State<StoreState<S>>,
    Path(id): Path<String>,
    payload: Result<Json<MotorCreate>, JsonRejection>,
) -> ApiResult<Json<Motor>> {
    let Json(payload) = payload?;

    let motor = store
        .update(&id, payload)
        .await?
        .ok_or(ApiError::NotFound)?;
    info!(event = "motor_updated", id = %motor.id);

    Ok(Json(motor))
}

/// Delete an engine
#[utoipa::path(
    delete,
    path = "/motores/{id}",
    tag = "Motores",
    params(("id" = String, Path, description = "Engine id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "No engine with this id", body = ErrorResponse)
    )
)]
async fn delete_handler<S: MotorStore>(
    State(store): State<StoreState<S>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    if !store.delete(&id).await? {
        return Err(ApiError::NotFound);
    }
    info!(event = "motor_deleted", id = %id);

    Ok(StatusCode::NO_CONTENT)
}
