use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde_json::json;

use crate::error::AppError;
use crate::services::workshop_service::{self, WorkshopEditInput, WorkshopInput};
use crate::web::middleware::auth::{Caller, Session};
use crate::web::AppState;

/// Dashboard listing; any authenticated subject may see the schedule.
pub async fn list_handler(
    Extension(_session): Extension<Session>,
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let workshops = workshop_service::list(&state.pool).await?;
    Ok(Json(json!({ "success": true, "workshops": workshops })))
}

pub async fn create_handler(
    Extension(caller): Extension<Caller>,
    State(state): State<AppState>,
    Json(input): Json<WorkshopInput>,
) -> Result<Response, AppError> {
    let workshop = workshop_service::create(&state.pool, caller.role, input).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "workshop": workshop })),
    )
        .into_response())
}

pub async fn update_handler(
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(input): Json<WorkshopEditInput>,
) -> Result<Json<serde_json::Value>, AppError> {
    let workshop = workshop_service::update(&state.pool, caller.role, &id, input).await?;
    Ok(Json(json!({ "success": true, "workshop": workshop })))
}

pub async fn delete_handler(
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    workshop_service::delete(&state.pool, caller.role, &id).await?;
    Ok(Json(json!({ "success": true })))
}
