use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::error::AppError;
use crate::models::ParticipantStatus;
use crate::services::participant_service::{
    self, BulkUpdateInput, ParticipantEditInput, RegistrationInput,
};
use crate::web::middleware::auth::{Caller, Session};
use crate::web::AppState;

pub async fn register_handler(
    Extension(session): Extension<Session>,
    State(state): State<AppState>,
    Json(input): Json<RegistrationInput>,
) -> Result<Response, AppError> {
    if session.email.trim().is_empty() {
        return Err(AppError::Validation(
            "Session is missing an email address".to_string(),
        ));
    }
    let participant =
        participant_service::register(&state.pool, &session.id, &session.email, input).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "participant": participant })),
    )
        .into_response())
}

pub async fn list_handler(
    Extension(_caller): Extension<Caller>,
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let participants = participant_service::list(&state.pool).await?;
    Ok(Json(json!({ "success": true, "participants": participants })))
}

pub async fn edit_handler(
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(input): Json<ParticipantEditInput>,
) -> Result<Json<serde_json::Value>, AppError> {
    let participant = participant_service::edit(&state.pool, caller.role, &id, input).await?;
    Ok(Json(json!({ "success": true, "participant": participant })))
}

#[derive(Deserialize)]
pub struct StatusBody {
    status: String,
}

pub async fn status_handler(
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(body): Json<StatusBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let status = ParticipantStatus::parse(&body.status).ok_or_else(|| {
        AppError::Validation(format!("Invalid participant status '{}'", body.status))
    })?;
    let participant =
        participant_service::set_status(&state.pool, caller.role, &id, status).await?;
    Ok(Json(json!({ "success": true, "participant": participant })))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInBody {
    checked_in: bool,
}

pub async fn check_in_handler(
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(body): Json<CheckInBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let participant =
        participant_service::set_checked_in(&state.pool, caller.role, &id, body.checked_in)
            .await?;
    Ok(Json(json!({ "success": true, "participant": participant })))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkUpdateBody {
    participant_ids: Vec<String>,
    status: Option<String>,
    checked_in: Option<bool>,
}

pub async fn bulk_update_handler(
    Extension(caller): Extension<Caller>,
    State(state): State<AppState>,
    Json(body): Json<BulkUpdateBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let status = match body.status.as_deref() {
        Some(raw) => Some(ParticipantStatus::parse(raw).ok_or_else(|| {
            AppError::Validation(format!("Invalid participant status '{}'", raw))
        })?),
        None => None,
    };

    let outcome = participant_service::bulk_update(
        &state.pool,
        caller.role,
        BulkUpdateInput {
            participant_ids: body.participant_ids,
            status,
            checked_in: body.checked_in,
        },
    )
    .await?;

    // The warning key is only present when something was actually missing.
    let warning = (!outcome.not_found_ids.is_empty()).then(|| {
        format!(
            "{} participant id(s) could not be found",
            outcome.not_found_ids.len()
        )
    });
    let mut body = json!({
        "success": true,
        "updatedCount": outcome.updated.len(),
        "updatedParticipants": outcome.updated,
        "notFoundIds": outcome.not_found_ids,
    });
    if let Some(warning) = warning {
        body["warning"] = json!(warning);
    }
    Ok(Json(body))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkOperationBody {
    operation: String,
    participant_ids: Vec<String>,
}

/// Bulk delete/export share one POST endpoint, dispatched on `operation`.
pub async fn bulk_operation_handler(
    Extension(caller): Extension<Caller>,
    State(state): State<AppState>,
    Json(body): Json<BulkOperationBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    match body.operation.as_str() {
        "delete" => {
            let deleted =
                participant_service::bulk_delete(&state.pool, caller.role, &body.participant_ids)
                    .await?;
            Ok(Json(json!({
                "success": true,
                "deletedCount": deleted.len(),
                "deletedParticipants": deleted,
            })))
        }
        "export" => {
            let participants =
                participant_service::bulk_export(&state.pool, caller.role, &body.participant_ids)
                    .await?;
            Ok(Json(json!({
                "success": true,
                "participants": participants,
            })))
        }
        other => Err(AppError::Validation(format!(
            "Unsupported operation '{}'",
            other
        ))),
    }
}
