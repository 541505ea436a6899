use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::error::AppError;
use crate::models::{ActorStatus, Role};
use crate::services::admin_lifecycle_service::{self, PromoteInput};
use crate::web::middleware::auth::Caller;
use crate::web::AppState;

/// Warning attached to a committed lifecycle change whose identity-provider
/// sync failed. The portal record is the source of truth either way.
const IDENTITY_SYNC_WARNING: &str =
    "The change was saved, but syncing the identity provider failed";

pub async fn list_handler(
    Extension(caller): Extension<Caller>,
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let admins =
        admin_lifecycle_service::list_admin_accounts(&state.pool, caller.role).await?;
    Ok(Json(json!({ "success": true, "admins": admins })))
}

#[derive(Deserialize)]
pub struct StatusBody {
    status: String,
}

pub async fn change_status_handler(
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(body): Json<StatusBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let status = ActorStatus::parse(&body.status)
        .ok_or_else(|| AppError::Validation(format!("Invalid status '{}'", body.status)))?;
    let admin = admin_lifecycle_service::change_status(
        &state.pool,
        &caller.id,
        caller.role,
        &id,
        status,
    )
    .await?;
    Ok(Json(json!({ "success": true, "admin": admin })))
}

#[derive(Deserialize)]
pub struct RoleBody {
    role: String,
}

pub async fn change_role_handler(
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(body): Json<RoleBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let role = Role::parse(&body.role)
        .ok_or_else(|| AppError::Validation(format!("Invalid role '{}'", body.role)))?;
    let admin =
        admin_lifecycle_service::change_role(&state.pool, caller.role, &id, role).await?;

    // The portal row is authoritative; a failed provider sync is reported as
    // a warning on the committed result, never as an error.
    if state.identity.set_user_role(&id, role).await.is_err() {
        warn!("Role change for {} committed but identity sync failed", id);
        return Ok(Json(json!({
            "success": true,
            "admin": admin,
            "warning": IDENTITY_SYNC_WARNING,
        })));
    }
    Ok(Json(json!({ "success": true, "admin": admin })))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromoteBody {
    participant_id: String,
    role: String,
    status: Option<String>,
}

pub async fn promote_handler(
    Extension(caller): Extension<Caller>,
    State(state): State<AppState>,
    Json(body): Json<PromoteBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let role = Role::parse(&body.role)
        .ok_or_else(|| AppError::Validation(format!("Invalid role '{}'", body.role)))?;
    let status = match body.status.as_deref() {
        Some(raw) => Some(
            ActorStatus::parse(raw)
                .ok_or_else(|| AppError::Validation(format!("Invalid status '{}'", raw)))?,
        ),
        None => None,
    };

    let admin = admin_lifecycle_service::promote(
        &state.pool,
        &caller.id,
        caller.role,
        PromoteInput {
            participant_id: body.participant_id.clone(),
            role,
            status,
        },
    )
    .await?;

    if state
        .identity
        .set_user_role(&body.participant_id, role)
        .await
        .is_err()
    {
        warn!(
            "Promotion of {} committed but identity sync failed",
            body.participant_id
        );
        return Ok(Json(json!({
            "success": true,
            "admin": admin,
            "warning": IDENTITY_SYNC_WARNING,
        })));
    }
    Ok(Json(json!({ "success": true, "admin": admin })))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveBody {
    admin_id: String,
}

pub async fn remove_handler(
    Extension(caller): Extension<Caller>,
    State(state): State<AppState>,
    Json(body): Json<RemoveBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let removed =
        admin_lifecycle_service::remove(&state.pool, &caller.id, caller.role, &body.admin_id)
            .await?;

    if state.identity.clear_user_role(&body.admin_id).await.is_err() {
        warn!(
            "Removal of {} committed but identity sync failed",
            body.admin_id
        );
        return Ok(Json(json!({
            "success": true,
            "removed": removed,
            "warning": IDENTITY_SYNC_WARNING,
        })));
    }
    Ok(Json(json!({ "success": true, "removed": removed })))
}
