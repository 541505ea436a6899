use serde::Serialize;
use sqlx::SqlitePool;

use crate::database::{admin_repo, participant_repo};
use crate::error::AppError;
use crate::models::{ActorStatus, AdminRow, Role};
use crate::services::admin_guards as guards;
use crate::services::permissions::{self, AdminView};

/// Admin account as shown in the back office. `admin_only` marks accounts
/// that were created directly instead of promoted from a participant.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminAccountView {
    pub id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Role,
    pub status: ActorStatus,
    pub admin_only: bool,
    pub created_at: String,
    pub updated_at: String,
}

fn parse_role(raw: &str) -> Result<Role, AppError> {
    Role::parse(raw).ok_or_else(|| {
        tracing::error!("Admin row carries unknown role '{}'", raw);
        AppError::Upstream
    })
}

fn parse_status(raw: &str) -> Result<ActorStatus, AppError> {
    ActorStatus::parse(raw).ok_or_else(|| {
        tracing::error!("Admin row carries unknown status '{}'", raw);
        AppError::Upstream
    })
}

fn view_from(row: AdminRow, admin_only: bool) -> Result<AdminAccountView, AppError> {
    let role = parse_role(&row.role)?;
    let status = parse_status(&row.status)?;
    Ok(AdminAccountView {
        id: row.id,
        email: row.email,
        first_name: row.first_name,
        last_name: row.last_name,
        role,
        status,
        admin_only,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

/// Admin-management listing. The view itself is super-admin gated.
pub async fn list_admin_accounts(
    pool: &SqlitePool,
    caller_role: Role,
) -> Result<Vec<AdminAccountView>, AppError> {
    if !permissions::can_access_view(caller_role, AdminView::AdminManagement) {
        return Err(AppError::Unauthorized("Super Admin access required"));
    }

    let rows = admin_repo::list_admins(pool).await?;
    let mut tx = pool.begin().await?;
    let mut views = Vec::with_capacity(rows.len());
    for row in rows {
        let has_participant =
            participant_repo::participant_exists_tx(&mut tx, &row.id).await?;
        views.push(view_from(row, !has_participant)?);
    }
    tx.commit().await?;
    Ok(views)
}

pub struct PromoteInput {
    pub participant_id: String,
    pub role: Role,
    pub status: Option<ActorStatus>,
}

/// Promotes an existing participant into the admins table.
///
/// The permission table grants promotion to the admin role; the lifecycle
/// rules elsewhere assume super admins hold every admin power, so both are
/// accepted here (see DESIGN.md for the open product question).
pub async fn promote(
    pool: &SqlitePool,
    caller_id: &str,
    caller_role: Role,
    input: PromoteInput,
) -> Result<AdminAccountView, AppError> {
    let perms = permissions::permissions_for(caller_role, false);
    if !perms.can_promote && caller_role != Role::SuperAdmin {
        return Err(AppError::Unauthorized("Admin access required"));
    }

    let mut tx = pool.begin().await?;

    let participant =
        participant_repo::load_participant_tx(&mut tx, &input.participant_id)
            .await?
            .ok_or(AppError::NotFound("Participant"))?;

    if admin_repo::load_admin_tx(&mut tx, &participant.id).await?.is_some() {
        return Err(AppError::Conflict(
            "This participant is already an admin".to_string(),
        ));
    }
    if let Some(existing) =
        admin_repo::load_admin_by_email_tx(&mut tx, &participant.email).await?
    {
        if existing.id != participant.id {
            return Err(AppError::Conflict(
                "An admin account with this email already exists".to_string(),
            ));
        }
    }

    let status = input.status.unwrap_or(ActorStatus::Active);
    admin_repo::insert_admin_tx(
        &mut tx,
        admin_repo::NewAdmin {
            id: &participant.id,
            email: &participant.email,
            first_name: participant.first_name.as_deref(),
            last_name: participant.last_name.as_deref(),
            role: input.role.as_str(),
            status: status.as_str(),
        },
    )
    .await?;

    let row = admin_repo::load_admin_tx(&mut tx, &participant.id)
        .await?
        .ok_or(AppError::Upstream)?;
    tx.commit().await?;

    tracing::info!(
        "Promoted participant {} to {} by {}",
        participant.id,
        input.role,
        caller_id
    );
    view_from(row, false)
}

pub async fn change_role(
    pool: &SqlitePool,
    caller_role: Role,
    target_id: &str,
    new_role: Role,
) -> Result<AdminAccountView, AppError> {
    guards::require_super_admin(caller_role)?;

    let mut tx = pool.begin().await?;

    let row = admin_repo::load_admin_tx(&mut tx, target_id)
        .await?
        .ok_or(AppError::NotFound("Admin"))?;
    let target_role = parse_role(&row.role)?;
    let target_status = parse_status(&row.status)?;

    // Counted on the same transaction as the update, so a concurrent
    // demotion conflicts at commit instead of slipping past the check.
    let active_supers = admin_repo::count_active_super_admins_tx(&mut tx).await?;
    guards::guard_role_change(target_role, target_status, new_role, active_supers)?;

    admin_repo::update_role_tx(&mut tx, target_id, new_role.as_str()).await?;
    let updated = admin_repo::load_admin_tx(&mut tx, target_id)
        .await?
        .ok_or(AppError::Upstream)?;
    let has_participant = participant_repo::participant_exists_tx(&mut tx, target_id).await?;
    tx.commit().await?;

    view_from(updated, !has_participant)
}

pub async fn change_status(
    pool: &SqlitePool,
    caller_id: &str,
    caller_role: Role,
    target_id: &str,
    new_status: ActorStatus,
) -> Result<AdminAccountView, AppError> {
    guards::require_super_admin(caller_role)?;

    let mut tx = pool.begin().await?;

    let row = admin_repo::load_admin_tx(&mut tx, target_id)
        .await?
        .ok_or(AppError::NotFound("Admin"))?;
    let target_role = parse_role(&row.role)?;
    let target_status = parse_status(&row.status)?;

    let active_supers = admin_repo::count_active_super_admins_tx(&mut tx).await?;
    guards::guard_status_change(
        caller_id,
        target_id,
        target_role,
        target_status,
        new_status,
        active_supers,
    )?;

    admin_repo::update_status_tx(&mut tx, target_id, new_status.as_str()).await?;
    let updated = admin_repo::load_admin_tx(&mut tx, target_id)
        .await?
        .ok_or(AppError::Upstream)?;
    let has_participant = participant_repo::participant_exists_tx(&mut tx, target_id).await?;
    tx.commit().await?;

    view_from(updated, !has_participant)
}

/// Identity fields of a removed admin, echoed back to the caller.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovedAdmin {
    pub id: String,
    pub email: String,
    pub role: Role,
}

pub async fn remove(
    pool: &SqlitePool,
    caller_id: &str,
    caller_role: Role,
    target_id: &str,
) -> Result<RemovedAdmin, AppError> {
    guards::require_super_admin(caller_role)?;

    let mut tx = pool.begin().await?;

    let row = admin_repo::load_admin_tx(&mut tx, target_id)
        .await?
        .ok_or(AppError::NotFound("Admin"))?;
    let target_role = parse_role(&row.role)?;

    let supers = admin_repo::count_super_admins_tx(&mut tx).await?;
    guards::guard_delete(caller_id, target_id, target_role, supers)?;

    admin_repo::delete_admin_tx(&mut tx, target_id).await?;
    tx.commit().await?;

    tracing::info!("Removed admin {} by {}", target_id, caller_id);
    Ok(RemovedAdmin {
        id: row.id,
        email: row.email,
        role: target_role,
    })
}
