use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::workshop_repo::{self, NewWorkshop, WorkshopEdit};
use crate::error::AppError;
use crate::models::{Role, WorkshopRow};
use crate::services::permissions;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkshopView {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: Option<String>,
    pub ends_at: Option<String>,
    pub capacity: Option<i64>,
}

fn view_from(row: WorkshopRow) -> WorkshopView {
    WorkshopView {
        id: row.id,
        title: row.title,
        description: row.description,
        location: row.location,
        starts_at: row.starts_at,
        ends_at: row.ends_at,
        capacity: row.capacity,
    }
}

pub async fn list(pool: &SqlitePool) -> Result<Vec<WorkshopView>, AppError> {
    let rows = workshop_repo::list_workshops(pool).await?;
    Ok(rows.into_iter().map(view_from).collect())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkshopInput {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: Option<String>,
    pub ends_at: Option<String>,
    pub capacity: Option<i64>,
}

fn validate_times(starts_at: Option<&str>, ends_at: Option<&str>) -> Result<(), AppError> {
    if let (Some(start), Some(end)) = (starts_at, ends_at) {
        // Timestamps are ISO-8601 strings, so lexicographic order is time order.
        if end < start {
            return Err(AppError::Validation(
                "endsAt must not be before startsAt".to_string(),
            ));
        }
    }
    Ok(())
}

pub async fn create(
    pool: &SqlitePool,
    caller_role: Role,
    input: WorkshopInput,
) -> Result<WorkshopView, AppError> {
    if !permissions::permissions_for(caller_role, false).can_edit {
        return Err(AppError::Unauthorized("Admin access required"));
    }
    let title = input.title.trim();
    if title.is_empty() {
        return Err(AppError::Validation("title must not be empty".to_string()));
    }
    validate_times(input.starts_at.as_deref(), input.ends_at.as_deref())?;

    let id = Uuid::new_v4().to_string();
    workshop_repo::insert_workshop(
        pool,
        NewWorkshop {
            id: &id,
            title,
            description: input.description.as_deref(),
            location: input.location.as_deref(),
            starts_at: input.starts_at.as_deref(),
            ends_at: input.ends_at.as_deref(),
            capacity: input.capacity,
        },
    )
    .await?;

    let row = workshop_repo::load_workshop(pool, &id)
        .await?
        .ok_or(AppError::Upstream)?;
    Ok(view_from(row))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkshopEditInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: Option<String>,
    pub ends_at: Option<String>,
    pub capacity: Option<i64>,
}

pub async fn update(
    pool: &SqlitePool,
    caller_role: Role,
    id: &str,
    input: WorkshopEditInput,
) -> Result<WorkshopView, AppError> {
    if !permissions::permissions_for(caller_role, false).can_edit {
        return Err(AppError::Unauthorized("Admin access required"));
    }
    if let Some(title) = input.title.as_deref() {
        if title.trim().is_empty() {
            return Err(AppError::Validation("title must not be empty".to_string()));
        }
    }
    validate_times(input.starts_at.as_deref(), input.ends_at.as_deref())?;

    let affected = workshop_repo::update_workshop(
        pool,
        id,
        WorkshopEdit {
            title: input.title.as_deref().map(str::trim),
            description: input.description.as_deref(),
            location: input.location.as_deref(),
            starts_at: input.starts_at.as_deref(),
            ends_at: input.ends_at.as_deref(),
            capacity: input.capacity,
        },
    )
    .await?;
    if affected == 0 {
        return Err(AppError::NotFound("Workshop"));
    }

    let row = workshop_repo::load_workshop(pool, id)
        .await?
        .ok_or(AppError::NotFound("Workshop"))?;
    Ok(view_from(row))
}

pub async fn delete(pool: &SqlitePool, caller_role: Role, id: &str) -> Result<(), AppError> {
    if !permissions::permissions_for(caller_role, false).can_edit {
        return Err(AppError::Unauthorized("Admin access required"));
    }
    let affected = workshop_repo::delete_workshop(pool, id).await?;
    if affected == 0 {
        return Err(AppError::NotFound("Workshop"));
    }
    Ok(())
}
