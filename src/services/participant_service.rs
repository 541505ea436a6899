use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::database::participant_repo::{self, NewParticipant, ParticipantEdit};
use crate::error::AppError;
use crate::models::{ParticipantRow, ParticipantStatus, Role};
use crate::services::permissions;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantView {
    pub id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub university_id: Option<i64>,
    pub major: Option<String>,
    pub gender: Option<String>,
    pub year_of_study: Option<String>,
    pub experience_level: Option<String>,
    pub needs_parking: bool,
    pub dietary_restrictions: Option<String>,
    pub interests: Option<String>,
    pub marketing_source: Option<String>,
    pub accommodations: Option<String>,
    pub resume_url: Option<String>,
    pub status: ParticipantStatus,
    pub checked_in: bool,
    pub registered_at: String,
}

fn parse_participant_status(raw: &str) -> Result<ParticipantStatus, AppError> {
    ParticipantStatus::parse(raw).ok_or_else(|| {
        tracing::error!("Participant row carries unknown status '{}'", raw);
        AppError::Upstream
    })
}

fn view_from(row: ParticipantRow) -> Result<ParticipantView, AppError> {
    let status = parse_participant_status(&row.status)?;
    Ok(ParticipantView {
        id: row.id,
        email: row.email,
        first_name: row.first_name,
        last_name: row.last_name,
        university_id: row.university_id,
        major: row.major,
        gender: row.gender,
        year_of_study: row.year_of_study,
        experience_level: row.experience_level,
        needs_parking: row.needs_parking != 0,
        dietary_restrictions: row.dietary_restrictions,
        interests: row.interests,
        marketing_source: row.marketing_source,
        accommodations: row.accommodations,
        resume_url: row.resume_url,
        status,
        checked_in: row.checked_in != 0,
        registered_at: row.registered_at,
    })
}

/// Registration form body. The participant id and email come from the
/// authenticated session, never from the form.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub university_id: Option<i64>,
    pub major: Option<String>,
    pub gender: Option<String>,
    pub year_of_study: Option<String>,
    pub experience_level: Option<String>,
    #[serde(default)]
    pub needs_parking: bool,
    pub dietary_restrictions: Option<String>,
    pub interests: Option<String>,
    pub marketing_source: Option<String>,
    pub accommodations: Option<String>,
    pub resume_url: Option<String>,
}

pub async fn register(
    pool: &SqlitePool,
    subject_id: &str,
    subject_email: &str,
    input: RegistrationInput,
) -> Result<ParticipantView, AppError> {
    if participant_repo::load_participant(pool, subject_id).await?.is_some() {
        return Err(AppError::Conflict("You are already registered".to_string()));
    }

    participant_repo::insert_participant(
        pool,
        NewParticipant {
            id: subject_id,
            email: subject_email,
            first_name: input.first_name.as_deref(),
            last_name: input.last_name.as_deref(),
            university_id: input.university_id,
            major: input.major.as_deref(),
            gender: input.gender.as_deref(),
            year_of_study: input.year_of_study.as_deref(),
            experience_level: input.experience_level.as_deref(),
            needs_parking: input.needs_parking,
            dietary_restrictions: input.dietary_restrictions.as_deref(),
            interests: input.interests.as_deref(),
            marketing_source: input.marketing_source.as_deref(),
            accommodations: input.accommodations.as_deref(),
            resume_url: input.resume_url.as_deref(),
        },
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => {
            AppError::Conflict("An account with this email is already registered".to_string())
        }
        other => AppError::from(other),
    })?;

    let row = participant_repo::load_participant(pool, subject_id)
        .await?
        .ok_or(AppError::Upstream)?;
    view_from(row)
}

pub async fn list(pool: &SqlitePool) -> Result<Vec<ParticipantView>, AppError> {
    let rows = participant_repo::list_participants(pool).await?;
    rows.into_iter().map(view_from).collect()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantEditInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub university_id: Option<i64>,
    pub major: Option<String>,
    pub gender: Option<String>,
    pub year_of_study: Option<String>,
    pub experience_level: Option<String>,
    pub needs_parking: Option<bool>,
    pub dietary_restrictions: Option<String>,
    pub interests: Option<String>,
    pub marketing_source: Option<String>,
    pub accommodations: Option<String>,
}

pub async fn edit(
    pool: &SqlitePool,
    caller_role: Role,
    id: &str,
    input: ParticipantEditInput,
) -> Result<ParticipantView, AppError> {
    if !permissions::permissions_for(caller_role, false).can_edit {
        return Err(AppError::Unauthorized("Admin access required"));
    }

    let affected = participant_repo::update_participant_fields(
        pool,
        id,
        ParticipantEdit {
            first_name: input.first_name.as_deref(),
            last_name: input.last_name.as_deref(),
            university_id: input.university_id,
            major: input.major.as_deref(),
            gender: input.gender.as_deref(),
            year_of_study: input.year_of_study.as_deref(),
            experience_level: input.experience_level.as_deref(),
            needs_parking: input.needs_parking,
            dietary_restrictions: input.dietary_restrictions.as_deref(),
            interests: input.interests.as_deref(),
            marketing_source: input.marketing_source.as_deref(),
            accommodations: input.accommodations.as_deref(),
        },
    )
    .await?;
    if affected == 0 {
        return Err(AppError::NotFound("Participant"));
    }

    let row = participant_repo::load_participant(pool, id)
        .await?
        .ok_or(AppError::NotFound("Participant"))?;
    view_from(row)
}

pub async fn set_status(
    pool: &SqlitePool,
    caller_role: Role,
    id: &str,
    status: ParticipantStatus,
) -> Result<ParticipantView, AppError> {
    if !permissions::permissions_for(caller_role, false).can_change_status {
        return Err(AppError::Unauthorized("Admin access required"));
    }

    let affected = participant_repo::update_status(pool, id, status.as_str()).await?;
    if affected == 0 {
        return Err(AppError::NotFound("Participant"));
    }
    let row = participant_repo::load_participant(pool, id)
        .await?
        .ok_or(AppError::NotFound("Participant"))?;
    view_from(row)
}

pub async fn set_checked_in(
    pool: &SqlitePool,
    caller_role: Role,
    id: &str,
    checked_in: bool,
) -> Result<ParticipantView, AppError> {
    if !permissions::permissions_for(caller_role, false).can_check_in {
        return Err(AppError::Unauthorized("Volunteer access required"));
    }

    let affected = participant_repo::update_checked_in(pool, id, checked_in).await?;
    if affected == 0 {
        return Err(AppError::NotFound("Participant"));
    }
    let row = participant_repo::load_participant(pool, id)
        .await?
        .ok_or(AppError::NotFound("Participant"))?;
    view_from(row)
}

pub struct BulkUpdateInput {
    pub participant_ids: Vec<String>,
    pub status: Option<ParticipantStatus>,
    pub checked_in: Option<bool>,
}

#[derive(Debug)]
pub struct BulkUpdateOutcome {
    pub updated: Vec<ParticipantView>,
    pub not_found_ids: Vec<String>,
}

/// Applies a status and/or check-in change to a set of participants.
///
/// Select, update and reselect run on one transaction, so the returned rows
/// always match the state the update left behind; ids that do not exist are
/// reported back instead of failing the whole batch.
pub async fn bulk_update(
    pool: &SqlitePool,
    caller_role: Role,
    input: BulkUpdateInput,
) -> Result<BulkUpdateOutcome, AppError> {
    if !permissions::permissions_for(caller_role, false).can_bulk_edit {
        return Err(AppError::Unauthorized("Admin access required"));
    }
    if input.participant_ids.is_empty() {
        return Err(AppError::Validation(
            "participantIds must be a non-empty array".to_string(),
        ));
    }
    if input.status.is_none() && input.checked_in.is_none() {
        return Err(AppError::Validation(
            "At least one of status or checkedIn is required".to_string(),
        ));
    }

    let mut tx = pool.begin().await?;

    let found = participant_repo::select_existing_ids_tx(&mut tx, &input.participant_ids).await?;
    if found.is_empty() {
        return Err(AppError::NotFound("Participants"));
    }
    let not_found_ids: Vec<String> = input
        .participant_ids
        .iter()
        .filter(|id| !found.contains(id))
        .cloned()
        .collect();

    participant_repo::bulk_update_tx(
        &mut tx,
        &found,
        input.status.map(|s| s.as_str()),
        input.checked_in,
    )
    .await?;

    let rows = participant_repo::select_by_ids_tx(&mut tx, &found).await?;
    tx.commit().await?;

    let updated = rows
        .into_iter()
        .map(view_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(BulkUpdateOutcome {
        updated,
        not_found_ids,
    })
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedParticipant {
    pub id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

pub async fn bulk_delete(
    pool: &SqlitePool,
    caller_role: Role,
    participant_ids: &[String],
) -> Result<Vec<DeletedParticipant>, AppError> {
    if !permissions::permissions_for(caller_role, false).can_bulk_edit {
        return Err(AppError::Unauthorized("Admin access required"));
    }
    if participant_ids.is_empty() {
        return Err(AppError::Validation(
            "participantIds must be a non-empty array".to_string(),
        ));
    }

    let mut tx = pool.begin().await?;
    let identities = participant_repo::select_identities_tx(&mut tx, participant_ids).await?;
    participant_repo::delete_by_ids_tx(&mut tx, participant_ids).await?;
    tx.commit().await?;

    Ok(identities
        .into_iter()
        .map(|row| DeletedParticipant {
            id: row.id,
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
        })
        .collect())
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantExportView {
    #[serde(flatten)]
    pub participant: ParticipantView,
    pub university_name: Option<String>,
}

/// Read-only export of the selected rows, denormalized with university name.
pub async fn bulk_export(
    pool: &SqlitePool,
    caller_role: Role,
    participant_ids: &[String],
) -> Result<Vec<ParticipantExportView>, AppError> {
    if !permissions::permissions_for(caller_role, false).can_export {
        return Err(AppError::Unauthorized("Admin access required"));
    }
    if participant_ids.is_empty() {
        return Err(AppError::Validation(
            "participantIds must be a non-empty array".to_string(),
        ));
    }

    let rows = participant_repo::select_export_by_ids(pool, participant_ids).await?;
    rows.into_iter()
        .map(|row| {
            Ok(ParticipantExportView {
                participant: view_from(row.participant)?,
                university_name: row.university_name,
            })
        })
        .collect()
}
