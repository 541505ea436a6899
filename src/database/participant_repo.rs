use sqlx::{SqliteConnection, SqlitePool};

use crate::models::{ParticipantExportRow, ParticipantIdentityRow, ParticipantRow};

const PARTICIPANT_COLUMNS: &str = r#"
    id,
    email,
    first_name,
    last_name,
    university_id,
    major,
    gender,
    year_of_study,
    experience_level,
    needs_parking,
    dietary_restrictions,
    interests,
    marketing_source,
    accommodations,
    resume_url,
    status,
    checked_in,
    registered_at
"#;

fn placeholders(n: usize) -> String {
    let mut s = String::with_capacity(n * 2);
    for i in 0..n {
        if i > 0 {
            s.push(',');
        }
        s.push('?');
    }
    s
}

pub async fn load_participant(
    pool: &SqlitePool,
    id: &str,
) -> sqlx::Result<Option<ParticipantRow>> {
    let sql = format!(
        "SELECT {PARTICIPANT_COLUMNS} FROM participants WHERE id = ?1 LIMIT 1"
    );
    sqlx::query_as::<_, ParticipantRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn load_participant_tx(
    conn: &mut SqliteConnection,
    id: &str,
) -> sqlx::Result<Option<ParticipantRow>> {
    let sql = format!(
        "SELECT {PARTICIPANT_COLUMNS} FROM participants WHERE id = ?1 LIMIT 1"
    );
    sqlx::query_as::<_, ParticipantRow>(&sql)
        .bind(id)
        .fetch_optional(conn)
        .await
}

pub async fn list_participants(pool: &SqlitePool) -> sqlx::Result<Vec<ParticipantRow>> {
    let sql = format!(
        "SELECT {PARTICIPANT_COLUMNS} FROM participants ORDER BY registered_at ASC, id ASC"
    );
    sqlx::query_as::<_, ParticipantRow>(&sql).fetch_all(pool).await
}

pub struct NewParticipant<'a> {
    pub id: &'a str,
    pub email: &'a str,
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
    pub university_id: Option<i64>,
    pub major: Option<&'a str>,
    pub gender: Option<&'a str>,
    pub year_of_study: Option<&'a str>,
    pub experience_level: Option<&'a str>,
    pub needs_parking: bool,
    pub dietary_restrictions: Option<&'a str>,
    pub interests: Option<&'a str>,
    pub marketing_source: Option<&'a str>,
    pub accommodations: Option<&'a str>,
    pub resume_url: Option<&'a str>,
}

const SQL_INSERT_PARTICIPANT: &str = r#"
INSERT INTO participants (
  id,
  email,
  first_name,
  last_name,
  university_id,
  major,
  gender,
  year_of_study,
  experience_level,
  needs_parking,
  dietary_restrictions,
  interests,
  marketing_source,
  accommodations,
  resume_url
) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
"#;

pub async fn insert_participant(
    pool: &SqlitePool,
    p: NewParticipant<'_>,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_INSERT_PARTICIPANT)
        .bind(p.id)
        .bind(p.email)
        .bind(p.first_name)
        .bind(p.last_name)
        .bind(p.university_id)
        .bind(p.major)
        .bind(p.gender)
        .bind(p.year_of_study)
        .bind(p.experience_level)
        .bind(p.needs_parking)
        .bind(p.dietary_restrictions)
        .bind(p.interests)
        .bind(p.marketing_source)
        .bind(p.accommodations)
        .bind(p.resume_url)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

/// Participant field edits from the back office. Absent fields are left as-is.
pub struct ParticipantEdit<'a> {
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
    pub university_id: Option<i64>,
    pub major: Option<&'a str>,
    pub gender: Option<&'a str>,
    pub year_of_study: Option<&'a str>,
    pub experience_level: Option<&'a str>,
    pub needs_parking: Option<bool>,
    pub dietary_restrictions: Option<&'a str>,
    pub interests: Option<&'a str>,
    pub marketing_source: Option<&'a str>,
    pub accommodations: Option<&'a str>,
}

const SQL_UPDATE_PARTICIPANT_FIELDS: &str = r#"
UPDATE participants
SET first_name = COALESCE(?2, first_name),
    last_name = COALESCE(?3, last_name),
    university_id = COALESCE(?4, university_id),
    major = COALESCE(?5, major),
    gender = COALESCE(?6, gender),
    year_of_study = COALESCE(?7, year_of_study),
    experience_level = COALESCE(?8, experience_level),
    needs_parking = COALESCE(?9, needs_parking),
    dietary_restrictions = COALESCE(?10, dietary_restrictions),
    interests = COALESCE(?11, interests),
    marketing_source = COALESCE(?12, marketing_source),
    accommodations = COALESCE(?13, accommodations)
WHERE id = ?1
"#;

pub async fn update_participant_fields(
    pool: &SqlitePool,
    id: &str,
    edit: ParticipantEdit<'_>,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_UPDATE_PARTICIPANT_FIELDS)
        .bind(id)
        .bind(edit.first_name)
        .bind(edit.last_name)
        .bind(edit.university_id)
        .bind(edit.major)
        .bind(edit.gender)
        .bind(edit.year_of_study)
        .bind(edit.experience_level)
        .bind(edit.needs_parking)
        .bind(edit.dietary_restrictions)
        .bind(edit.interests)
        .bind(edit.marketing_source)
        .bind(edit.accommodations)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

const SQL_UPDATE_STATUS: &str = r#"
UPDATE participants
SET status = ?2
WHERE id = ?1
"#;

pub async fn update_status(pool: &SqlitePool, id: &str, status: &str) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_UPDATE_STATUS)
        .bind(id)
        .bind(status)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

const SQL_UPDATE_CHECKED_IN: &str = r#"
UPDATE participants
SET checked_in = ?2
WHERE id = ?1
"#;

pub async fn update_checked_in(
    pool: &SqlitePool,
    id: &str,
    checked_in: bool,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_UPDATE_CHECKED_IN)
        .bind(id)
        .bind(checked_in)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

const SQL_PARTICIPANT_EXISTS: &str = r#"
SELECT EXISTS (SELECT 1 FROM participants WHERE id = ?1)
"#;

pub async fn participant_exists_tx(
    conn: &mut SqliteConnection,
    id: &str,
) -> sqlx::Result<bool> {
    sqlx::query_scalar::<_, bool>(SQL_PARTICIPANT_EXISTS)
        .bind(id)
        .fetch_one(conn)
        .await
}

/// Returns the subset of `ids` that exist, in select order.
pub async fn select_existing_ids_tx(
    conn: &mut SqliteConnection,
    ids: &[String],
) -> sqlx::Result<Vec<String>> {
    let sql = format!(
        "SELECT id FROM participants WHERE id IN ({})",
        placeholders(ids.len())
    );
    let mut query = sqlx::query_scalar::<_, String>(&sql);
    for id in ids {
        query = query.bind(id);
    }
    query.fetch_all(conn).await
}

pub async fn select_by_ids_tx(
    conn: &mut SqliteConnection,
    ids: &[String],
) -> sqlx::Result<Vec<ParticipantRow>> {
    let sql = format!(
        "SELECT {PARTICIPANT_COLUMNS} FROM participants WHERE id IN ({}) ORDER BY registered_at ASC, id ASC",
        placeholders(ids.len())
    );
    let mut query = sqlx::query_as::<_, ParticipantRow>(&sql);
    for id in ids {
        query = query.bind(id);
    }
    query.fetch_all(conn).await
}

/// Applies the requested status/check-in change to every id in the list.
pub async fn bulk_update_tx(
    conn: &mut SqliteConnection,
    ids: &[String],
    status: Option<&str>,
    checked_in: Option<bool>,
) -> sqlx::Result<u64> {
    let mut sets: Vec<&str> = Vec::new();
    if status.is_some() {
        sets.push("status = ?");
    }
    if checked_in.is_some() {
        sets.push("checked_in = ?");
    }
    let sql = format!(
        "UPDATE participants SET {} WHERE id IN ({})",
        sets.join(", "),
        placeholders(ids.len())
    );
    let mut query = sqlx::query(&sql);
    if let Some(status) = status {
        query = query.bind(status);
    }
    if let Some(checked_in) = checked_in {
        query = query.bind(checked_in);
    }
    for id in ids {
        query = query.bind(id);
    }
    let res = query.execute(conn).await?;
    Ok(res.rows_affected())
}

pub async fn select_identities_tx(
    conn: &mut SqliteConnection,
    ids: &[String],
) -> sqlx::Result<Vec<ParticipantIdentityRow>> {
    let sql = format!(
        "SELECT id, email, first_name, last_name FROM participants WHERE id IN ({})",
        placeholders(ids.len())
    );
    let mut query = sqlx::query_as::<_, ParticipantIdentityRow>(&sql);
    for id in ids {
        query = query.bind(id);
    }
    query.fetch_all(conn).await
}

pub async fn delete_by_ids_tx(
    conn: &mut SqliteConnection,
    ids: &[String],
) -> sqlx::Result<u64> {
    let sql = format!(
        "DELETE FROM participants WHERE id IN ({})",
        placeholders(ids.len())
    );
    let mut query = sqlx::query(&sql);
    for id in ids {
        query = query.bind(id);
    }
    let res = query.execute(conn).await?;
    Ok(res.rows_affected())
}

pub async fn select_export_by_ids(
    pool: &SqlitePool,
    ids: &[String],
) -> sqlx::Result<Vec<ParticipantExportRow>> {
    let sql = format!(
        r#"
SELECT
    p.id,
    p.email,
    p.first_name,
    p.last_name,
    p.university_id,
    p.major,
    p.gender,
    p.year_of_study,
    p.experience_level,
    p.needs_parking,
    p.dietary_restrictions,
    p.interests,
    p.marketing_source,
    p.accommodations,
    p.resume_url,
    p.status,
    p.checked_in,
    p.registered_at,
    u.name AS university_name
FROM participants p
LEFT JOIN universities u ON u.id = p.university_id
WHERE p.id IN ({})
ORDER BY p.registered_at ASC, p.id ASC
"#,
        placeholders(ids.len())
    );
    let mut query = sqlx::query_as::<_, ParticipantExportRow>(&sql);
    for id in ids {
        query = query.bind(id);
    }
    query.fetch_all(pool).await
}
