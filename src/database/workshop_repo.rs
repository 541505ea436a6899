use sqlx::SqlitePool;

use crate::models::WorkshopRow;

pub const SQL_LIST_WORKSHOPS: &str = r#"
SELECT
    id,
    title,
    description,
    location,
    starts_at,
    ends_at,
    capacity,
    created_at
FROM workshops
ORDER BY starts_at ASC, created_at ASC
"#;

pub const SQL_LOAD_WORKSHOP: &str = r#"
SELECT
    id,
    title,
    description,
    location,
    starts_at,
    ends_at,
    capacity,
    created_at
FROM workshops
WHERE id = ?1
LIMIT 1
"#;

const SQL_INSERT_WORKSHOP: &str = r#"
INSERT INTO workshops (
  id,
  title,
  description,
  location,
  starts_at,
  ends_at,
  capacity
) VALUES (?, ?, ?, ?, ?, ?, ?)
"#;

const SQL_UPDATE_WORKSHOP: &str = r#"
UPDATE workshops
SET title = COALESCE(?2, title),
    description = COALESCE(?3, description),
    location = COALESCE(?4, location),
    starts_at = COALESCE(?5, starts_at),
    ends_at = COALESCE(?6, ends_at),
    capacity = COALESCE(?7, capacity)
WHERE id = ?1
"#;

const SQL_DELETE_WORKSHOP: &str = r#"
DELETE FROM workshops
WHERE id = ?1
"#;

pub async fn list_workshops(pool: &SqlitePool) -> sqlx::Result<Vec<WorkshopRow>> {
    sqlx::query_as::<_, WorkshopRow>(SQL_LIST_WORKSHOPS)
        .fetch_all(pool)
        .await
}

pub async fn load_workshop(pool: &SqlitePool, id: &str) -> sqlx::Result<Option<WorkshopRow>> {
    sqlx::query_as::<_, WorkshopRow>(SQL_LOAD_WORKSHOP)
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub struct NewWorkshop<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub location: Option<&'a str>,
    pub starts_at: Option<&'a str>,
    pub ends_at: Option<&'a str>,
    pub capacity: Option<i64>,
}

pub async fn insert_workshop(pool: &SqlitePool, w: NewWorkshop<'_>) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_INSERT_WORKSHOP)
        .bind(w.id)
        .bind(w.title)
        .bind(w.description)
        .bind(w.location)
        .bind(w.starts_at)
        .bind(w.ends_at)
        .bind(w.capacity)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

pub struct WorkshopEdit<'a> {
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
    pub location: Option<&'a str>,
    pub starts_at: Option<&'a str>,
    pub ends_at: Option<&'a str>,
    pub capacity: Option<i64>,
}

pub async fn update_workshop(
    pool: &SqlitePool,
    id: &str,
    edit: WorkshopEdit<'_>,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_UPDATE_WORKSHOP)
        .bind(id)
        .bind(edit.title)
        .bind(edit.description)
        .bind(edit.location)
        .bind(edit.starts_at)
        .bind(edit.ends_at)
        .bind(edit.capacity)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

pub async fn delete_workshop(pool: &SqlitePool, id: &str) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_DELETE_WORKSHOP).bind(id).execute(pool).await?;
    Ok(res.rows_affected())
}
