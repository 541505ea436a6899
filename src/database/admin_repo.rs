use sqlx::{SqliteConnection, SqlitePool};

use crate::models::AdminRow;

pub const SQL_LOAD_ADMIN: &str = r#"
SELECT
    id,
    email,
    first_name,
    last_name,
    role,
    status,
    created_at,
    updated_at
FROM admins
WHERE id = ?1
LIMIT 1
"#;

pub const SQL_LOAD_ADMIN_BY_EMAIL: &str = r#"
SELECT
    id,
    email,
    first_name,
    last_name,
    role,
    status,
    created_at,
    updated_at
FROM admins
WHERE email = ?1
LIMIT 1
"#;

pub const SQL_LIST_ADMINS: &str = r#"
SELECT
    id,
    email,
    first_name,
    last_name,
    role,
    status,
    created_at,
    updated_at
FROM admins
ORDER BY created_at ASC, id ASC
"#;

const SQL_INSERT_ADMIN: &str = r#"
INSERT INTO admins (
  id,
  email,
  first_name,
  last_name,
  role,
  status
) VALUES (?, ?, ?, ?, ?, ?)
"#;

const SQL_UPDATE_ROLE: &str = r#"
UPDATE admins
SET role = ?2, updated_at = datetime('now')
WHERE id = ?1
"#;

const SQL_UPDATE_STATUS: &str = r#"
UPDATE admins
SET status = ?2, updated_at = datetime('now')
WHERE id = ?1
"#;

const SQL_DELETE_ADMIN: &str = r#"
DELETE FROM admins
WHERE id = ?1
"#;

const SQL_COUNT_ACTIVE_SUPER_ADMINS: &str = r#"
SELECT COUNT(*)
FROM admins
WHERE role = 'super_admin'
  AND status = 'active'
"#;

const SQL_COUNT_SUPER_ADMINS: &str = r#"
SELECT COUNT(*)
FROM admins
WHERE role = 'super_admin'
"#;

pub async fn load_admin(pool: &SqlitePool, id: &str) -> sqlx::Result<Option<AdminRow>> {
    sqlx::query_as::<_, AdminRow>(SQL_LOAD_ADMIN)
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn load_admin_tx(
    conn: &mut SqliteConnection,
    id: &str,
) -> sqlx::Result<Option<AdminRow>> {
    sqlx::query_as::<_, AdminRow>(SQL_LOAD_ADMIN)
        .bind(id)
        .fetch_optional(conn)
        .await
}

pub async fn load_admin_by_email_tx(
    conn: &mut SqliteConnection,
    email: &str,
) -> sqlx::Result<Option<AdminRow>> {
    sqlx::query_as::<_, AdminRow>(SQL_LOAD_ADMIN_BY_EMAIL)
        .bind(email)
        .fetch_optional(conn)
        .await
}

pub async fn list_admins(pool: &SqlitePool) -> sqlx::Result<Vec<AdminRow>> {
    sqlx::query_as::<_, AdminRow>(SQL_LIST_ADMINS)
        .fetch_all(pool)
        .await
}

pub struct NewAdmin<'a> {
    pub id: &'a str,
    pub email: &'a str,
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
    pub role: &'a str,
    pub status: &'a str,
}

pub async fn insert_admin_tx(
    conn: &mut SqliteConnection,
    admin: NewAdmin<'_>,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_INSERT_ADMIN)
        .bind(admin.id)
        .bind(admin.email)
        .bind(admin.first_name)
        .bind(admin.last_name)
        .bind(admin.role)
        .bind(admin.status)
        .execute(conn)
        .await?;
    Ok(res.rows_affected())
}

pub async fn update_role_tx(
    conn: &mut SqliteConnection,
    id: &str,
    role: &str,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_UPDATE_ROLE)
        .bind(id)
        .bind(role)
        .execute(conn)
        .await?;
    Ok(res.rows_affected())
}

pub async fn update_status_tx(
    conn: &mut SqliteConnection,
    id: &str,
    status: &str,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_UPDATE_STATUS)
        .bind(id)
        .bind(status)
        .execute(conn)
        .await?;
    Ok(res.rows_affected())
}

pub async fn delete_admin_tx(conn: &mut SqliteConnection, id: &str) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_DELETE_ADMIN).bind(id).execute(conn).await?;
    Ok(res.rows_affected())
}

/// Count of super admins whose status is active. Used by the role and
/// status guards; must run on the same transaction as the mutation it guards.
pub async fn count_active_super_admins_tx(conn: &mut SqliteConnection) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>(SQL_COUNT_ACTIVE_SUPER_ADMINS)
        .fetch_one(conn)
        .await
}

/// Count of super admins regardless of status. Used by the delete guard.
pub async fn count_super_admins_tx(conn: &mut SqliteConnection) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>(SQL_COUNT_SUPER_ADMINS)
        .fetch_one(conn)
        .await
}

pub async fn count_active_super_admins(pool: &SqlitePool) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>(SQL_COUNT_ACTIVE_SUPER_ADMINS)
        .fetch_one(pool)
        .await
}
