#![allow(dead_code)]

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use hackportal::database::admin_repo::{self, NewAdmin};
use hackportal::database::participant_repo::{self, NewParticipant};
use hackportal::models::{ActorStatus, Role};

/// Fresh in-memory database with the full schema applied. One connection so
/// every query sees the same memory store.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("cannot open in-memory database");
    sqlx::migrate!().run(&pool).await.expect("migrations failed");
    pool
}

pub async fn seed_admin(pool: &SqlitePool, id: &str, email: &str, role: Role, status: ActorStatus) {
    let mut conn = pool.acquire().await.expect("acquire");
    admin_repo::insert_admin_tx(
        &mut conn,
        NewAdmin {
            id,
            email,
            first_name: Some("Test"),
            last_name: Some("Admin"),
            role: role.as_str(),
            status: status.as_str(),
        },
    )
    .await
    .expect("seed admin");
}

pub async fn seed_participant(pool: &SqlitePool, id: &str, email: &str) {
    seed_participant_with_university(pool, id, email, None).await;
}

pub async fn seed_participant_with_university(
    pool: &SqlitePool,
    id: &str,
    email: &str,
    university_id: Option<i64>,
) {
    participant_repo::insert_participant(
        pool,
        NewParticipant {
            id,
            email,
            first_name: Some("Pat"),
            last_name: Some("Hacker"),
            university_id,
            major: Some("Computer Science"),
            gender: None,
            year_of_study: Some("3"),
            experience_level: Some("intermediate"),
            needs_parking: false,
            dietary_restrictions: None,
            interests: None,
            marketing_source: None,
            accommodations: None,
            resume_url: None,
        },
    )
    .await
    .expect("seed participant");
}

pub async fn seed_university(pool: &SqlitePool, name: &str) -> i64 {
    sqlx::query_scalar::<_, i64>("INSERT INTO universities (name) VALUES (?1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .expect("seed university")
}

pub async fn active_super_admin_count(pool: &SqlitePool) -> i64 {
    admin_repo::count_active_super_admins(pool)
        .await
        .expect("count")
}
