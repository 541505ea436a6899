pub mod middleware;
pub mod routes;

use sqlx::SqlitePool;

use crate::services::identity_service::IdentityClient;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub identity: IdentityClient,
}
