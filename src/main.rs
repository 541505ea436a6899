use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};
use dotenvy::dotenv;
use http::header::{HeaderValue, CACHE_CONTROL};
use sqlx::sqlite::SqlitePoolOptions;
use std::env;
use std::net::SocketAddr;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::set_header::SetResponseHeaderLayer;

use hackportal::services::identity_service::IdentityClient;
use hackportal::web::middleware::auth as auth_middleware;
use hackportal::web::routes::{admins, auth, participants, workshops};
use hackportal::web::AppState;

#[tokio::main]
async fn main() {
    dotenv().ok();

    // 1. Start logging
    tracing_subscriber::fmt::init();

    // 2. Connect to the database and bring the schema up to date
    let db_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = SqlitePoolOptions::new()
        .connect(&db_url)
        .await
        .expect("Cannot connect to DB");
    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Database migrations failed");

    let auth_url = env::var("AUTH_SERVICE_URL")
        .unwrap_or_else(|_| "http://auth.localhost:8080".to_string());
    let state = AppState {
        pool,
        identity: IdentityClient::new(auth_url),
    };

    // 3. Routes for any authenticated subject (registration, dashboard)
    let session_routes = Router::new()
        .route("/register", post(participants::register_handler))
        .route("/workshops", get(workshops::list_handler))
        .layer(middleware::from_fn(auth_middleware::require_session));

    // 4. Routes that require an active admins-table row
    let actor_routes = Router::new()
        .route("/participants", get(participants::list_handler))
        .route(
            "/participants/bulk-update",
            patch(participants::bulk_update_handler)
                .post(participants::bulk_operation_handler),
        )
        .route("/participants/:id", patch(participants::edit_handler))
        .route(
            "/participants/:id/status",
            patch(participants::status_handler),
        )
        .route(
            "/participants/:id/check-in",
            patch(participants::check_in_handler),
        )
        .route("/admin/admins", get(admins::list_handler))
        .route(
            "/admin/admins/:id/status",
            patch(admins::change_status_handler),
        )
        .route("/admin/admins/:id/role", patch(admins::change_role_handler))
        .route("/admin/promote-user", post(admins::promote_handler))
        .route("/admin/remove-admin", post(admins::remove_handler))
        .route("/admin/workshops", post(workshops::create_handler))
        .route(
            "/admin/workshops/:id",
            patch(workshops::update_handler).delete(workshops::delete_handler),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::require_actor,
        ));

    // 5. Assemble the application
    let app = Router::new()
        .route("/health", get(auth::health_handler))
        .route("/login", post(auth::login_handler))
        .route("/logout", post(auth::logout_handler))
        .merge(session_routes)
        .merge(actor_routes)
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(CatchPanicLayer::new())
        .with_state(state);

    // 6. Start the server (with fallback port)
    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .expect("Cannot parse host/port");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::warn!(
                "Could not bind {}: {}. Trying fallback {}:{}",
                addr,
                e,
                host,
                port + 1
            );
            let fallback: SocketAddr = format!("{}:{}", host, port + 1)
                .parse()
                .expect("Cannot parse fallback address");
            tokio::net::TcpListener::bind(fallback)
                .await
                .expect("Cannot bind fallback port")
        }
    };

    let bound_addr = listener.local_addr().expect("No local address");
    tracing::info!("Portal listening on http://{}", bound_addr);

    axum::serve(listener, app).await.expect("Server crashed");
}
