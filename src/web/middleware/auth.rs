use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose, Engine as _};
use serde::Deserialize;

use crate::database::admin_repo;
use crate::error::AppError;
use crate::models::{ActorStatus, Role};
use crate::web::AppState;

/// Authenticated identity-provider subject, resolved from the access token.
#[derive(Clone, Debug)]
pub struct Session {
    pub id: String,
    pub email: String,
}

/// Admin/volunteer actor context, resolved once per request and passed to
/// handlers explicitly. Never a module-level singleton.
#[derive(Clone, Debug)]
pub struct Caller {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub status: ActorStatus,
}

#[derive(Deserialize)]
struct JwtPayload {
    sub: String,
    #[serde(default)]
    email: String,
}

fn session_from_request(request: &Request) -> Option<Session> {
    // Extract the access token cookie
    let token = request
        .headers()
        .get(header::COOKIE)
        .and_then(|hv| hv.to_str().ok())
        .and_then(|cookies| {
            cookies
                .split("; ")
                .find(|c| c.starts_with("access_token="))
                .and_then(|c| c.strip_prefix("access_token="))
        })?;

    // Parse JWT payload (middle part); signature verification belongs to the
    // identity provider that issued it.
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return None;
    }
    let payload_bytes = general_purpose::URL_SAFE_NO_PAD.decode(parts[1]).ok()?;
    let payload = serde_json::from_slice::<JwtPayload>(&payload_bytes).ok()?;

    Some(Session {
        id: payload.sub,
        email: payload.email,
    })
}

/// Requires a valid identity-provider session. Used by the registration and
/// dashboard routes that any authenticated subject may reach.
pub async fn require_session(mut request: Request, next: Next) -> Response {
    let Some(session) = session_from_request(&request) else {
        return AppError::AuthenticationRequired.into_response();
    };

    request.extensions_mut().insert(session);
    next.run(request).await
}

/// Requires the session subject to have an active row in the admins table,
/// and injects the resolved `Caller` for the handler.
pub async fn require_actor(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(session) = session_from_request(&request) else {
        return AppError::AuthenticationRequired.into_response();
    };

    let row = match admin_repo::load_admin(&state.pool, &session.id).await {
        Ok(row) => row,
        Err(e) => {
            tracing::error!("Actor lookup failed for {}: {}", session.id, e);
            return AppError::Upstream.into_response();
        }
    };
    let Some(row) = row else {
        return AppError::Unauthorized("Admin access required").into_response();
    };

    let (Some(role), Some(status)) = (Role::parse(&row.role), ActorStatus::parse(&row.status))
    else {
        tracing::error!("Admin row {} carries unknown role or status", row.id);
        return AppError::Upstream.into_response();
    };
    if status != ActorStatus::Active {
        return AppError::Unauthorized("Account is not active").into_response();
    }

    request.extensions_mut().insert(Caller {
        id: row.id,
        email: row.email,
        role,
        status,
    });
    next.run(request).await
}
