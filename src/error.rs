use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Closed error taxonomy for every handler and service in the portal.
///
/// Validation and authorization failures carry a message that is safe to show
/// to the client; database and identity-provider failures are logged at the
/// conversion point and collapse to a generic `Upstream` so raw driver text
/// never leaks past the handler boundary.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("{0}")]
    Unauthorized(&'static str),

    #[error("{0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Operation would leave no active super admin")]
    LastSuperAdminViolation,

    #[error("You cannot modify or delete your own admin account")]
    SelfModificationForbidden,

    #[error("{0}")]
    Conflict(String),

    #[error("Something went wrong, please try again later")]
    Upstream,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::AuthenticationRequired => StatusCode::UNAUTHORIZED,
            AppError::Unauthorized(_) => StatusCode::FORBIDDEN,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::LastSuperAdminViolation => StatusCode::CONFLICT,
            AppError::SelfModificationForbidden => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Upstream => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        tracing::error!("Database error: {}", e);
        AppError::Upstream
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        tracing::error!("Identity provider request failed: {}", e);
        AppError::Upstream
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({
            "success": false,
            "error": self.to_string(),
        }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_taxonomy() {
        assert_eq!(
            AppError::AuthenticationRequired.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Unauthorized("Super Admin access required").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::Validation("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotFound("Participant").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::LastSuperAdminViolation.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::SelfModificationForbidden.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::Conflict("dup".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::Upstream.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
