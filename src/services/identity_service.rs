use serde::Deserialize;
use serde_json::json;

use crate::error::AppError;
use crate::models::Role;

/// Thin client for the external identity provider. The portal only ever asks
/// it two things: "who is this" (answered by the token itself, see the auth
/// middleware) and "create/update/delete an auth-level user record".
#[derive(Clone)]
pub struct IdentityClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Deserialize)]
struct AuthServiceResponse {
    #[serde(rename = "success")]
    _success: bool,
    data: AuthTokens,
}

impl IdentityClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthTokens, AppError> {
        let response = self
            .http
            .post(format!("{}/api/v1/auth/login", self.base_url))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(AppError::AuthenticationRequired);
        }
        if !status.is_success() {
            tracing::error!("Identity provider login returned {}", status);
            return Err(AppError::Upstream);
        }

        let wrapper: AuthServiceResponse = response.json().await.map_err(|e| {
            tracing::error!("Cannot parse identity provider response: {}", e);
            AppError::Upstream
        })?;
        Ok(wrapper.data)
    }

    /// Tags the auth-level user record with its portal role, so the provider
    /// side stays in sync after promotion or a role change.
    pub async fn set_user_role(&self, user_id: &str, role: Role) -> Result<(), AppError> {
        let response = self
            .http
            .patch(format!("{}/api/v1/admin/users/{}", self.base_url, user_id))
            .json(&json!({ "metadata": { "role": role.as_str() } }))
            .send()
            .await?;
        if !response.status().is_success() {
            tracing::error!(
                "Identity provider role update for {} returned {}",
                user_id,
                response.status()
            );
            return Err(AppError::Upstream);
        }
        Ok(())
    }

    pub async fn clear_user_role(&self, user_id: &str) -> Result<(), AppError> {
        let response = self
            .http
            .patch(format!("{}/api/v1/admin/users/{}", self.base_url, user_id))
            .json(&json!({ "metadata": { "role": null } }))
            .send()
            .await?;
        if !response.status().is_success() {
            tracing::error!(
                "Identity provider role clear for {} returned {}",
                user_id,
                response.status()
            );
            return Err(AppError::Upstream);
        }
        Ok(())
    }
}
