use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use cookie::Cookie;
use serde::Deserialize;
use serde_json::json;

use crate::error::AppError;
use crate::web::AppState;

#[derive(Deserialize)]
pub struct LoginBody {
    email: String,
    password: String,
}

fn session_cookie(name: &str, value: String) -> Cookie<'static> {
    let mut c = Cookie::new(name.to_string(), value);
    c.set_path("/");
    c.set_http_only(true);
    c.set_same_site(cookie::SameSite::Lax);
    c
}

pub async fn login_handler(
    State(state): State<AppState>,
    Json(body): Json<LoginBody>,
) -> Result<Response, AppError> {
    let tokens = state.identity.login(&body.email, &body.password).await?;

    let access_cookie = session_cookie("access_token", tokens.access_token);
    let refresh_cookie = session_cookie("refresh_token", tokens.refresh_token);

    let mut response = Json(json!({ "success": true })).into_response();
    for cookie in [access_cookie, refresh_cookie] {
        let value = cookie
            .to_string()
            .parse()
            .map_err(|_| AppError::Upstream)?;
        response.headers_mut().append(header::SET_COOKIE, value);
    }
    Ok(response)
}

pub async fn logout_handler() -> Response {
    let mut access_cookie = session_cookie("access_token", String::new());
    access_cookie.set_max_age(cookie::time::Duration::ZERO);
    let mut refresh_cookie = session_cookie("refresh_token", String::new());
    refresh_cookie.set_max_age(cookie::time::Duration::ZERO);

    let mut response = Json(json!({ "success": true })).into_response();
    for cookie in [access_cookie, refresh_cookie] {
        if let Ok(value) = cookie.to_string().parse() {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }
    response
}

pub async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
