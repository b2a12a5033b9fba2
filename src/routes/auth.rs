use axum::{
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::time::Duration;
use subtle::ConstantTimeEq;

use crate::dto::admin_dto::LoginPayload;
use crate::error::{Error, Result};
use crate::middleware::auth::SESSION_COOKIE;
use crate::utils::session;

const SESSION_TTL: Duration = Duration::from_secs(8 * 60 * 60);

pub async fn login(Json(payload): Json<LoginPayload>) -> Result<Response> {
    let config = crate::config::get_config();
    if config.auth_disabled {
        tracing::warn!("admin login attempted while auth is disabled");
        return Ok(Json(json!({ "ok": true, "authDisabled": true })).into_response());
    }

    let expected = config.admin_password.as_deref().unwrap_or_default();
    let matches: bool = payload
        .password
        .as_bytes()
        .ct_eq(expected.as_bytes())
        .into();
    if !matches {
        return Err(Error::Unauthorized("Geçersiz parola".to_string()));
    }

    let key = config
        .session_key()
        .ok_or_else(|| Error::Config("session key missing".to_string()))?;
    let token = session::issue(key, SESSION_TTL);
    let cookie = format!(
        "{}={}; Path=/api/admin; HttpOnly; Secure; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE,
        token,
        SESSION_TTL.as_secs(),
    );

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(json!({ "ok": true })),
    )
        .into_response())
}

pub async fn logout() -> impl IntoResponse {
    let cookie = format!(
        "{}=; Path=/api/admin; HttpOnly; Secure; SameSite=Lax; Max-Age=0",
        SESSION_COOKIE,
    );
    ([(header::SET_COOKIE, cookie)], Json(json!({ "ok": true })))
}
