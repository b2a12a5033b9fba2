use axum::{
    extract::Request,
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::utils::session;

pub const SESSION_COOKIE: &str = "admin_session";

/// Gate for every admin route except login/logout. When no admin password is
/// configured the gate passes everything through (see Config::auth_disabled).
pub async fn require_admin_session(req: Request, next: Next) -> Response {
    let config = crate::config::get_config();
    if config.auth_disabled {
        return next.run(req).await;
    }
    let Some(key) = config.session_key() else {
        return unauthorized();
    };
    let Some(token) = cookie_value(req.headers(), SESSION_COOKIE) else {
        return unauthorized();
    };
    if !session::verify(key, &token) {
        return unauthorized();
    }
    next.run(req).await
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"ok": false, "reason": "auth", "error": "unauthorized"})),
    )
        .into_response()
}

fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    raw.split(';')
        .filter_map(|part| part.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}
