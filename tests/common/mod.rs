#![allow(dead_code)]

use std::env;
use std::sync::Once;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use intake_backend::AppState;
use serde_json::{json, Value as JsonValue};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tower::ServiceExt;

pub const ADMIN_PASSWORD: &str = "test-admin-secret";

static INIT: Once = Once::new();

pub fn init_test_env() {
    INIT.call_once(|| {
        env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
        env::set_var("DATABASE_URL", "sqlite::memory:");
        env::set_var("ADMIN_PASSWORD", ADMIN_PASSWORD);
        env::set_var("SESSION_SECRET", "test-session-secret");
        env::set_var("SUBMIT_RPS", "1000");
        env::remove_var("MAIL_API_KEY");
        env::remove_var("MAIL_TO");
    });
    intake_backend::config::init_config().ok();
}

/// Fresh router over a private in-memory database.
pub async fn test_app() -> (Router, SqlitePool) {
    init_test_env();
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");
    let app = intake_backend::routes::router(AppState::new(pool.clone()));
    (app, pool)
}

pub async fn body_json(resp: Response) -> JsonValue {
    let bytes = to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

pub async fn body_bytes(resp: Response) -> Vec<u8> {
    to_bytes(resp.into_body(), 16 * 1024 * 1024)
        .await
        .expect("read body")
        .to_vec()
}

pub async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<JsonValue>,
    cookie: Option<&str>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };
    app.clone().oneshot(request).await.expect("response")
}

/// Logs in with the test password and returns the `admin_session=...` cookie
/// pair for subsequent requests.
pub async fn login_cookie(app: &Router) -> String {
    let resp = request(
        app,
        "POST",
        "/api/admin/login",
        Some(json!({ "password": ADMIN_PASSWORD })),
        None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let set_cookie = resp
        .headers()
        .get(header::SET_COOKIE)
        .expect("set-cookie header")
        .to_str()
        .expect("cookie str");
    set_cookie
        .split(';')
        .next()
        .expect("cookie pair")
        .to_string()
}

pub fn valid_payload() -> JsonValue {
    json!({
        "fullName": "Ayşe Yılmaz",
        "message": "Merhaba, başvurmak istiyorum",
        "consent": true,
        "phone": "0555 111 22 33",
        "gender": "female",
        "positionApplied": "Satış Danışmanı",
        "employmentType": "parttime",
        "shiftAvailability": "gunduz,haftaSonu"
    })
}

/// Submits a payload and returns the new submission id.
pub async fn submit(app: &Router, payload: JsonValue) -> String {
    let resp = request(app, "POST", "/api/submit", Some(payload), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["ok"], json!(true));
    body["id"].as_str().expect("submission id").to_string()
}
