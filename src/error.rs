use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),

    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Excel export error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        if let Error::Validation(errors) = &self {
            let mut fields = serde_json::Map::new();
            for (field, errs) in errors.field_errors() {
                let codes: Vec<String> = errs.iter().map(|e| e.code.to_string()).collect();
                fields.insert(camel_case(field), json!(codes));
            }
            let body = Json(json!({
                "ok": false,
                "reason": "validation",
                "error": "missing or invalid fields",
                "fields": fields,
            }));
            return (StatusCode::BAD_REQUEST, body).into_response();
        }

        let (status, reason, error_message) = match self {
            Error::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            Error::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "auth", msg),
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            Error::Database(err) => {
                tracing::error!(error = ?err, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "server",
                    "server error".to_string(),
                )
            }
            Error::Xlsx(err) => {
                tracing::error!(error = ?err, "export failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "export",
                    "export failed".to_string(),
                )
            }
            Error::Reqwest(err) => {
                tracing::error!(error = ?err, "outbound request failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "external",
                    "external service error".to_string(),
                )
            }
            Error::Internal(msg) | Error::Config(msg) => {
                tracing::error!(error = %msg, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "server",
                    "server error".to_string(),
                )
            }
            Error::Anyhow(err) => {
                tracing::error!(error = ?err, "unexpected error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "server",
                    "server error".to_string(),
                )
            }
            Error::Validation(_) => unreachable!("handled above"),
        };

        let body = Json(json!({ "ok": false, "reason": reason, "error": error_message }));
        (status, body).into_response()
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Error::NotFound("Resource not found".to_string()),
            other => Error::Database(other),
        }
    }
}

// Validator reports Rust field names; the wire format is camelCase.
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}
