pub mod admin;
pub mod auth;
pub mod export;
pub mod health;
pub mod submit;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::rate_limit;
use crate::AppState;

pub fn router(state: AppState) -> Router {
    let config = crate::config::get_config();

    let public = Router::new()
        .route("/health", get(health::health))
        .route("/api/submit", post(submit::create_submission))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit::new_rps_state(config.submit_rps),
            rate_limit::rps_middleware,
        ));

    let admin = Router::new()
        .route("/api/admin", get(admin::list_submissions))
        .route("/api/admin/export", get(export::export_submissions))
        .route(
            "/api/admin/:id",
            get(admin::get_submission)
                .patch(admin::update_submission)
                .delete(admin::delete_submission),
        )
        .route("/api/admin/:id/note", post(admin::add_note))
        .layer(axum::middleware::from_fn(
            crate::middleware::auth::require_admin_session,
        ));

    // Login and logout sit outside the session gate.
    let session = Router::new()
        .route("/api/admin/login", post(auth::login))
        .route("/api/admin/logout", post(auth::logout));

    Router::new()
        .merge(public)
        .merge(admin)
        .merge(session)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(1024 * 1024))
}
