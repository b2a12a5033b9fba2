use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use validator::Validate;

use crate::dto::admin_dto::{AddNotePayload, ListQuery, UpdateSubmissionPayload};
use crate::error::Result;
use crate::AppState;

pub async fn list_submissions(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse> {
    let (items, total) = state
        .submission_service
        .list(&query.filter(), query.order, query.limit(), query.offset())
        .await?;
    Ok(Json(json!({ "ok": true, "items": items, "total": total })))
}

#[utoipa::path(
    get,
    path = "/api/admin/{id}",
    params(
        ("id" = String, Path, description = "Submission id")
    ),
    responses(
        (status = 200, description = "Submission with its timeline"),
        (status = 404, description = "Unknown id"),
    ),
)]
pub async fn get_submission(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let (item, events) = state.submission_service.get(&id).await?;
    Ok(Json(json!({ "ok": true, "item": item, "events": events })))
}

pub async fn update_submission(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateSubmissionPayload>,
) -> Result<impl IntoResponse> {
    let item = state.submission_service.update(&id, &payload).await?;
    Ok(Json(json!({ "ok": true, "item": item })))
}

pub async fn delete_submission(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    state.submission_service.delete(&id).await?;
    Ok(Json(json!({ "ok": true })))
}

pub async fn add_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<AddNotePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let event = state.submission_service.add_note(&id, &payload.note).await?;
    Ok(Json(json!({ "ok": true, "event": event })))
}
