use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::dto::submit_dto::SubmitPayload;
use crate::error::{Error, Result};
use crate::AppState;

#[utoipa::path(
    post,
    path = "/api/submit",
    request_body = SubmitPayload,
    responses(
        (status = 200, description = "Submission stored"),
        (status = 400, description = "Validation failed"),
    ),
)]
pub async fn create_submission(
    State(state): State<AppState>,
    Json(payload): Json<SubmitPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    if !payload.consent {
        let mut errors = ValidationErrors::new();
        errors.add("consent", ValidationError::new("consent_required"));
        return Err(Error::Validation(errors));
    }

    let submission = state.submission_service.create(payload).await?;
    tracing::info!(id = %submission.id, "new submission stored");

    // The response must not wait on the notification email; failures are
    // logged and dropped.
    let mailer = state.mailer_service.clone();
    let snapshot = submission.clone();
    tokio::spawn(async move {
        if let Err(err) = mailer.send_new_submission(&snapshot).await {
            tracing::warn!(error = ?err, id = %snapshot.id, "notification email failed");
        }
    });

    Ok(Json(json!({ "ok": true, "id": submission.id })))
}
