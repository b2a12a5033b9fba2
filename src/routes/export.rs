use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::Utc;

use crate::dto::admin_dto::{ExportFormat, ExportQuery};
use crate::error::Result;
use crate::services::export_service::ExportService;
use crate::services::submission_service::EXPORT_MAX_ROWS;
use crate::AppState;

/// Serves the full filtered set as a downloadable file, same filter
/// parameters as the list endpoint.
pub async fn export_submissions(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> Result<Response> {
    let (rows, _total) = state
        .submission_service
        .list(&query.filter(), query.order, EXPORT_MAX_ROWS, 0)
        .await?;
    let date = Utc::now().format("%Y-%m-%d");

    let response = match query.format {
        ExportFormat::Csv => {
            let body = ExportService::to_csv(&rows);
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"basvurular_{}.csv\"", date),
                    ),
                ],
                body,
            )
                .into_response()
        }
        ExportFormat::Xlsx => {
            let body = ExportService::to_xlsx(&rows)?;
            (
                StatusCode::OK,
                [
                    (
                        header::CONTENT_TYPE,
                        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
                            .to_string(),
                    ),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"basvurular_{}.xlsx\"", date),
                    ),
                ],
                body,
            )
                .into_response()
        }
    };
    Ok(response)
}
