//! Handler for table downloads.

use axum::{
    Json,
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use validator::Validate;

use crate::api::dto::analyze::AnalyzeRequest;
use crate::application::services::ExportTable;
use crate::error::AppError;
use crate::state::AppState;

/// Runs one analysis batch and returns a single table as a file.
///
/// # Endpoint
///
/// `POST /api/export/{table}` where `table` is one of `results`, `domains`,
/// `citations` or `report`.
///
/// CSV tables are served as `text/csv`, the narrative as `text/plain`, both
/// with a `Content-Disposition: attachment` header.
///
/// # Errors
///
/// Same as [`crate::api::handlers::analyze_handler`]. An unknown table name
/// is rejected with 400 before the body is read.
pub async fn export_handler(
    State(state): State<AppState>,
    Path(table): Path<ExportTable>,
    Json(payload): Json<AnalyzeRequest>,
) -> Result<Response, AppError> {
    payload.validate()?;

    let request = payload.into_analysis_request(state.default_baseline)?;
    let report = state.analysis_service.analyze(request).await?;

    let body = table.render(&report);
    let disposition = format!("attachment; filename=\"{}\"", table.file_name());

    Ok((
        [
            (header::CONTENT_TYPE, table.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}
