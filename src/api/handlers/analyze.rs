//! Handler for the analysis endpoint.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::analyze::{AnalyzeRequest, AnalyzeResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Runs one analysis batch and returns the tables as JSON.
///
/// # Endpoint
///
/// `POST /api/analyze`
///
/// # Request Body
///
/// See [`AnalyzeRequest`].
///
/// # Response
///
/// ```json
/// {
///   "summary": { "queryCount": 1, "averageSharedRate": 0.1, "averageNovelRate": 0.5, ... },
///   "results": [
///     {
///       "query": "best running shoes",
///       "referenceCount": 10,
///       "candidateCount": 2,
///       "sharedCount": 1,
///       "novelCount": 1,
///       "sharedRate": 0.1,
///       "novelRate": 0.5
///     }
///   ],
///   "domains": [{ "domain": "a.com", "count": 1, "repeatRate": 1.0 }],
///   "warnings": []
/// }
/// ```
///
/// A query whose reference fetch failed still gets a row, with an added
/// `referenceError` field.
///
/// # Errors
///
/// - 400 `validation_error` - bad baseline or malformed batch table
/// - 400 `empty_input` - no queries
/// - 400 `missing_credential` - auto-fetch without a provider key
pub async fn analyze_handler(
    State(state): State<AppState>,
    Json(payload): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    payload.validate()?;

    let request = payload.into_analysis_request(state.default_baseline)?;
    let report = state.analysis_service.analyze(request).await?;

    Ok(Json(report.into()))
}
