//! Handler for health check endpoint.

use axum::{Json, extract::State};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// The service has no backing stores, so it is healthy whenever it answers.
/// The search provider check reports whether auto-fetch runs are possible;
/// a missing key is reported as `disabled`, not as a failure.
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "search_provider": {
///       "status": "ok",
///       "message": "serpapi configured"
///     }
///   }
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            search_provider: check_search_provider(&state),
        },
    })
}

fn check_search_provider(state: &AppState) -> CheckStatus {
    let service = &state.analysis_service;

    if service.is_auto_fetch_available() {
        CheckStatus {
            status: "ok".to_string(),
            message: Some(format!("{} configured", service.provider_name())),
        }
    } else {
        CheckStatus {
            status: "disabled".to_string(),
            message: Some("SERPAPI_KEY not set; only manual mode is available".to_string()),
        }
    }
}
