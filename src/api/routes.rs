//! API route configuration.

use crate::api::handlers::{analyze_handler, export_handler};
use crate::state::AppState;
use axum::{Router, routing::post};

/// All API routes.
///
/// # Endpoints
///
/// - `POST /analyze`          - Run a batch, JSON tables
/// - `POST /export/{table}`   - Run a batch, one table as a download
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/analyze", post(analyze_handler))
        .route("/export/{table}", post(export_handler))
}
