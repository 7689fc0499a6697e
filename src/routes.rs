//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`               - Health check with search provider status
//! - `POST /api/analyze`          - Run one analysis batch, JSON result
//! - `POST /api/export/{table}`   - Run one batch, CSV or text download
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Body limit** - Requests above `MAX_REQUEST_BYTES` get 413
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use tower::Layer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `max_request_bytes` - upper bound on request body size
pub fn app_router(state: AppState, max_request_bytes: usize) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api::routes::api_routes())
        .with_state(state)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_request_bytes))
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
