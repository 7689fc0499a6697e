//! HTTP server initialization and runtime setup.
//!
//! Builds the search provider, the analysis service and the Axum server.

use crate::application::services::AnalysisService;
use crate::config::Config;
use crate::domain::providers::SearchProvider;
use crate::infrastructure::search::{NullProvider, SerpApiProvider};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Builds the search provider described by `config`.
///
/// Without `SERPAPI_KEY` a [`NullProvider`] is returned and auto-fetch runs
/// are rejected with `missing_credential`.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built.
pub fn build_provider(config: &Config) -> Result<Arc<dyn SearchProvider>> {
    match &config.serpapi_key {
        Some(key) => {
            let provider = SerpApiProvider::new(
                config.serpapi_endpoint.clone(),
                key.clone(),
                config.provider_timeout(),
            )
            .context("Failed to build search provider client")?;
            tracing::info!("Search provider enabled (SerpAPI)");
            Ok(Arc::new(provider))
        }
        None => {
            tracing::info!("Search provider disabled (NullProvider)");
            Ok(Arc::new(NullProvider::new()))
        }
    }
}

/// Builds the analysis service described by `config`.
///
/// # Errors
///
/// See [`build_provider`].
pub fn build_analysis_service(config: &Config) -> Result<AnalysisService<dyn SearchProvider>> {
    let provider = build_provider(config)?;
    Ok(AnalysisService::new(provider).with_fetch_concurrency(config.fetch_concurrency))
}

/// Runs the HTTP server with the given configuration.
///
/// Shuts down gracefully on Ctrl+C, letting in-flight runs finish.
///
/// # Errors
///
/// Returns an error if:
/// - The provider client cannot be built
/// - The listen address is invalid or the bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let service = Arc::new(build_analysis_service(&config)?);
    let state = AppState::new(service, config.reference_baseline);

    let app = app_router(state, config.max_request_bytes);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
