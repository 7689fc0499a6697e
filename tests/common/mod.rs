#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    Router,
    routing::{get, post},
};
use axum_test::TestServer;
use std::collections::HashMap;
use std::sync::Arc;

use citation_overlap::api::handlers::{analyze_handler, export_handler, health_handler};
use citation_overlap::application::services::AnalysisService;
use citation_overlap::domain::providers::{ProviderError, SearchProvider};
use citation_overlap::infrastructure::search::NullProvider;
use citation_overlap::state::AppState;

/// Provider serving fixed results per query.
pub struct StaticProvider {
    results: HashMap<String, Vec<String>>,
}

impl StaticProvider {
    pub fn new(entries: &[(&str, &[&str])]) -> Self {
        let results = entries
            .iter()
            .map(|(query, urls)| {
                (
                    query.to_string(),
                    urls.iter().map(|u| u.to_string()).collect(),
                )
            })
            .collect();
        Self { results }
    }
}

#[async_trait]
impl SearchProvider for StaticProvider {
    async fn fetch_top_results(&self, query: &str) -> Result<Vec<String>, ProviderError> {
        Ok(self.results.get(query).cloned().unwrap_or_default())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

/// Provider failing every query with the same error.
pub struct FailingProvider {
    pub error: ProviderError,
}

#[async_trait]
impl SearchProvider for FailingProvider {
    async fn fetch_top_results(&self, _query: &str) -> Result<Vec<String>, ProviderError> {
        Err(self.error.clone())
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

pub fn create_test_state(provider: Arc<dyn SearchProvider>) -> AppState {
    let service = Arc::new(AnalysisService::new(provider));
    AppState::new(service, 10)
}

/// State without a search provider (manual mode only).
pub fn manual_state() -> AppState {
    create_test_state(Arc::new(NullProvider::new()))
}

pub fn test_server(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/api/analyze", post(analyze_handler))
        .route("/api/export/{table}", post(export_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}
