use std::sync::Arc;

use crate::application::services::AnalysisService;
use crate::domain::providers::SearchProvider;

/// Shared state injected into every handler.
///
/// Holds no per-run data; each request builds and drops its own entities.
#[derive(Clone)]
pub struct AppState {
    pub analysis_service: Arc<AnalysisService<dyn SearchProvider>>,
    /// Shared-rate divisor used when a request does not set one.
    pub default_baseline: usize,
}

impl AppState {
    pub fn new(
        analysis_service: Arc<AnalysisService<dyn SearchProvider>>,
        default_baseline: usize,
    ) -> Self {
        Self {
            analysis_service,
            default_baseline,
        }
    }
}
