//! No-op search provider for disabled auto-fetch.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::providers::{ProviderError, SearchProvider};

/// A provider that never returns results.
///
/// Used when `SERPAPI_KEY` is not set. It reports itself as not configured,
/// so auto-fetch runs are rejected before any query is processed.
pub struct NullProvider;

impl NullProvider {
    pub fn new() -> Self {
        debug!("Using NullProvider (auto-fetch disabled)");
        Self
    }
}

impl Default for NullProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchProvider for NullProvider {
    async fn fetch_top_results(&self, _query: &str) -> Result<Vec<String>, ProviderError> {
        Ok(Vec::new())
    }

    fn name(&self) -> &'static str {
        "none"
    }

    fn is_configured(&self) -> bool {
        false
    }
}
