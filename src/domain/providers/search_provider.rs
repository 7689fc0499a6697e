//! Provider trait for fetching reference results.

use async_trait::async_trait;
use std::time::Duration;

/// Maximum number of reference results requested and kept per query.
pub const TOP_RESULTS: usize = 10;

/// Errors returned by a [`SearchProvider`].
///
/// Every variant is recoverable per query: the affected query runs with an
/// empty reference list and the error is reported alongside its row.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("Search provider request failed: {0}")]
    Http(String),

    #[error("Search provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Search provider timed out after {0:?}")]
    Timeout(Duration),

    #[error("Search provider returned a malformed payload: {0}")]
    MalformedPayload(String),
}

/// Source of ranked organic search results.
///
/// # Implementations
///
/// - [`crate::infrastructure::search::SerpApiProvider`] - SerpAPI Google search
/// - [`crate::infrastructure::search::NullProvider`] - Always empty, for disabled fetching
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Fetches up to [`TOP_RESULTS`] result URLs for `query`, in rank order.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Status`] on a non-success HTTP status.
    /// Returns [`ProviderError::Timeout`] when the request exceeds its deadline.
    /// Returns [`ProviderError::MalformedPayload`] if the body cannot be read.
    /// Returns [`ProviderError::Http`] on any other transport failure.
    async fn fetch_top_results(&self, query: &str) -> Result<Vec<String>, ProviderError>;

    /// Short provider name for logs and health output.
    fn name(&self) -> &'static str;

    /// Whether the provider can actually fetch results.
    ///
    /// `false` for placeholders such as [`crate::infrastructure::search::NullProvider`].
    fn is_configured(&self) -> bool {
        true
    }
}
