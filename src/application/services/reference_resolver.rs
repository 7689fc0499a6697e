//! Reference list resolution for a single query.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::entities::{ParsedMapping, Query};
use crate::domain::providers::{ProviderError, SearchProvider, search_provider::TOP_RESULTS};

/// Where reference lists come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResolveMode {
    /// From reference-tagged entries in the pasted text or the batch table.
    #[default]
    Manual,
    /// From the configured search provider.
    AutoFetch,
}

/// Resolves a query's reference list according to a [`ResolveMode`].
pub struct ReferenceResolver<P: SearchProvider + ?Sized> {
    provider: Arc<P>,
}

impl<P: SearchProvider + ?Sized> ReferenceResolver<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Returns the reference URLs for `query`.
    ///
    /// In [`ResolveMode::Manual`] this is the mapping's reference entry, or an
    /// empty list if there is none. In [`ResolveMode::AutoFetch`] the provider
    /// is asked and at most [`TOP_RESULTS`] URLs are kept.
    ///
    /// # Errors
    ///
    /// Returns the provider's [`ProviderError`] unchanged in auto-fetch mode.
    pub async fn resolve(
        &self,
        query: &Query,
        mode: ResolveMode,
        mapping: &ParsedMapping,
    ) -> Result<Vec<String>, ProviderError> {
        match mode {
            ResolveMode::Manual => Ok(mapping.references(query).to_vec()),
            ResolveMode::AutoFetch => {
                let mut urls = self.provider.fetch_top_results(query.as_str()).await?;
                urls.truncate(TOP_RESULTS);
                Ok(urls)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{EntryKey, EntryKind};
    use crate::domain::providers::MockSearchProvider;
    use std::time::Duration;

    fn q(s: &str) -> Query {
        Query::parse(s).unwrap()
    }

    fn mapping_with_reference() -> ParsedMapping {
        let mut mapping = ParsedMapping::new();
        mapping.insert(
            EntryKey::new(EntryKind::Reference, q("shoes")),
            vec!["https://a.com".to_string()],
        );
        mapping
    }

    #[tokio::test]
    async fn test_manual_reads_mapping_without_provider() {
        let mut mock = MockSearchProvider::new();
        mock.expect_fetch_top_results().never();

        let resolver = ReferenceResolver::new(Arc::new(mock));
        let mapping = mapping_with_reference();

        let urls = resolver
            .resolve(&q("shoes"), ResolveMode::Manual, &mapping)
            .await
            .unwrap();
        assert_eq!(urls, ["https://a.com"]);

        let missing = resolver
            .resolve(&q("boots"), ResolveMode::Manual, &mapping)
            .await
            .unwrap();
        assert!(missing.is_empty());
    }

    #[tokio::test]
    async fn test_auto_fetch_caps_results() {
        let mut mock = MockSearchProvider::new();
        mock.expect_fetch_top_results()
            .withf(|query| query == "shoes")
            .times(1)
            .returning(|_| Ok((0..12).map(|i| format!("https://s{i}.com")).collect()));

        let resolver = ReferenceResolver::new(Arc::new(mock));

        let urls = resolver
            .resolve(&q("shoes"), ResolveMode::AutoFetch, &ParsedMapping::new())
            .await
            .unwrap();
        assert_eq!(urls.len(), TOP_RESULTS);
    }

    #[tokio::test]
    async fn test_auto_fetch_ignores_manual_references() {
        let mut mock = MockSearchProvider::new();
        mock.expect_fetch_top_results()
            .times(1)
            .returning(|_| Ok(vec!["https://fetched.com".to_string()]));

        let resolver = ReferenceResolver::new(Arc::new(mock));

        let urls = resolver
            .resolve(&q("shoes"), ResolveMode::AutoFetch, &mapping_with_reference())
            .await
            .unwrap();
        assert_eq!(urls, ["https://fetched.com"]);
    }

    #[tokio::test]
    async fn test_auto_fetch_propagates_error() {
        let mut mock = MockSearchProvider::new();
        mock.expect_fetch_top_results()
            .times(1)
            .returning(|_| Err(ProviderError::Timeout(Duration::from_secs(20))));

        let resolver = ReferenceResolver::new(Arc::new(mock));

        let err = resolver
            .resolve(&q("shoes"), ResolveMode::AutoFetch, &ParsedMapping::new())
            .await
            .unwrap_err();
        assert_eq!(err, ProviderError::Timeout(Duration::from_secs(20)));
    }

    #[test]
    fn test_mode_serde_names() {
        assert_eq!(
            serde_json::to_value(ResolveMode::AutoFetch).unwrap(),
            serde_json::json!("autoFetch")
        );
        let mode: ResolveMode = serde_json::from_str("\"manual\"").unwrap();
        assert_eq!(mode, ResolveMode::Manual);
    }
}
