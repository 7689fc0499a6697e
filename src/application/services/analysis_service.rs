//! Batch analysis: one run from parsed inputs to a finished report.

use std::sync::Arc;

use futures::{StreamExt, stream};
use serde_json::json;
use tracing::{info, warn};

use super::reference_resolver::{ReferenceResolver, ResolveMode};
use super::report_service::summarize;
use crate::domain::aggregator::DomainCounter;
use crate::domain::entities::{
    AnalysisReport, EntryKind, ParsedMapping, Query, QueryResult, parse_query_list,
};
use crate::domain::overlap::{DEFAULT_BASELINE, compute_metrics_with_baseline};
use crate::domain::providers::{ProviderError, SearchProvider};
use crate::error::AppError;
use crate::input::{parse, parse_batch_table};

/// Inputs of one analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    /// Queries in output order, without repeats.
    pub queries: Vec<Query>,
    pub mapping: ParsedMapping,
    pub mode: ResolveMode,
    /// Divisor for the shared rate.
    pub baseline: usize,
}

impl AnalysisRequest {
    pub fn new(queries: Vec<Query>, mapping: ParsedMapping) -> Self {
        Self {
            queries,
            mapping,
            mode: ResolveMode::Manual,
            baseline: DEFAULT_BASELINE,
        }
    }

    /// Builds a request from raw user input.
    ///
    /// - `queries_text` - one query per line
    /// - `citations_text` - pasted citation text (see [`crate::input::text`])
    /// - `batch_csv` - optional batch table (see [`crate::input::batch`])
    ///
    /// Batch queries are appended after the listed ones. Pasted entries
    /// override batch entries with the same `(kind, query)`. When neither
    /// source lists any query, the labels found in the mapping are used.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the batch table cannot be read.
    pub fn from_inputs(
        queries_text: &str,
        citations_text: &str,
        batch_csv: Option<&str>,
    ) -> Result<Self, AppError> {
        let mut queries = parse_query_list(queries_text);
        let mut mapping = ParsedMapping::new();

        if let Some(csv) = batch_csv.filter(|csv| !csv.trim().is_empty()) {
            let table = parse_batch_table(csv)?;
            for query in table.queries {
                if !queries.contains(&query) {
                    queries.push(query);
                }
            }
            mapping.extend(table.mapping);
        }

        mapping.extend(parse(citations_text));

        if queries.is_empty() {
            queries = mapping.all_queries();
        }

        Ok(Self::new(queries, mapping))
    }

    pub fn with_mode(mut self, mode: ResolveMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_baseline(mut self, baseline: usize) -> Self {
        self.baseline = baseline;
        self
    }
}

/// Runs analysis batches against a search provider.
///
/// Each call to [`Self::analyze`] is independent; the service holds no
/// per-run state.
pub struct AnalysisService<P: SearchProvider + ?Sized> {
    resolver: ReferenceResolver<P>,
    fetch_concurrency: usize,
}

impl<P: SearchProvider + ?Sized> AnalysisService<P> {
    /// Creates a service that fetches references one query at a time.
    pub fn new(provider: Arc<P>) -> Self {
        Self {
            resolver: ReferenceResolver::new(provider),
            fetch_concurrency: 1,
        }
    }

    /// Allows up to `limit` provider requests in flight. Rows keep query order.
    pub fn with_fetch_concurrency(mut self, limit: usize) -> Self {
        self.fetch_concurrency = limit.max(1);
        self
    }

    pub fn provider_name(&self) -> &'static str {
        self.resolver.provider().name()
    }

    pub fn is_auto_fetch_available(&self) -> bool {
        self.resolver.provider().is_configured()
    }

    /// Runs one batch.
    ///
    /// Per-query provider failures do not abort the run: the query gets an
    /// empty reference list, its row carries `reference_error`, and a warning
    /// is added to the report.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::EmptyInput`] if there are no queries.
    /// Returns [`AppError::MissingCredential`] if auto-fetch is requested and
    /// the provider is not configured.
    pub async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisReport, AppError> {
        let AnalysisRequest {
            queries,
            mapping,
            mode,
            baseline,
        } = request;

        if queries.is_empty() {
            return Err(AppError::empty_input(
                "No queries supplied",
                json!({ "hint": "List queries one per line, or label citation lines with their query" }),
            ));
        }

        if mode == ResolveMode::AutoFetch && !self.is_auto_fetch_available() {
            return Err(AppError::missing_credential(
                "Auto-fetch mode requires a search provider key (SERPAPI_KEY)",
                json!({ "provider": self.provider_name() }),
            ));
        }

        info!(
            queries = queries.len(),
            mode = ?mode,
            baseline,
            "Starting analysis run"
        );

        let mut warnings = unmatched_label_warnings(&queries, &mapping);
        if mode == ResolveMode::Manual && mapping.queries(EntryKind::Reference).is_empty() {
            warnings.push(
                "No reference results were supplied; every shared rate is 0".to_string(),
            );
        }

        // Owned items keep the stream future Send for any caller lifetime.
        let mapping_ref = &mapping;
        let references: Vec<Result<Vec<String>, ProviderError>> =
            stream::iter(queries.iter().cloned())
                .map(|query| async move {
                    self.resolver.resolve(&query, mode, mapping_ref).await
                })
                .buffered(self.fetch_concurrency)
                .collect()
                .await;

        let mut results = Vec::with_capacity(queries.len());
        let mut candidates = Vec::with_capacity(queries.len());
        let mut counter = DomainCounter::new();

        for (query, reference) in queries.iter().zip(references) {
            let candidate = mapping.candidates(query);

            let result = match reference {
                Ok(reference) => QueryResult::ok(compute_metrics_with_baseline(
                    query.clone(),
                    &reference,
                    candidate,
                    baseline,
                )),
                Err(err) => {
                    warn!(
                        query = %query,
                        provider = self.provider_name(),
                        error = %err,
                        "Reference fetch failed, continuing with empty reference list"
                    );
                    warnings.push(format!("Reference results unavailable for '{query}': {err}"));
                    QueryResult::with_reference_error(
                        compute_metrics_with_baseline(query.clone(), &[], candidate, baseline),
                        err.to_string(),
                    )
                }
            };

            counter.add_query(candidate);
            candidates.push((query.clone(), candidate.to_vec()));
            results.push(result);
        }

        let domains = counter.finish();
        let summary = summarize(&results, &domains, baseline);

        info!(
            queries = summary.query_count,
            failed_fetches = summary.failed_fetches,
            domains = summary.unique_domains,
            avg_shared_rate = summary.average_shared_rate,
            avg_novel_rate = summary.average_novel_rate,
            "Analysis run finished"
        );

        Ok(AnalysisReport {
            summary,
            results,
            domains,
            warnings,
            candidates,
        })
    }
}

/// Warns about citation labels that match no query.
///
/// Labels are matched exactly, so a typo in a label silently drops its
/// citations from the run otherwise.
fn unmatched_label_warnings(queries: &[Query], mapping: &ParsedMapping) -> Vec<String> {
    mapping
        .iter()
        .filter(|(key, _)| !queries.contains(&key.query))
        .map(|(key, _)| format!("Citation label '{}' does not match any query", key.query))
        .collect()
}
