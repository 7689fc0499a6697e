//! Per-query overlap metrics.

use serde::Serialize;

use super::query::Query;

/// Overlap between one query's reference list and candidate list.
///
/// # Fields
///
/// - `shared_count` (I): unique URLs present on both sides
/// - `novel_count` (N): candidate citations whose domain the reference list lacks
/// - `shared_rate` (SVR): `I / baseline`, in `[0, 1]`
/// - `novel_rate` (UAVR): `N / candidate_count`, in `[0, 1]`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryMetrics {
    pub query: Query,
    pub reference_count: usize,
    pub candidate_count: usize,
    pub shared_count: usize,
    pub novel_count: usize,
    pub shared_rate: f64,
    pub novel_rate: f64,
}

impl QueryMetrics {
    /// Metrics for a query with nothing on either side.
    pub fn empty(query: Query) -> Self {
        Self {
            query,
            reference_count: 0,
            candidate_count: 0,
            shared_count: 0,
            novel_count: 0,
            shared_rate: 0.0,
            novel_rate: 0.0,
        }
    }
}

/// One row of the results table.
///
/// `reference_error` is set when the reference list is empty because it
/// could not be fetched, which keeps a provider failure apart from a query
/// that legitimately had no reference results.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    #[serde(flatten)]
    pub metrics: QueryMetrics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_error: Option<String>,
}

impl QueryResult {
    pub fn ok(metrics: QueryMetrics) -> Self {
        Self {
            metrics,
            reference_error: None,
        }
    }

    pub fn with_reference_error(metrics: QueryMetrics, error: impl Into<String>) -> Self {
        Self {
            metrics,
            reference_error: Some(error.into()),
        }
    }

    pub fn has_reference_error(&self) -> bool {
        self.reference_error.is_some()
    }
}
