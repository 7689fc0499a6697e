//! Output of one analysis run.

use serde::Serialize;

use super::aggregate::DomainAggregate;
use super::metrics::QueryResult;
use super::query::Query;

/// One bar of the shared-rate histogram.
///
/// Bins cover `[lower, upper)`; the last bin also includes `1.0`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Batch-level figures.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub query_count: usize,
    /// Divisor the shared rates were computed against.
    pub baseline: usize,
    pub average_shared_rate: f64,
    pub average_novel_rate: f64,
    /// Queries whose reference list could not be fetched.
    pub failed_fetches: usize,
    pub total_citations: usize,
    pub unique_domains: usize,
    pub shared_rate_histogram: Vec<HistogramBin>,
}

/// Everything one run produces.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub summary: ReportSummary,
    /// One row per query, in query order.
    pub results: Vec<QueryResult>,
    pub domains: DomainAggregate,
    pub warnings: Vec<String>,
    /// Candidate lists as analyzed, for the per-citation export.
    #[serde(skip)]
    pub candidates: Vec<(Query, Vec<String>)>,
}

impl AnalysisReport {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
