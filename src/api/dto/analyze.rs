//! DTOs for the analysis and export endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::{AnalysisRequest, ResolveMode};
use crate::domain::entities::{AnalysisReport, DomainCount, QueryResult, ReportSummary};
use crate::error::AppError;

/// Request body shared by `/api/analyze` and `/api/export/{table}`.
///
/// ```json
/// {
///   "queries": "best running shoes\ntrail shoes",
///   "citations": "best running shoes :: https://a.com/x, https://b.com/y",
///   "batchCsv": null,
///   "mode": "manual",
///   "baseline": 10
/// }
/// ```
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    /// One query per line. Optional when citation labels name the queries.
    #[serde(default)]
    pub queries: String,

    /// Pasted citation text.
    #[serde(default)]
    pub citations: String,

    /// Batch table with `query`, `referenceUrls`, `candidateUrls` columns.
    pub batch_csv: Option<String>,

    #[serde(default)]
    pub mode: ResolveMode,

    /// Shared-rate divisor; the server default applies when absent.
    #[validate(range(min = 1, max = 100, message = "Baseline must be between 1 and 100"))]
    pub baseline: Option<usize>,
}

impl AnalyzeRequest {
    /// Converts the body into an [`AnalysisRequest`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the batch table is malformed.
    pub fn into_analysis_request(
        self,
        default_baseline: usize,
    ) -> Result<AnalysisRequest, AppError> {
        let request = AnalysisRequest::from_inputs(
            &self.queries,
            &self.citations,
            self.batch_csv.as_deref(),
        )?;

        Ok(request
            .with_mode(self.mode)
            .with_baseline(self.baseline.unwrap_or(default_baseline)))
    }
}

/// Result of one analysis run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub summary: ReportSummary,
    pub results: Vec<QueryResult>,
    pub domains: Vec<DomainCount>,
    pub warnings: Vec<String>,
}

impl From<AnalysisReport> for AnalyzeResponse {
    fn from(report: AnalysisReport) -> Self {
        Self {
            summary: report.summary,
            results: report.results,
            domains: report.domains.domains,
            warnings: report.warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_defaults() {
        let request: AnalyzeRequest = serde_json::from_value(json!({ "citations": "q :: a.com" })).unwrap();

        assert_eq!(request.mode, ResolveMode::Manual);
        assert!(request.queries.is_empty());
        assert!(request.baseline.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_baseline_range() {
        let request = AnalyzeRequest {
            baseline: Some(0),
            ..Default::default()
        };
        assert!(request.validate().is_err());

        let request = AnalyzeRequest {
            baseline: Some(100),
            ..Default::default()
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_auto_fetch_mode_name() {
        let request: AnalyzeRequest =
            serde_json::from_value(json!({ "queries": "q", "mode": "autoFetch" })).unwrap();
        assert_eq!(request.mode, ResolveMode::AutoFetch);
    }

    #[test]
    fn test_default_baseline_applies() {
        let request = AnalyzeRequest {
            queries: "q".to_string(),
            ..Default::default()
        };

        let analysis = request.into_analysis_request(7).unwrap();
        assert_eq!(analysis.baseline, 7);
    }
}
