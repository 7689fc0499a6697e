//! Summaries and exports of an [`AnalysisReport`].
//!
//! Rates are written with three decimals in every export. CSV output uses
//! `\n` line endings and quotes fields only when needed.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use std::fmt::Write;

use crate::domain::entities::{
    AnalysisReport, DomainAggregate, HistogramBin, QueryResult, ReportSummary,
};
use crate::utils::csv::write_record;
use crate::utils::domain_normalizer::normalize;

/// Number of equal-width bins in the shared-rate histogram.
pub const HISTOGRAM_BINS: usize = 10;

/// Domains listed in the narrative report.
const NARRATIVE_TOP_DOMAINS: usize = 10;

pub const RESULTS_HEADER: [&str; 7] = [
    "query",
    "referenceCount",
    "candidateCount",
    "sharedCount",
    "novelCount",
    "sharedRate",
    "novelRate",
];

pub const DOMAINS_HEADER: [&str; 3] = ["domain", "count", "repeatRate"];

pub const CITATIONS_HEADER: [&str; 3] = ["query", "candidateUrl", "candidateDomain"];

/// Downloadable views of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportTable {
    /// Per-query metrics table.
    Results,
    /// Domain frequency table.
    Domains,
    /// One row per candidate citation.
    Citations,
    /// Plain-text narrative.
    Report,
}

impl ExportTable {
    pub const ALL: [ExportTable; 4] = [
        ExportTable::Results,
        ExportTable::Domains,
        ExportTable::Citations,
        ExportTable::Report,
    ];

    pub fn content_type(self) -> &'static str {
        match self {
            ExportTable::Report => "text/plain; charset=utf-8",
            _ => "text/csv; charset=utf-8",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            ExportTable::Results => "visibility_report.csv",
            ExportTable::Domains => "domain_repeat_counts.csv",
            ExportTable::Citations => "candidate_citations.csv",
            ExportTable::Report => "visibility_report.txt",
        }
    }

    pub fn render(self, report: &AnalysisReport) -> String {
        match self {
            ExportTable::Results => results_csv(&report.results),
            ExportTable::Domains => domains_csv(&report.domains),
            ExportTable::Citations => citations_csv(report),
            ExportTable::Report => narrative(report),
        }
    }
}

/// Builds the batch summary from finished rows and the domain table.
pub fn summarize(
    results: &[QueryResult],
    domains: &DomainAggregate,
    baseline: usize,
) -> ReportSummary {
    let query_count = results.len();
    let mean = |rate: fn(&QueryResult) -> f64| {
        if query_count == 0 {
            0.0
        } else {
            results.iter().map(rate).sum::<f64>() / query_count as f64
        }
    };

    ReportSummary {
        query_count,
        baseline,
        average_shared_rate: mean(|r| r.metrics.shared_rate),
        average_novel_rate: mean(|r| r.metrics.novel_rate),
        failed_fetches: results.iter().filter(|r| r.has_reference_error()).count(),
        total_citations: domains.total_citations(),
        unique_domains: domains.domains.len(),
        shared_rate_histogram: shared_rate_histogram(results),
    }
}

/// Counts queries per shared-rate bin over `[0, 1]`.
pub fn shared_rate_histogram(results: &[QueryResult]) -> Vec<HistogramBin> {
    let width = 1.0 / HISTOGRAM_BINS as f64;
    let mut bins: Vec<HistogramBin> = (0..HISTOGRAM_BINS)
        .map(|i| HistogramBin {
            lower: i as f64 * width,
            upper: (i + 1) as f64 * width,
            count: 0,
        })
        .collect();

    for result in results {
        // Rates such as 0.3 land just under their bin edge after scaling.
        let scaled = result.metrics.shared_rate.clamp(0.0, 1.0) * HISTOGRAM_BINS as f64 + 1e-9;
        let index = (scaled.floor() as usize).min(HISTOGRAM_BINS - 1);
        bins[index].count += 1;
    }

    bins
}

pub fn results_csv(results: &[QueryResult]) -> String {
    let mut out = String::new();
    push_record(&mut out, &RESULTS_HEADER);
    for result in results {
        let m = &result.metrics;
        push_record(
            &mut out,
            &[
                m.query.to_string(),
                m.reference_count.to_string(),
                m.candidate_count.to_string(),
                m.shared_count.to_string(),
                m.novel_count.to_string(),
                format!("{:.3}", m.shared_rate),
                format!("{:.3}", m.novel_rate),
            ],
        );
    }
    out
}

pub fn domains_csv(domains: &DomainAggregate) -> String {
    let mut out = String::new();
    push_record(&mut out, &DOMAINS_HEADER);
    for entry in &domains.domains {
        push_record(
            &mut out,
            &[
                entry.domain.clone(),
                entry.count.to_string(),
                format!("{:.3}", entry.repeat_rate),
            ],
        );
    }
    out
}

/// One row per candidate citation, with its normalized domain.
pub fn citations_csv(report: &AnalysisReport) -> String {
    let mut out = String::new();
    push_record(&mut out, &CITATIONS_HEADER);
    for (query, urls) in &report.candidates {
        for url in urls.iter().map(|u| u.trim()).filter(|u| !u.is_empty()) {
            push_record(&mut out, &[query.as_str(), url, normalize(url).as_str()]);
        }
    }
    out
}

fn push_record<S: AsRef<str>>(out: &mut String, fields: &[S]) {
    out.push_str(&write_record(fields));
    out.push('\n');
}

pub fn narrative(report: &AnalysisReport) -> String {
    narrative_at(report, Utc::now())
}

/// Plain-text report stamped with `generated_at`.
pub fn narrative_at(report: &AnalysisReport, generated_at: DateTime<Utc>) -> String {
    let summary = &report.summary;
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "Citation overlap report");
    let _ = writeln!(
        out,
        "Generated: {}",
        generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Queries analyzed: {}", summary.query_count);
    let _ = writeln!(
        out,
        "Average shared visibility rate (SVR): {:.3}",
        summary.average_shared_rate
    );
    let _ = writeln!(
        out,
        "Average unique assistant visibility rate (UAVR): {:.3}",
        summary.average_novel_rate
    );
    let _ = writeln!(out, "Total citations: {}", summary.total_citations);
    let _ = writeln!(out, "Distinct cited domains: {}", summary.unique_domains);
    if summary.failed_fetches > 0 {
        let _ = writeln!(out, "Failed reference fetches: {}", summary.failed_fetches);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Most cited domains:");
    if report.domains.is_empty() {
        let _ = writeln!(out, "  (no citation domains detected)");
    }
    for (rank, entry) in report.domains.top(NARRATIVE_TOP_DOMAINS).iter().enumerate() {
        let _ = writeln!(
            out,
            "  {}. {} - {} citations, repeat rate {:.3}",
            rank + 1,
            entry.domain,
            entry.count,
            entry.repeat_rate
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Per-query notes:");
    for result in &report.results {
        let m = &result.metrics;
        let _ = writeln!(
            out,
            "  - {}: SVR {:.3}, UAVR {:.3}. {}",
            m.query,
            m.shared_rate,
            m.novel_rate,
            recommendation(result)
        );
    }

    if report.has_warnings() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Warnings:");
        for warning in &report.warnings {
            let _ = writeln!(out, "  - {warning}");
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Definitions:");
    let _ = writeln!(
        out,
        "  SVR = shared URLs / {}; how much of the search top results the assistant also cites.",
        summary.baseline
    );
    let _ = writeln!(
        out,
        "  UAVR = citations on domains absent from the search top results / all citations."
    );
    let _ = writeln!(
        out,
        "  Repeat rate = citations of a domain / number of queries."
    );

    out
}

/// One-line reading of a query's metrics.
pub fn recommendation(result: &QueryResult) -> &'static str {
    let m = &result.metrics;

    if result.has_reference_error() {
        "Reference results unavailable; overlap was not measured."
    } else if m.candidate_count == 0 {
        "No citations supplied; nothing to compare."
    } else if m.reference_count == 0 {
        "No reference results supplied; the shared rate is not meaningful."
    } else if m.shared_rate >= 0.5 {
        "Citations track the search top results closely; search ranking carries over."
    } else if m.novel_rate >= 0.5 {
        "Most citations come from domains outside the search top results; review those sources."
    } else {
        "Mixed overlap between search results and citations."
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregator::aggregate;
    use crate::domain::entities::{Query, QueryMetrics};
    use crate::domain::overlap::compute_metrics;
    use chrono::TimeZone;

    fn q(s: &str) -> Query {
        Query::parse(s).unwrap()
    }

    fn urls(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn with_shared_rate(rate: f64) -> QueryResult {
        let mut metrics = QueryMetrics::empty(q("q"));
        metrics.shared_rate = rate;
        QueryResult::ok(metrics)
    }

    fn sample_report() -> AnalysisReport {
        let reference = urls(&["https://a.com/1", "https://b.com/2"]);
        let candidate = urls(&["https://a.com/1", "https://c.com/x", "https://www.c.com/y"]);

        let results = vec![
            QueryResult::ok(compute_metrics(q("best shoes"), &reference, &candidate)),
            QueryResult::with_reference_error(
                compute_metrics(q("boots"), &[], &urls(&["https://d.co.uk/a"])),
                "Search provider timed out after 20s",
            ),
        ];
        let candidates = vec![
            (q("best shoes"), candidate),
            (q("boots"), urls(&["https://d.co.uk/a"])),
        ];
        let domains = aggregate(&candidates);
        let summary = summarize(&results, &domains, 10);

        AnalysisReport {
            summary,
            results,
            domains,
            warnings: vec!["Reference results unavailable for 'boots'".to_string()],
            candidates,
        }
    }

    #[test]
    fn test_summary_averages() {
        let report = sample_report();
        let summary = &report.summary;

        assert_eq!(summary.query_count, 2);
        assert!((summary.average_shared_rate - 0.05).abs() < 1e-9);
        // best shoes: 2 of 3 novel; boots: 1 of 1 novel
        assert!((summary.average_novel_rate - (2.0 / 3.0 + 1.0) / 2.0).abs() < 1e-9);
        assert_eq!(summary.failed_fetches, 1);
        assert_eq!(summary.total_citations, 4);
        assert_eq!(summary.unique_domains, 3);
    }

    #[test]
    fn test_summary_of_empty_batch() {
        let summary = summarize(&[], &DomainAggregate::default(), 10);

        assert_eq!(summary.query_count, 0);
        assert_eq!(summary.average_shared_rate, 0.0);
        assert_eq!(summary.shared_rate_histogram.len(), HISTOGRAM_BINS);
    }

    #[test]
    fn test_histogram_bins() {
        let results: Vec<QueryResult> = [0.0, 0.1, 0.3, 0.3, 0.95, 1.0]
            .into_iter()
            .map(with_shared_rate)
            .collect();

        let bins = shared_rate_histogram(&results);
        let counts: Vec<usize> = bins.iter().map(|b| b.count).collect();

        assert_eq!(counts, [1, 1, 0, 2, 0, 0, 0, 0, 0, 2]);
        assert_eq!(counts.iter().sum::<usize>(), results.len());
        assert!((bins[3].lower - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_results_csv() {
        let report = sample_report();
        let csv = results_csv(&report.results);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "query,referenceCount,candidateCount,sharedCount,novelCount,sharedRate,novelRate"
        );
        assert_eq!(lines[1], "best shoes,2,3,1,2,0.100,0.667");
        assert_eq!(lines[2], "boots,0,1,0,1,0.000,1.000");
    }

    #[test]
    fn test_domains_csv() {
        let report = sample_report();
        let csv = domains_csv(&report.domains);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "domain,count,repeatRate");
        assert_eq!(lines[1], "c.com,2,1.000");
        assert_eq!(lines[2], "a.com,1,0.500");
        assert_eq!(lines[3], "d.co.uk,1,0.500");
    }

    #[test]
    fn test_citations_csv() {
        let report = sample_report();
        let csv = citations_csv(&report);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "query,candidateUrl,candidateDomain");
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[3], "best shoes,https://www.c.com/y,c.com");
        assert_eq!(lines[4], "boots,https://d.co.uk/a,d.co.uk");
    }

    #[test]
    fn test_csv_quotes_queries_with_commas() {
        let results = vec![QueryResult::ok(QueryMetrics::empty(q("shoes, cheap")))];
        let csv = results_csv(&results);

        assert!(csv.lines().nth(1).unwrap().starts_with("\"shoes, cheap\","));
    }

    #[test]
    fn test_narrative_contains_numbers() {
        let report = sample_report();
        let at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let text = narrative_at(&report, at);

        assert!(text.contains("Generated: 2026-01-02T03:04:05Z"));
        assert!(text.contains("Queries analyzed: 2"));
        assert!(text.contains("(SVR): 0.050"));
        assert!(text.contains("1. c.com - 2 citations, repeat rate 1.000"));
        assert!(text.contains("best shoes: SVR 0.100, UAVR 0.667."));
        assert!(text.contains("Failed reference fetches: 1"));
        assert!(text.contains("Reference results unavailable for 'boots'"));
        assert!(text.contains("SVR = shared URLs / 10;"));
    }

    #[test]
    fn test_narrative_uses_configured_baseline() {
        let mut report = sample_report();
        report.summary = summarize(&report.results, &report.domains, 4);

        let text = narrative(&report);

        assert!(text.contains("SVR = shared URLs / 4;"));
        assert!(!text.contains("/ 10"));
    }

    #[test]
    fn test_recommendations() {
        let report = sample_report();

        assert!(recommendation(&report.results[1]).starts_with("Reference results unavailable"));
        assert!(recommendation(&report.results[0]).starts_with("Most citations"));
        assert!(recommendation(&with_shared_rate(0.0)).starts_with("No citations"));
    }

    #[test]
    fn test_export_table_metadata() {
        assert_eq!(ExportTable::Results.content_type(), "text/csv; charset=utf-8");
        assert_eq!(ExportTable::Report.content_type(), "text/plain; charset=utf-8");
        assert_eq!(ExportTable::Results.file_name(), "visibility_report.csv");

        let table: ExportTable = serde_json::from_str("\"citations\"").unwrap();
        assert_eq!(table, ExportTable::Citations);
    }
}
