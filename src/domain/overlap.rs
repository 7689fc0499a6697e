//! Overlap engine: per-query shared and novel citation metrics.
//!
//! Sharing is measured on exact URLs, novelty on registrable domains. Two
//! citations on a domain that already ranks in the reference list are not
//! novel, even if their paths differ from every reference URL.

use std::collections::HashSet;

use crate::domain::entities::{Query, QueryMetrics};
use crate::utils::domain_normalizer::normalize;

/// Nominal size of the reference list ("top 10").
///
/// The shared rate divides by this constant rather than by the actual
/// reference length, so a short reference list under-counts proportionally.
pub const DEFAULT_BASELINE: usize = 10;

/// Computes metrics against [`DEFAULT_BASELINE`].
pub fn compute_metrics(query: Query, reference: &[String], candidate: &[String]) -> QueryMetrics {
    compute_metrics_with_baseline(query, reference, candidate, DEFAULT_BASELINE)
}

/// Computes overlap metrics for one query.
///
/// # Rules
///
/// - Entries are trimmed; empty entries are ignored on both sides
/// - `shared_count` = size of the intersection of the unique URL sets
/// - `novel_count` = candidate entries (duplicates counted) whose domain is
///   absent from the reference domains
/// - `shared_rate` = `min(shared_count / baseline, 1)`, or 0 when the
///   reference list is empty or `baseline` is 0
/// - `novel_rate` = `novel_count / candidate_count`, or 0 with no candidates
///
/// Never fails; empty inputs give zero-valued metrics.
pub fn compute_metrics_with_baseline(
    query: Query,
    reference: &[String],
    candidate: &[String],
    baseline: usize,
) -> QueryMetrics {
    let reference: Vec<&str> = non_empty(reference).collect();
    let candidate: Vec<&str> = non_empty(candidate).collect();

    let reference_set: HashSet<&str> = reference.iter().copied().collect();
    let candidate_set: HashSet<&str> = candidate.iter().copied().collect();
    let shared_count = reference_set.intersection(&candidate_set).count();

    let reference_domains: HashSet<String> = reference
        .iter()
        .map(|u| normalize(u))
        .filter(|d| !d.is_empty())
        .collect();
    let novel_count = candidate
        .iter()
        .filter(|u| !reference_domains.contains(&normalize(u)))
        .count();

    let shared_rate = if reference.is_empty() || baseline == 0 {
        0.0
    } else {
        (shared_count as f64 / baseline as f64).min(1.0)
    };

    let novel_rate = if candidate.is_empty() {
        0.0
    } else {
        novel_count as f64 / candidate.len() as f64
    };

    QueryMetrics {
        query,
        reference_count: reference.len(),
        candidate_count: candidate.len(),
        shared_count,
        novel_count,
        shared_rate,
        novel_rate,
    }
}

fn non_empty(urls: &[String]) -> impl Iterator<Item = &str> {
    urls.iter().map(|u| u.trim()).filter(|u| !u.is_empty())
}
