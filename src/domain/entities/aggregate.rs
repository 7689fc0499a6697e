//! Batch-wide domain citation counts.

use serde::Serialize;

/// Citation count for one domain across the batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainCount {
    pub domain: String,
    pub count: usize,
    /// Repeat citation rate (RCC): `count / query_count`.
    pub repeat_rate: f64,
}

/// Domain table for a batch, ordered by descending count.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainAggregate {
    pub query_count: usize,
    pub domains: Vec<DomainCount>,
}

impl DomainAggregate {
    /// Sum of counts over all domains.
    pub fn total_citations(&self) -> usize {
        self.domains.iter().map(|d| d.count).sum()
    }

    /// Looks up one domain's row.
    pub fn get(&self, domain: &str) -> Option<&DomainCount> {
        self.domains.iter().find(|d| d.domain == domain)
    }

    /// The `n` most cited domains.
    pub fn top(&self, n: usize) -> &[DomainCount] {
        &self.domains[..n.min(self.domains.len())]
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}
