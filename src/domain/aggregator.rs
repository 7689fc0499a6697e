//! Aggregator: domain citation frequency across a batch.

use std::collections::HashMap;

use crate::domain::entities::{DomainAggregate, DomainCount, Query};
use crate::utils::domain_normalizer::normalize;

/// Folds candidate URLs into per-domain counts.
///
/// Every occurrence counts, including repeats within one query, so the
/// result measures raw citation frequency rather than distinct-query reach.
#[derive(Debug, Default)]
pub struct DomainCounter {
    counts: HashMap<String, usize>,
    first_seen: Vec<String>,
    queries: usize,
}

impl DomainCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one query's candidate list to the batch.
    pub fn add_query<S: AsRef<str>>(&mut self, candidates: &[S]) {
        self.queries += 1;
        for url in candidates {
            let domain = normalize(url.as_ref());
            if domain.is_empty() {
                continue;
            }
            match self.counts.get_mut(&domain) {
                Some(count) => *count += 1,
                None => {
                    self.counts.insert(domain.clone(), 1);
                    self.first_seen.push(domain);
                }
            }
        }
    }

    /// Produces the domain table.
    ///
    /// Rows are sorted by descending count; ties keep first-seen order.
    /// `repeat_rate` divides by the number of queries added (at least 1).
    pub fn finish(self) -> DomainAggregate {
        let divisor = self.queries.max(1) as f64;

        let mut domains: Vec<DomainCount> = self
            .first_seen
            .into_iter()
            .map(|domain| {
                let count = self.counts[&domain];
                DomainCount {
                    domain,
                    count,
                    repeat_rate: count as f64 / divisor,
                }
            })
            .collect();

        // sort_by is stable, so equal counts stay in first-seen order
        domains.sort_by(|a, b| b.count.cmp(&a.count));

        DomainAggregate {
            query_count: self.queries,
            domains,
        }
    }
}

/// Builds the domain table for a batch of per-query candidate lists.
///
/// The batch size used for repeat rates is the number of entries in
/// `per_query`, including queries with no citations.
///
/// # Examples
///
/// ```ignore
/// let agg = aggregate(&[
///     (q1, vec!["a.com".into(), "b.com".into()]),
///     (q2, vec!["a.com".into()]),
/// ]);
/// assert_eq!(agg.get("a.com").unwrap().repeat_rate, 1.0);
/// ```
pub fn aggregate(per_query: &[(Query, Vec<String>)]) -> DomainAggregate {
    let mut counter = DomainCounter::new();
    for (_, candidates) in per_query {
        counter.add_query(candidates);
    }
    counter.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(items: &[(&str, &[&str])]) -> Vec<(Query, Vec<String>)> {
        items
            .iter()
            .map(|(q, urls)| {
                (
                    Query::parse(q).unwrap(),
                    urls.iter().map(|u| u.to_string()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_two_query_batch() {
        let agg = aggregate(&batch(&[("q1", &["a.com", "b.com"]), ("q2", &["a.com"])]));

        assert_eq!(agg.query_count, 2);
        assert_eq!(agg.domains.len(), 2);
        assert_eq!(agg.domains[0].domain, "a.com");
        assert_eq!(agg.domains[0].count, 2);
        assert_eq!(agg.domains[0].repeat_rate, 1.0);
        assert_eq!(agg.domains[1].domain, "b.com");
        assert_eq!(agg.domains[1].count, 1);
        assert_eq!(agg.domains[1].repeat_rate, 0.5);
    }

    #[test]
    fn test_repeats_within_a_query_count() {
        let agg = aggregate(&batch(&[(
            "q",
            &["https://x.com/1", "https://www.x.com/2", "https://x.com/1"],
        )]));

        assert_eq!(agg.get("x.com").unwrap().count, 3);
        assert_eq!(agg.get("x.com").unwrap().repeat_rate, 3.0);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let agg = aggregate(&batch(&[("q", &["c.com", "a.com", "b.com"])]));
        let order: Vec<&str> = agg.domains.iter().map(|d| d.domain.as_str()).collect();
        assert_eq!(order, vec!["c.com", "a.com", "b.com"]);
    }

    #[test]
    fn test_empty_urls_are_excluded() {
        let agg = aggregate(&batch(&[("q", &["", "  ", "a.com"])]));
        assert_eq!(agg.total_citations(), 1);
    }

    #[test]
    fn test_queries_without_citations_still_count_toward_batch() {
        let agg = aggregate(&batch(&[("q1", &["a.com"]), ("q2", &[]), ("q3", &[]), ("q4", &[])]));
        assert_eq!(agg.get("a.com").unwrap().repeat_rate, 0.25);
    }

    #[test]
    fn test_empty_batch() {
        let agg = aggregate(&[]);
        assert!(agg.is_empty());
        assert_eq!(agg.query_count, 0);
    }

    #[test]
    fn test_total_equals_occurrences() {
        let input = batch(&[
            ("q1", &["https://a.com/x", "https://b.org", "garbage"]),
            ("q2", &["https://a.com/y", ""]),
            ("q3", &["https://sub.c.co.uk"]),
        ]);
        let agg = aggregate(&input);

        assert_eq!(agg.total_citations(), 5);
    }

    #[test]
    fn test_counts_independent_of_order() {
        let forward = batch(&[("q1", &["a.com", "b.com"]), ("q2", &["b.com", "c.com"])]);
        let mut reversed = forward.clone();
        reversed.reverse();

        let a = aggregate(&forward);
        let b = aggregate(&reversed);

        for row in &a.domains {
            assert_eq!(b.get(&row.domain).unwrap().count, row.count);
        }
    }
}
