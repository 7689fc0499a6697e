//! Query entity: the normalized text a batch row is keyed by.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A search query, case-folded and trimmed.
///
/// Two queries are the same query when their normalized text is equal, so
/// `"Best Shoes "` and `"best shoes"` address the same reference and
/// candidate lists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Query(String);

impl Query {
    /// Normalizes raw input into a query.
    ///
    /// Returns `None` when nothing is left after trimming.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let q = Query::parse("  Best Running Shoes ").unwrap();
    /// assert_eq!(q.as_str(), "best running shoes");
    /// assert!(Query::parse("   ").is_none());
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            None
        } else {
            Some(Self(normalized))
        }
    }

    /// Returns the normalized text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Query {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Parses one query per line, skipping blank lines and repeated queries.
///
/// First occurrence wins, so the output keeps input order.
pub fn parse_query_list(text: &str) -> Vec<Query> {
    let mut seen = std::collections::HashSet::new();
    text.lines()
        .filter_map(Query::parse)
        .filter(|q| seen.insert(q.clone()))
        .collect()
}
