//! Batch table reader.
//!
//! Reads a CSV table with one row per query. Required header: `query`.
//! Optional headers: `referenceUrls` and `candidateUrls`, each a
//! comma-joined URL list (quoted, since the lists contain commas).
//!
//! Accepted header aliases, matched case-insensitively:
//!
//! | Column          | Aliases                                |
//! |-----------------|----------------------------------------|
//! | `query`         | `q`                                    |
//! | `referenceUrls` | `reference_urls`, `google_urls`        |
//! | `candidateUrls` | `candidate_urls`, `assistant_urls`     |

use crate::domain::entities::{EntryKey, EntryKind, ParsedMapping, Query};
use crate::utils::csv::{UnterminatedQuote, read_records};
use crate::utils::url_list::split_url_list;

/// Errors that can occur while reading a batch table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BatchTableError {
    #[error("Batch table is empty")]
    Empty,

    #[error("Batch table is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error(transparent)]
    Csv(#[from] UnterminatedQuote),
}

/// A parsed batch table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchTable {
    /// Queries in row order, without repeats.
    pub queries: Vec<Query>,
    /// Reference and candidate lists keyed by query.
    pub mapping: ParsedMapping,
}

/// Parses a batch table from CSV text.
///
/// Rows with an empty `query` cell are skipped. A query appearing on several
/// rows is listed once; its last row's URL lists win.
///
/// # Errors
///
/// Returns [`BatchTableError::Empty`] if there is no header row.
/// Returns [`BatchTableError::MissingColumn`] if the `query` column is absent.
/// Returns [`BatchTableError::Csv`] if a quoted field is never closed.
pub fn parse_batch_table(csv_text: &str) -> Result<BatchTable, BatchTableError> {
    let mut records = read_records(csv_text)?.into_iter();
    let header = records.next().ok_or(BatchTableError::Empty)?;

    let query_col =
        find_column(&header, &["query", "q"]).ok_or(BatchTableError::MissingColumn("query"))?;
    let reference_col = find_column(&header, &["referenceurls", "reference_urls", "google_urls"]);
    let candidate_col = find_column(&header, &["candidateurls", "candidate_urls", "assistant_urls"]);

    let mut table = BatchTable::default();

    for (row_index, row) in records.enumerate() {
        let Some(query) = row.get(query_col).and_then(|cell| Query::parse(cell)) else {
            tracing::debug!(row = row_index + 1, "Skipping batch row without a query");
            continue;
        };

        // Absent columns add no entry, so a table without references reads
        // the same as pasted text without references.
        for (kind, col) in [
            (EntryKind::Reference, reference_col),
            (EntryKind::Candidate, candidate_col),
        ] {
            if let Some(col) = col {
                let urls = row.get(col).map(|raw| split_url_list(raw)).unwrap_or_default();
                table.mapping.insert(EntryKey::new(kind, query.clone()), urls);
            }
        }

        if !table.queries.contains(&query) {
            table.queries.push(query);
        }
    }

    Ok(table)
}

fn find_column(header: &[String], names: &[&str]) -> Option<usize> {
    header.iter().position(|h| {
        let h = h.trim().trim_start_matches('\u{feff}').to_ascii_lowercase();
        names.contains(&h.as_str())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(s: &str) -> Query {
        Query::parse(s).unwrap()
    }

    #[test]
    fn test_parse_full_table() {
        let csv = "query,referenceUrls,candidateUrls\n\
                   Best Shoes,\"https://a.com, https://b.com\",\"https://a.com, https://c.com\"\n\
                   boots,https://d.com,\n";

        let table = parse_batch_table(csv).unwrap();

        assert_eq!(table.queries, vec![q("best shoes"), q("boots")]);
        assert_eq!(
            table.mapping.references(&q("best shoes")),
            ["https://a.com", "https://b.com"]
        );
        assert_eq!(
            table.mapping.candidates(&q("best shoes")),
            ["https://a.com", "https://c.com"]
        );
        assert_eq!(table.mapping.references(&q("boots")), ["https://d.com"]);
        assert!(table.mapping.candidates(&q("boots")).is_empty());
    }

    #[test]
    fn test_legacy_column_names() {
        let csv = "query,google_urls,assistant_urls\nq1,\"x.com,y.com\",z.com\n";
        let table = parse_batch_table(csv).unwrap();

        assert_eq!(table.mapping.references(&q("q1")).len(), 2);
        assert_eq!(table.mapping.candidates(&q("q1")), ["z.com"]);
    }

    #[test]
    fn test_header_is_case_insensitive_with_bom() {
        let csv = "\u{feff}Query,CandidateUrls\nq1,a.com\n";
        let table = parse_batch_table(csv).unwrap();

        assert_eq!(table.mapping.candidates(&q("q1")), ["a.com"]);
        assert!(table.mapping.references(&q("q1")).is_empty());
    }

    #[test]
    fn test_absent_reference_column_adds_no_entries() {
        let table = parse_batch_table("query,candidateUrls\nq1,a.com\nq2,b.com\n").unwrap();

        assert!(table.mapping.queries(EntryKind::Reference).is_empty());
        assert!(table.mapping.get(EntryKind::Reference, &q("q1")).is_none());
        assert_eq!(table.mapping.len(), 2);
    }

    #[test]
    fn test_missing_query_column() {
        let err = parse_batch_table("keyword,candidateUrls\nq,a.com\n").unwrap_err();
        assert_eq!(err, BatchTableError::MissingColumn("query"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_batch_table("").unwrap_err(), BatchTableError::Empty);
    }

    #[test]
    fn test_unterminated_quote() {
        let err = parse_batch_table("query,candidateUrls\nq,\"a.com").unwrap_err();
        assert!(matches!(err, BatchTableError::Csv(_)));
    }

    #[test]
    fn test_blank_query_rows_skipped() {
        let table = parse_batch_table("query,candidateUrls\n,a.com\nq2,b.com\n").unwrap();
        assert_eq!(table.queries, vec![q("q2")]);
    }

    #[test]
    fn test_short_rows_are_tolerated() {
        let table = parse_batch_table("query,referenceUrls,candidateUrls\nq1\n").unwrap();

        assert_eq!(table.queries, vec![q("q1")]);
        assert!(table.mapping.candidates(&q("q1")).is_empty());
    }

    #[test]
    fn test_repeated_query_last_row_wins() {
        let table = parse_batch_table("query,candidateUrls\nq,a.com\nQ,b.com\n").unwrap();

        assert_eq!(table.queries.len(), 1);
        assert_eq!(table.mapping.candidates(&q("q")), ["b.com"]);
    }
}
