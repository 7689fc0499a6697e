//! Core domain entities for a single analysis run.
//!
//! All entities are created at the start of a run and dropped at its end;
//! nothing here is persisted.
//!
//! # Entity Types
//!
//! - [`Query`] - Normalized query text
//! - [`ParsedMapping`] - `(kind, query)` → URL list, built from pasted text
//! - [`QueryMetrics`] / [`QueryResult`] - One row of the results table
//! - [`DomainAggregate`] - Domain citation counts for the batch
//! - [`AnalysisReport`] - Everything one run produces

pub mod aggregate;
pub mod mapping;
pub mod metrics;
pub mod query;
pub mod report;

pub use aggregate::{DomainAggregate, DomainCount};
pub use mapping::{EntryKey, EntryKind, ParsedMapping};
pub use metrics::{QueryMetrics, QueryResult};
pub use query::{Query, parse_query_list};
pub use report::{AnalysisReport, HistogramBin, ReportSummary};
