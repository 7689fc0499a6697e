//! Application layer services implementing the analysis workflow.
//!
//! This layer orchestrates domain operations: it resolves reference lists,
//! runs the metric computations over a batch and renders the results.
//! HTTP handlers and the CLI both go through it.
//!
//! # Available Services
//!
//! - [`services::analysis_service::AnalysisService`] - One batch run, end to end
//! - [`services::reference_resolver::ReferenceResolver`] - Manual or fetched reference lists
//! - [`services::report_service`] - Summary, CSV exports and narrative report

pub mod services;
