//! Domain layer containing the analysis entities and the metric computations.
//!
//! Nothing here performs I/O. The one external collaborator, the search
//! provider, is described as a trait in [`providers`] and implemented in
//! [`crate::infrastructure::search`].
//!
//! # Architecture
//!
//! - [`entities`] - Queries, parsed mappings, metric rows and reports
//! - [`overlap`] - Per-query shared/novel metrics
//! - [`aggregator`] - Domain frequency across the batch
//! - [`providers`] - Search provider trait definition
//!
//! # Analysis Flow
//!
//! 1. Input text is parsed into a [`entities::ParsedMapping`] (see [`crate::input`])
//! 2. Each query's reference list is resolved (manual or fetched)
//! 3. [`overlap::compute_metrics`] produces one [`entities::QueryMetrics`] per query
//! 4. [`aggregator::aggregate`] folds all candidate lists into a [`entities::DomainAggregate`]

pub mod aggregator;
pub mod entities;
pub mod overlap;
pub mod providers;
