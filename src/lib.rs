//! # Citation Overlap
//!
//! Measures how far an AI assistant's cited sources overlap with a search
//! engine's top results for the same queries, built with Axum.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Entities, overlap metrics, aggregation and the provider trait
//! - **Input Layer** ([`input`]) - Pasted text and batch CSV readers
//! - **Application Layer** ([`application`]) - Batch runs, reference resolution, exports
//! - **Infrastructure Layer** ([`infrastructure`]) - Search provider clients
//! - **API Layer** ([`api`]) - REST API handlers, DTOs, and middleware
//!
//! ## Metrics
//!
//! Per query:
//! - **SVR** (shared rate) - reference URLs also cited, divided by 10
//! - **UAVR** (novel rate) - citations on domains absent from the reference list,
//!   divided by all citations
//!
//! Per batch:
//! - **Repeat rate** - citations of a domain divided by the number of queries
//!
//! ## Quick Start
//!
//! ```bash
//! # Optional: enables auto-fetch of reference results
//! export SERPAPI_KEY="..."
//!
//! # Start the service
//! cargo run
//!
//! # Or analyze files from the command line
//! cargo run --bin overlap -- analyze --queries queries.txt --citations citations.txt
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod input;
pub mod state;
pub mod utils;

pub mod config;
pub mod logging;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        AnalysisRequest, AnalysisService, ExportTable, ResolveMode,
    };
    pub use crate::domain::entities::{AnalysisReport, ParsedMapping, Query, QueryResult};
    pub use crate::domain::providers::{ProviderError, SearchProvider};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
