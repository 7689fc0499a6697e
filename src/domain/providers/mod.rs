//! Provider trait definitions for the domain layer.
//!
//! External collaborators the core depends on are described here as traits
//! and implemented in the infrastructure layer.
//!
//! # Architecture
//!
//! - Traits define the contract for external lookups
//! - Implementations live in `crate::infrastructure::search`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Providers
//!
//! - [`SearchProvider`] - Ranked organic results for a query

pub mod search_provider;

pub use search_provider::{ProviderError, SearchProvider};

#[cfg(test)]
pub use search_provider::MockSearchProvider;
