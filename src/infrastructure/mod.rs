//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`search`] - Search provider clients (SerpAPI and a no-op provider)

pub mod search;
