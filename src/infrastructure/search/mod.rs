//! Search provider implementations.
//!
//! Provides two implementations of [`crate::domain::providers::SearchProvider`]:
//! - [`SerpApiProvider`] - Google results through the SerpAPI JSON endpoint
//! - [`NullProvider`] - Always empty, used when no credential is configured

mod null_provider;
mod serpapi;

pub use null_provider::NullProvider;
pub use serpapi::{SerpApiProvider, extract_result_links};
