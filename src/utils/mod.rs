//! Helpers shared by the input readers, the metrics and the exports.
//!
//! - [`domain_normalizer`] - URL to registrable domain
//! - [`url_list`] - Comma-separated URL list splitting
//! - [`csv`] - Minimal CSV reading and writing

pub mod csv;
pub mod domain_normalizer;
pub mod url_list;
