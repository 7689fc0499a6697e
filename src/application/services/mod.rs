//! Business logic services for the application layer.

pub mod analysis_service;
pub mod reference_resolver;
pub mod report_service;

pub use analysis_service::{AnalysisRequest, AnalysisService};
pub use reference_resolver::{ReferenceResolver, ResolveMode};
pub use report_service::ExportTable;
