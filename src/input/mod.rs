//! Input readers turning user-supplied text into domain entities.
//!
//! - [`text`] - Pasted free-form citation text
//! - [`batch`] - Batch CSV table with reference and candidate columns

pub mod batch;
pub mod text;

pub use batch::{BatchTable, BatchTableError, parse_batch_table};
pub use text::parse;
