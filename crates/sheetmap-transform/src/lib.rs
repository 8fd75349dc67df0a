//! Projection of a source table into the shape of a target template.
//!
//! The output has exactly the target columns, in target order, and one row
//! per source row. Each cell is copied from the source column the mapping
//! names, or left [`sheetmap_model::CellValue::Missing`] when the target is
//! ignored or the named source column does not exist.
//!
//! # Example
//!
//! ```ignore
//! use sheetmap_transform::project;
//!
//! let output = project(&source, state.get_all(), target.columns())?;
//! assert_eq!(output.row_count(), source.row_count());
//! ```

mod error;
mod project;

pub use error::{Result, TransformError};
pub use project::{StaleSelection, project, stale_selections};
