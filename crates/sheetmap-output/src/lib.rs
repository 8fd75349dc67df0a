//! Output generation for projected tables.
//!
//! Writes a [`sheetmap_model::Table`] as delimited text: the header row is the
//! table's columns in order, missing cells are empty fields, and typed cells
//! are written back as their original text.

mod error;
mod writer;

pub use error::{OutputError, Result};
pub use writer::{OUTPUT_FILE_NAME, mime_type, write_table, write_table_to};
