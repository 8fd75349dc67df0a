//! Data model for sheetmap.
//!
//! A [`Table`] is an ordered list of unique [`ColumnName`]s plus rows of
//! [`CellValue`]s, one value per declared column. A [`ColumnMapping`] says,
//! for every column of a target template, which source column feeds it or
//! whether it is ignored.

pub mod error;
pub mod format;
pub mod ids;
pub mod mapping;
pub mod table;
pub mod value;

pub use error::{ModelError, Result};
pub use format::Delimiter;
pub use ids::ColumnName;
pub use mapping::{ColumnMapping, IGNORE_LABEL, MappingChoice, MappingEntry};
pub use table::{Row, Table};
pub use value::CellValue;
