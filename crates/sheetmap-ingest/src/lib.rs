//! Tabular file loading.
//!
//! Reads a source dataset or target template into a
//! [`sheetmap_model::Table`]. Workbooks (`.xlsx`, `.xls`, `.ods` and
//! friends) load their first worksheet; other files are delimited text (CSV,
//! or TSV for `.tsv`/`.tab`). The first row is the header row; every later
//! row becomes a row with typed cells.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use sheetmap_ingest::read_table;
//!
//! let source = read_table(Path::new("contacts.xlsx"))?;
//! println!("{} columns, {} rows", source.column_count(), source.row_count());
//! ```

mod delimited;
mod error;
mod header;
mod input;
mod workbook;

// === Error Types ===
pub use error::{IngestError, Result};

// === Reading ===
pub use delimited::{
    MAX_FILE_SIZE, check_file_size, check_file_size_with_limit, read_delimited,
    read_table_from_reader, validate_encoding,
};
pub use input::{InputFormat, read_table};
pub use workbook::{WORKBOOK_EXTENSIONS, cell_value, read_workbook, table_from_rows};
