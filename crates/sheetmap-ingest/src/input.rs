//! Input format detection.

use std::path::Path;

use sheetmap_model::{Delimiter, Table};

use crate::delimited::{check_file_size, read_delimited};
use crate::error::Result;
use crate::workbook::{is_workbook, read_workbook};

/// How a file is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// CSV or TSV text.
    Delimited(Delimiter),
    /// Excel or OpenDocument workbook.
    Workbook,
}

impl InputFormat {
    /// Picks the format from the file extension.
    pub fn from_path(path: &Path) -> Self {
        if is_workbook(path) {
            Self::Workbook
        } else {
            Self::Delimited(Delimiter::from_path(path))
        }
    }
}

/// Reads a table, choosing the reader by file extension.
///
/// Workbooks (`.xlsx`, `.xlsm`, `.xlsb`, `.xls`, `.ods`) load their first
/// worksheet; anything else is read as delimited text.
pub fn read_table(path: &Path) -> Result<Table> {
    check_file_size(path)?;
    match InputFormat::from_path(path) {
        InputFormat::Workbook => read_workbook(path),
        InputFormat::Delimited(delimiter) => read_delimited(path, delimiter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            InputFormat::from_path(Path::new("template.xlsx")),
            InputFormat::Workbook
        );
        assert_eq!(
            InputFormat::from_path(Path::new("source.tsv")),
            InputFormat::Delimited(Delimiter::Tab)
        );
        assert_eq!(
            InputFormat::from_path(Path::new("source.csv")),
            InputFormat::Delimited(Delimiter::Comma)
        );
        assert_eq!(
            InputFormat::from_path(Path::new("export.txt")),
            InputFormat::Delimited(Delimiter::Comma)
        );
    }
}
