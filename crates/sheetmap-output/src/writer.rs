//! Delimited text writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;
use sheetmap_model::{Delimiter, Table};

use crate::error::{OutputError, Result};

/// Default name of the generated file.
pub const OUTPUT_FILE_NAME: &str = "Mapped_Output.csv";

/// MIME type of files written with `delimiter`.
pub fn mime_type(delimiter: Delimiter) -> &'static str {
    match delimiter {
        Delimiter::Comma => "text/csv",
        Delimiter::Tab => "text/tab-separated-values",
    }
}

/// Writes `table` to `path`, picking the delimiter from the extension.
pub fn write_table(table: &Table, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|source| OutputError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    write_table_to(table, file, Delimiter::from_path(path), path)?;
    tracing::info!(
        path = %path.display(),
        rows = table.row_count(),
        columns = table.column_count(),
        "output written"
    );
    Ok(())
}

/// Writes `table` to any writer. `origin` names the destination in errors.
pub fn write_table_to<W: Write>(
    table: &Table,
    writer: W,
    delimiter: Delimiter,
    origin: &Path,
) -> Result<()> {
    let write_error = |source| OutputError::Write {
        path: origin.to_path_buf(),
        source,
    };
    let mut csv_writer = WriterBuilder::new()
        .delimiter(delimiter.as_byte())
        .from_writer(writer);

    csv_writer
        .write_record(table.column_names())
        .map_err(write_error)?;
    for row in table.rows() {
        csv_writer
            .write_record(row.cells().iter().map(ToString::to_string))
            .map_err(write_error)?;
    }
    csv_writer.flush().map_err(|source| OutputError::Flush {
        path: origin.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetmap_model::CellValue;

    #[test]
    fn mime_type_follows_delimiter() {
        assert_eq!(mime_type(Delimiter::Comma), "text/csv");
        assert_eq!(mime_type(Delimiter::Tab), "text/tab-separated-values");
    }

    #[test]
    fn writes_header_for_empty_table() {
        let table = Table::with_headers(["Full Name", "Email Address"]).unwrap();
        let mut buffer = Vec::new();
        write_table_to(&table, &mut buffer, Delimiter::Comma, Path::new("<memory>")).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "Full Name,Email Address\n");
    }

    #[test]
    fn missing_cells_are_empty_fields() {
        let mut table = Table::with_headers(["A", "B"]).unwrap();
        table
            .push_row(vec![CellValue::Missing, CellValue::Integer(3)])
            .unwrap();
        let mut buffer = Vec::new();
        write_table_to(&table, &mut buffer, Delimiter::Comma, Path::new("<memory>")).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "A,B\n,3\n");
    }
}
