//! Delimited file reading.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use sheetmap_model::{CellValue, Delimiter, Table};

use crate::error::{IngestError, Result};

use crate::header::table_from_header;

/// Maximum file size accepted by [`crate::read_table`] (500 MB).
pub const MAX_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// Tables wider than this are loaded but flagged in the log.
const WIDE_TABLE_COLUMNS: usize = 500;

fn open_error(path: &Path, err: std::io::Error) -> IngestError {
    if err.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: err,
        }
    }
}

/// Check file size before loading.
pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_FILE_SIZE)
}

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| open_error(path, e))?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Rejects UTF-16 files, which the reader cannot decode.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| open_error(path, e))?;

    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read == 2 {
        if buffer == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        if buffer == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }

    Ok(())
}

/// Reads a delimited text file into a [`Table`].
pub fn read_delimited(path: &Path, delimiter: Delimiter) -> Result<Table> {
    validate_encoding(path)?;
    let file = File::open(path).map_err(|e| open_error(path, e))?;
    read_table_from_reader(file, delimiter, path)
}

/// Reads delimited text from any reader. `origin` names the input in errors.
///
/// - The first record is the header row.
/// - Records where every field is empty are skipped.
/// - Short records are padded with [`CellValue::Missing`]; surplus fields
///   are only accepted when they are blank.
pub fn read_table_from_reader<R: Read>(
    reader: R,
    delimiter: Delimiter,
    origin: &Path,
) -> Result<Table> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter.as_byte())
        .from_reader(reader);
    let parse_error = |source| IngestError::Parse {
        path: origin.to_path_buf(),
        source,
    };

    let mut records = csv_reader.records();
    let header = match records.next() {
        Some(record) => record.map_err(parse_error)?,
        None => {
            return Err(IngestError::EmptyFile {
                path: origin.to_path_buf(),
            });
        }
    };
    let mut table = table_from_header(header.iter(), origin)?;
    let width = table.column_count();

    for record in records {
        let record = record.map_err(parse_error)?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let cells = record_cells(&record, width, origin)?;
        table.push_row(cells)?;
    }

    if width > WIDE_TABLE_COLUMNS {
        tracing::warn!(
            path = %origin.display(),
            columns = width,
            "table has more than {WIDE_TABLE_COLUMNS} columns"
        );
    }
    tracing::debug!(
        path = %origin.display(),
        columns = width,
        rows = table.row_count(),
        "table loaded"
    );

    Ok(table)
}

fn record_cells(record: &StringRecord, width: usize, origin: &Path) -> Result<Vec<CellValue>> {
    if record.len() > width && record.iter().skip(width).any(|f| !f.trim().is_empty()) {
        return Err(IngestError::TooManyFields {
            path: origin.to_path_buf(),
            line: record.position().map_or(0, csv::Position::line),
            expected: width,
            found: record.len(),
        });
    }
    let mut cells: Vec<CellValue> = record.iter().take(width).map(CellValue::parse).collect();
    cells.resize(width, CellValue::Missing);
    Ok(cells)
}
