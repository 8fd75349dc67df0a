//! Excel and OpenDocument workbook reading.
//!
//! The first worksheet is loaded; its first row is the header row. Cells
//! keep the type the workbook stores: numbers become integers when they are
//! whole, dates at midnight become dates, and error cells are missing.

use std::path::Path;

use calamine::{Data, DataType, Reader, open_workbook_auto};
use chrono::{NaiveDateTime, Timelike};
use sheetmap_model::{CellValue, Table};
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::header::table_from_header;

/// File extensions read as workbooks.
pub const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Every whole `f64` below 2^53 converts to `i64` exactly.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

pub fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            WORKBOOK_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

/// Reads the first worksheet of a workbook into a [`Table`].
pub fn read_workbook(path: &Path) -> Result<Table> {
    let workbook_error = |source| IngestError::Workbook {
        path: path.to_path_buf(),
        source,
    };
    let mut workbook = open_workbook_auto(path).map_err(workbook_error)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| IngestError::NoWorksheet {
            path: path.to_path_buf(),
        })?
        .map_err(workbook_error)?;
    let table = table_from_rows(range.rows(), path)?;
    debug!(
        path = %path.display(),
        columns = table.column_count(),
        rows = table.row_count(),
        "workbook loaded"
    );
    Ok(table)
}

/// Builds a table from worksheet rows. `origin` names the input in errors.
///
/// Rows where every cell is empty are skipped; short rows are padded with
/// [`CellValue::Missing`].
pub fn table_from_rows<'a, I>(rows: I, origin: &Path) -> Result<Table>
where
    I: IntoIterator<Item = &'a [Data]>,
{
    let mut rows = rows.into_iter();
    let header = rows.next().ok_or_else(|| IngestError::EmptyFile {
        path: origin.to_path_buf(),
    })?;
    let names: Vec<String> = header
        .iter()
        .map(|cell| cell_value(cell).to_string())
        .collect();
    let mut table = table_from_header(names.iter().map(String::as_str), origin)?;
    let width = table.column_count();

    for (idx, row) in rows.enumerate() {
        if row.iter().all(|cell| matches!(cell, Data::Empty)) {
            continue;
        }
        if row.len() > width && row.iter().skip(width).any(|cell| !cell_value(cell).is_missing()) {
            return Err(IngestError::TooManyFields {
                path: origin.to_path_buf(),
                line: (idx + 2) as u64,
                expected: width,
                found: row.len(),
            });
        }
        let mut cells: Vec<CellValue> = row.iter().take(width).map(cell_value).collect();
        cells.resize(width, CellValue::Missing);
        table.push_row(cells)?;
    }
    Ok(table)
}

/// Converts one worksheet cell.
pub fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Missing,
        Data::Int(value) => CellValue::Integer(*value),
        Data::Float(value) => float_value(*value),
        Data::String(value) if value.is_empty() => CellValue::Missing,
        Data::String(value) => CellValue::Text(value.clone()),
        Data::Bool(value) => CellValue::Text(if *value { "TRUE" } else { "FALSE" }.to_string()),
        Data::DateTime(_) => cell
            .as_datetime()
            .map_or_else(|| CellValue::Text(cell.to_string()), datetime_value),
        Data::DateTimeIso(value) => match CellValue::parse(value) {
            CellValue::Date(date) => CellValue::Date(date),
            _ => NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
                .map_or_else(|_| CellValue::Text(value.clone()), datetime_value),
        },
        Data::DurationIso(value) => CellValue::Text(value.clone()),
        Data::Error(error) => {
            debug!(%error, "worksheet error cell read as missing");
            CellValue::Missing
        }
    }
}

fn float_value(value: f64) -> CellValue {
    if !value.is_finite() {
        return CellValue::Text(value.to_string());
    }
    if value.fract() == 0.0 && value.abs() < MAX_EXACT_INTEGER {
        return CellValue::Integer(value as i64);
    }
    CellValue::Float(value)
}

fn datetime_value(value: NaiveDateTime) -> CellValue {
    if value.num_seconds_from_midnight() == 0 && value.nanosecond() == 0 {
        CellValue::Date(value.date())
    } else {
        CellValue::Text(value.format(DATETIME_FORMAT).to_string())
    }
}
