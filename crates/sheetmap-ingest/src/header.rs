//! Header row handling.

use std::path::Path;

use sheetmap_model::{ColumnName, ModelError, Table};
use tracing::debug;

use crate::error::{IngestError, Result};

const UTF8_BOM: char = '\u{feff}';

/// Strips a UTF-8 byte order mark that survived decoding.
pub fn strip_bom(value: &str) -> &str {
    value.strip_prefix(UTF8_BOM).unwrap_or(value)
}

/// Name given to a blank header cell at 0-based `index`.
pub fn unnamed_column(index: usize) -> String {
    format!("Unnamed: {index}")
}

/// Builds an empty table from the header fields.
///
/// Names are kept verbatim apart from a leading BOM on the first field.
/// Blank fields (a trailing delimiter, a spacer column) are named
/// `Unnamed: {index}`.
pub fn table_from_header<'a, I>(fields: I, path: &Path) -> Result<Table>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut columns = Vec::new();
    for (idx, field) in fields.into_iter().enumerate() {
        let raw = if idx == 0 { strip_bom(field) } else { field };
        let column = if raw.trim().is_empty() {
            debug!(path = %path.display(), position = idx + 1, "blank header named by position");
            ColumnName::new(unnamed_column(idx))?
        } else {
            ColumnName::new(raw)?
        };
        columns.push(column);
    }
    Table::new(columns).map_err(|err| match err {
        ModelError::DuplicateColumn(column) => IngestError::DuplicateColumn {
            path: path.to_path_buf(),
            column,
        },
        other => IngestError::Model(other),
    })
}
