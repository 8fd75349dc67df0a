#![deny(unsafe_code)]

use std::collections::HashMap;

use crate::{CellValue, ColumnName, ModelError, Result};

/// One data row. Cells are stored in the table's column order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    cells: Vec<CellValue>,
}

impl Row {
    pub fn new(cells: Vec<CellValue>) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<&CellValue> {
        self.cells.get(index)
    }
}

/// An in-memory table with unique, ordered column names.
///
/// Every row holds exactly one value per column; [`Table::push_row`] rejects
/// anything else.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<ColumnName>,
    index: HashMap<ColumnName, usize>,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(columns: Vec<ColumnName>) -> Result<Self> {
        let mut index = HashMap::with_capacity(columns.len());
        for (position, column) in columns.iter().enumerate() {
            if index.insert(column.clone(), position).is_some() {
                return Err(ModelError::DuplicateColumn(column.to_string()));
            }
        }
        Ok(Self {
            columns,
            index,
            rows: Vec::new(),
        })
    }

    /// Builds an empty table from plain header strings.
    pub fn with_headers<I, S>(headers: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns = headers
            .into_iter()
            .map(ColumnName::new)
            .collect::<Result<Vec<_>>>()?;
        Self::new(columns)
    }

    pub fn push_row(&mut self, cells: Vec<CellValue>) -> Result<()> {
        if cells.len() != self.columns.len() {
            return Err(ModelError::RowWidth {
                expected: self.columns.len(),
                found: cells.len(),
            });
        }
        self.rows.push(Row::new(cells));
        Ok(())
    }

    pub fn columns(&self) -> &[ColumnName] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(ColumnName::as_str)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Looks up the value of `column` in `row`.
    pub fn cell<'a>(&self, row: &'a Row, column: &str) -> Option<&'a CellValue> {
        self.column_index(column).and_then(|idx| row.get(idx))
    }

    /// Copy of the table truncated to the first `limit` rows.
    pub fn head(&self, limit: usize) -> Table {
        Table {
            columns: self.columns.clone(),
            index: self.index.clone(),
            rows: self.rows.iter().take(limit).cloned().collect(),
        }
    }
}
