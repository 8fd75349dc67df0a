//! Row projector.

use sheetmap_model::{CellValue, ColumnMapping, ColumnName, MappingChoice, Table};
use tracing::{debug, warn};

use crate::error::{Result, TransformError};

/// A mapping entry naming a source column the source table lacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaleSelection {
    pub target: ColumnName,
    pub source: ColumnName,
}

/// Lists mapping entries whose source column is absent from `source`.
///
/// [`project`] treats these targets as ignored.
pub fn stale_selections(source: &Table, mapping: &ColumnMapping) -> Vec<StaleSelection> {
    mapping
        .iter()
        .filter_map(|entry| match &entry.choice {
            MappingChoice::Source(column) if !source.has_column(column.as_str()) => {
                Some(StaleSelection {
                    target: entry.target.clone(),
                    source: column.clone(),
                })
            }
            _ => None,
        })
        .collect()
}

/// Projects `source` into a table with exactly `target_columns`.
///
/// - Column order is `target_columns`, whatever the source order.
/// - Row count equals the source row count.
/// - A target that is ignored, missing from `mapping`, or mapped to a column
///   the source does not have yields [`CellValue::Missing`] in every row.
///
/// Inputs are not modified and the result depends only on the inputs.
pub fn project(
    source: &Table,
    mapping: &ColumnMapping,
    target_columns: &[ColumnName],
) -> Result<Table> {
    for stale in stale_selections(source, mapping) {
        warn!(
            target_column = %stale.target,
            source_column = %stale.source,
            "mapped source column not found, leaving target empty"
        );
    }

    // Resolve each target to a source column index once, not per row.
    let plan: Vec<Option<usize>> = target_columns
        .iter()
        .map(|target| {
            mapping
                .source_for(target.as_str())
                .and_then(|column| source.column_index(column.as_str()))
        })
        .collect();

    let mut output =
        Table::new(target_columns.to_vec()).map_err(TransformError::InvalidTargetColumns)?;
    for (idx, row) in source.rows().iter().enumerate() {
        let cells: Vec<CellValue> = plan
            .iter()
            .map(|slot| {
                slot.and_then(|column| row.get(column))
                    .cloned()
                    .unwrap_or_default()
            })
            .collect();
        output
            .push_row(cells)
            .map_err(|source| TransformError::Row { row: idx, source })?;
    }

    debug!(
        rows = output.row_count(),
        columns = output.column_count(),
        mapped = plan.iter().filter(|slot| slot.is_some()).count(),
        "projection complete"
    );
    Ok(output)
}
