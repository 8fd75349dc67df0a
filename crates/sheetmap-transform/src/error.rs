use thiserror::Error;

/// Errors raised while projecting a table.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The requested output columns are not a valid column list.
    #[error("invalid target columns: {0}")]
    InvalidTargetColumns(#[source] sheetmap_model::ModelError),

    /// An output row could not be added.
    #[error("failed to build output row {row}: {source}")]
    Row {
        row: usize,
        #[source]
        source: sheetmap_model::ModelError,
    },
}

pub type Result<T> = std::result::Result<T, TransformError>;
