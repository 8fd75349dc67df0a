//! Error types for mapping operations.

use thiserror::Error;

/// Rejected mapping edits.
///
/// These are configuration errors to report back to the user; the mapping
/// state is left unchanged when one is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MappingError {
    /// Target column is not part of the target template.
    #[error("target column not found: {0}")]
    TargetNotFound(String),

    /// Source column is not part of the source table.
    #[error("source column '{source_column}' for target '{target}' not found")]
    SourceNotFound {
        /// The target being edited.
        target: String,
        /// The unknown source column.
        source_column: String,
    },
}

impl MappingError {
    /// Get the target column associated with this error.
    pub fn target(&self) -> &str {
        match self {
            Self::TargetNotFound(target) => target,
            Self::SourceNotFound { target, .. } => target,
        }
    }

    /// Get the source column associated with this error, if any.
    pub fn source_column(&self) -> Option<&str> {
        match self {
            Self::SourceNotFound { source_column, .. } => Some(source_column),
            Self::TargetNotFound(_) => None,
        }
    }
}
