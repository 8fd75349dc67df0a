//! Explicit per-invocation session state.
//!
//! A [`Session`] owns everything one mapping run needs: the two loaded
//! tables, the matcher settings and the mapping being edited. Loading a new
//! table drops the mapping built from the previous one.

use std::fmt;
use std::path::Path;

use sheetmap_ingest::{IngestError, read_table};
use sheetmap_map::{ColumnMatcher, MappingState, MatchOptions};
use sheetmap_model::Table;
use sheetmap_transform::{TransformError, project};
use thiserror::Error;
use tracing::info;

/// Which of the two inputs a table is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableRole {
    Source,
    Target,
}

impl fmt::Display for TableRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Target => f.write_str("target"),
        }
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("both a source and a target file are required")]
    MissingInputs {
        missing_source: bool,
        missing_target: bool,
    },

    #[error("mapping has not been initialized")]
    MappingNotInitialized,

    #[error("failed to load {role} file: {error}")]
    Load {
        role: TableRole,
        #[source]
        error: IngestError,
    },

    #[error(transparent)]
    Transform(#[from] TransformError),
}

#[derive(Debug, Default)]
pub struct Session {
    matcher: ColumnMatcher,
    source: Option<Table>,
    target: Option<Table>,
    mapping: Option<MappingState>,
}

impl Session {
    pub fn new(options: MatchOptions) -> Self {
        Self {
            matcher: ColumnMatcher::new(options),
            ..Self::default()
        }
    }

    pub fn matcher(&self) -> &ColumnMatcher {
        &self.matcher
    }

    /// Loads the source dataset.
    ///
    /// On failure the source slot is left empty; either way the mapping is
    /// dropped.
    pub fn load_source(&mut self, path: &Path) -> Result<&Table, SessionError> {
        self.load(TableRole::Source, path)
    }

    /// Loads the target template. Same rules as [`Session::load_source`].
    pub fn load_target(&mut self, path: &Path) -> Result<&Table, SessionError> {
        self.load(TableRole::Target, path)
    }

    /// Installs an already loaded table.
    pub fn set_table(&mut self, role: TableRole, table: Table) {
        self.mapping = None;
        *self.slot(role) = Some(table);
    }

    pub fn source(&self) -> Option<&Table> {
        self.source.as_ref()
    }

    pub fn target(&self) -> Option<&Table> {
        self.target.as_ref()
    }

    /// Builds a fresh mapping seeded with the matcher's suggestions.
    pub fn init_mapping(&mut self) -> Result<&mut MappingState, SessionError> {
        let (source, target) = self.inputs()?;
        let state = MappingState::from_tables(target, source, &self.matcher);
        let summary = state.summary();
        info!(
            targets = summary.total,
            suggested = summary.mapped,
            "mapping initialized"
        );
        Ok(self.mapping.insert(state))
    }

    pub fn mapping(&self) -> Option<&MappingState> {
        self.mapping.as_ref()
    }

    pub fn mapping_mut(&mut self) -> Option<&mut MappingState> {
        self.mapping.as_mut()
    }

    /// Projects the source rows into the target's column order.
    pub fn generate(&self) -> Result<Table, SessionError> {
        let (source, target) = self.inputs()?;
        let mapping = self
            .mapping
            .as_ref()
            .ok_or(SessionError::MappingNotInitialized)?;
        let output = project(source, mapping.get_all(), target.columns())?;
        info!(
            rows = output.row_count(),
            columns = output.column_count(),
            "output generated"
        );
        Ok(output)
    }

    fn load(&mut self, role: TableRole, path: &Path) -> Result<&Table, SessionError> {
        self.mapping = None;
        let slot = self.slot(role);
        *slot = None;
        let table = read_table(path).map_err(|error| SessionError::Load { role, error })?;
        info!(
            role = %role,
            path = %path.display(),
            rows = table.row_count(),
            columns = table.column_count(),
            "table loaded"
        );
        Ok(slot.insert(table))
    }

    fn slot(&mut self, role: TableRole) -> &mut Option<Table> {
        match role {
            TableRole::Source => &mut self.source,
            TableRole::Target => &mut self.target,
        }
    }

    fn inputs(&self) -> Result<(&Table, &Table), SessionError> {
        match (&self.source, &self.target) {
            (Some(source), Some(target)) => Ok((source, target)),
            (source, target) => Err(SessionError::MissingInputs {
                missing_source: source.is_none(),
                missing_target: target.is_none(),
            }),
        }
    }
}
