//! Mapping files for saving and re-applying column choices.
//!
//! A mapping file is a JSON document listing one entry per target column:
//!
//! ```json
//! {
//!   "version": "1.0",
//!   "mappings": [
//!     { "target": "Full Name", "source": null },
//!     { "target": "Email Address", "source": "Email" }
//!   ]
//! }
//! ```
//!
//! `null` means the target is ignored.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use sheetmap_model::{ColumnMapping, MappingChoice};

use crate::error::MappingError;
use crate::state::MappingState;

/// Version written into new mapping files.
pub const MAPPING_FILE_VERSION: &str = "1.0";

fn default_version() -> String {
    MAPPING_FILE_VERSION.to_string()
}

/// One target column and its source (`None` = ignore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingFileEntry {
    pub target: String,
    #[serde(default)]
    pub source: Option<String>,
}

/// Serialized form of a [`ColumnMapping`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingFile {
    /// Version of the mapping format.
    #[serde(default = "default_version")]
    pub version: String,
    pub mappings: Vec<MappingFileEntry>,
}

impl MappingFile {
    pub fn from_mapping(mapping: &ColumnMapping) -> Self {
        let mappings = mapping
            .iter()
            .map(|entry| MappingFileEntry {
                target: entry.target.to_string(),
                source: entry.choice.source().map(ToString::to_string),
            })
            .collect();
        Self {
            version: default_version(),
            mappings,
        }
    }

    /// Reads and version-checks a mapping file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read mapping file: {}", path.display()))?;
        let file: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse mapping file: {}", path.display()))?;
        if file.major_version() != major(MAPPING_FILE_VERSION) {
            bail!(
                "Unsupported mapping file version {} in {} (expected {})",
                file.version,
                path.display(),
                MAPPING_FILE_VERSION
            );
        }
        Ok(file)
    }

    /// Writes the file as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize mapping")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write mapping file: {}", path.display()))?;
        Ok(())
    }

    /// Applies every entry to `state`.
    ///
    /// Entries are applied independently; rejected ones are returned and do
    /// not stop the rest from being applied.
    pub fn apply_to(&self, state: &mut MappingState) -> Vec<MappingError> {
        let mut errors = Vec::new();
        for entry in &self.mappings {
            let result = match &entry.source {
                Some(source) => state.set_source(&entry.target, source),
                None => state.set(&entry.target, MappingChoice::Ignore),
            };
            if let Err(error) = result {
                errors.push(error);
            }
        }
        errors
    }

    fn major_version(&self) -> &str {
        major(&self.version)
    }
}

fn major(version: &str) -> &str {
    version.split('.').next().unwrap_or(version)
}
