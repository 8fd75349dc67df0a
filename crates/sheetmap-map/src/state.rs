//! Mapping state management for interactive mapping workflows.
//!
//! Tracks, for every target column, the matcher's suggestion and the
//! current choice. The state starts with every target set to its suggestion
//! (or ignored when there is none) and is then edited by the user.

use std::collections::BTreeMap;

use sheetmap_model::{ColumnMapping, ColumnName, MappingChoice, Table};
use tracing::debug;

use crate::error::MappingError;
use crate::matcher::ColumnMatcher;

/// How the current choice for a target came about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceStatus {
    /// Mapped to the matcher's suggestion.
    Suggested,
    /// Mapped to a source column the user picked.
    Manual,
    /// Left empty in the output.
    Ignored,
}

/// Summary of mapping counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MappingSummary {
    /// Number of target columns.
    pub total: usize,
    /// Targets mapped to a source column.
    pub mapped: usize,
    /// Targets mapped to a column other than the suggestion.
    pub manual: usize,
    /// Targets left empty.
    pub ignored: usize,
}

/// Current mapping for one pair of source and target tables.
#[derive(Debug, Clone)]
pub struct MappingState {
    targets: Vec<ColumnName>,
    sources: Vec<ColumnName>,
    suggestions: BTreeMap<ColumnName, ColumnName>,
    mapping: ColumnMapping,
}

impl MappingState {
    /// Seeds one entry per target column with the matcher's suggestion.
    pub fn new(targets: &[ColumnName], sources: &[ColumnName], matcher: &ColumnMatcher) -> Self {
        let mut suggestions = BTreeMap::new();
        let mut mapping = ColumnMapping::new();
        for target in targets {
            let suggested = matcher
                .suggest(target.as_str(), sources)
                .and_then(|name| sources.iter().find(|source| source.as_str() == name))
                .cloned();
            debug!(
                target_column = %target,
                suggestion = suggested.as_ref().map_or("-", ColumnName::as_str),
                "initial mapping"
            );
            if let Some(source) = &suggested {
                suggestions.insert(target.clone(), source.clone());
            }
            mapping.insert(target.clone(), MappingChoice::from(suggested));
        }
        Self {
            targets: targets.to_vec(),
            sources: sources.to_vec(),
            suggestions,
            mapping,
        }
    }

    /// Seeds the state from the target template and the source table.
    pub fn from_tables(target: &Table, source: &Table, matcher: &ColumnMatcher) -> Self {
        Self::new(target.columns(), source.columns(), matcher)
    }

    pub fn targets(&self) -> &[ColumnName] {
        &self.targets
    }

    pub fn sources(&self) -> &[ColumnName] {
        &self.sources
    }

    /// Sets the choice for `target`. Last write wins.
    ///
    /// The choice must be [`MappingChoice::Ignore`] or name a source column;
    /// otherwise the state is left untouched and an error is returned.
    pub fn set(&mut self, target: &str, choice: MappingChoice) -> Result<(), MappingError> {
        let target = self.target_name(target)?;
        if let MappingChoice::Source(source) = &choice
            && !self.sources.contains(source)
        {
            return Err(MappingError::SourceNotFound {
                target: target.to_string(),
                source_column: source.to_string(),
            });
        }
        debug!(target_column = %target, choice = %choice, "mapping updated");
        self.mapping.insert(target, choice);
        Ok(())
    }

    /// Maps `target` to the source column called `source`.
    pub fn set_source(&mut self, target: &str, source: &str) -> Result<(), MappingError> {
        let column = self
            .sources
            .iter()
            .find(|column| column.as_str() == source)
            .cloned()
            .ok_or_else(|| MappingError::SourceNotFound {
                target: target.to_string(),
                source_column: source.to_string(),
            })?;
        self.set(target, MappingChoice::Source(column))
    }

    /// Leaves `target` empty in the output.
    pub fn ignore(&mut self, target: &str) -> Result<(), MappingError> {
        self.set(target, MappingChoice::Ignore)
    }

    /// Restores the matcher's suggestion for `target`.
    pub fn reset(&mut self, target: &str) -> Result<(), MappingError> {
        let choice = MappingChoice::from(self.suggestion_for(target).cloned());
        self.set(target, choice)
    }

    pub fn get(&self, target: &str) -> Option<&MappingChoice> {
        self.mapping.get(target)
    }

    /// The full mapping, in target column order.
    pub fn get_all(&self) -> &ColumnMapping {
        &self.mapping
    }

    pub fn into_mapping(self) -> ColumnMapping {
        self.mapping
    }

    pub fn suggestion_for(&self, target: &str) -> Option<&ColumnName> {
        self.suggestions.get(target)
    }

    pub fn status(&self, target: &str) -> Option<ChoiceStatus> {
        let choice = self.mapping.get(target)?;
        Some(match choice {
            MappingChoice::Ignore => ChoiceStatus::Ignored,
            MappingChoice::Source(source) if self.suggestion_for(target) == Some(source) => {
                ChoiceStatus::Suggested
            }
            MappingChoice::Source(_) => ChoiceStatus::Manual,
        })
    }

    pub fn summary(&self) -> MappingSummary {
        let mut summary = MappingSummary {
            total: self.targets.len(),
            ..MappingSummary::default()
        };
        for target in &self.targets {
            match self.status(target.as_str()) {
                Some(ChoiceStatus::Suggested) => summary.mapped += 1,
                Some(ChoiceStatus::Manual) => {
                    summary.mapped += 1;
                    summary.manual += 1;
                }
                Some(ChoiceStatus::Ignored) | None => summary.ignored += 1,
            }
        }
        summary
    }

    fn target_name(&self, target: &str) -> Result<ColumnName, MappingError> {
        self.targets
            .iter()
            .find(|column| column.as_str() == target)
            .cloned()
            .ok_or_else(|| MappingError::TargetNotFound(target.to_string()))
    }
}
