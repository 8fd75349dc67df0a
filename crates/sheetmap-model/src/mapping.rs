//! Target-to-source column mapping.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ColumnName;

/// Label shown for [`MappingChoice::Ignore`].
pub const IGNORE_LABEL: &str = "-- Ignore --";

/// What feeds a target column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "column", rename_all = "snake_case")]
pub enum MappingChoice {
    /// Leave the target column empty.
    Ignore,
    /// Copy values from this source column.
    Source(ColumnName),
}

impl MappingChoice {
    pub fn is_ignore(&self) -> bool {
        matches!(self, Self::Ignore)
    }

    pub fn source(&self) -> Option<&ColumnName> {
        match self {
            Self::Ignore => None,
            Self::Source(column) => Some(column),
        }
    }
}

impl From<Option<ColumnName>> for MappingChoice {
    fn from(value: Option<ColumnName>) -> Self {
        value.map_or(Self::Ignore, Self::Source)
    }
}

impl fmt::Display for MappingChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ignore => f.write_str(IGNORE_LABEL),
            Self::Source(column) => f.write_str(column.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    pub target: ColumnName,
    pub choice: MappingChoice,
}

/// Ordered association from target columns to [`MappingChoice`]s.
///
/// Entries keep the order in which targets were first inserted, which is the
/// target template's column order when built by the mapping store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    entries: Vec<MappingEntry>,
}

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mapping that ignores every given target.
    pub fn ignoring_all<I>(targets: I) -> Self
    where
        I: IntoIterator<Item = ColumnName>,
    {
        let mut mapping = Self::new();
        for target in targets {
            mapping.insert(target, MappingChoice::Ignore);
        }
        mapping
    }

    /// Sets the choice for `target`, returning the previous one.
    pub fn insert(&mut self, target: ColumnName, choice: MappingChoice) -> Option<MappingChoice> {
        match self.entries.iter_mut().find(|entry| entry.target == target) {
            Some(entry) => Some(std::mem::replace(&mut entry.choice, choice)),
            None => {
                self.entries.push(MappingEntry { target, choice });
                None
            }
        }
    }

    pub fn get(&self, target: &str) -> Option<&MappingChoice> {
        self.entries
            .iter()
            .find(|entry| entry.target.as_str() == target)
            .map(|entry| &entry.choice)
    }

    /// The source column mapped to `target`, if any.
    pub fn source_for(&self, target: &str) -> Option<&ColumnName> {
        self.get(target).and_then(MappingChoice::source)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MappingEntry> {
        self.entries.iter()
    }

    pub fn targets(&self) -> impl Iterator<Item = &ColumnName> {
        self.entries.iter().map(|entry| &entry.target)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
