//! Column matching and mapping state for interactive column alignment.
//!
//! - [`ColumnMatcher`] proposes a source column for a target column using a
//!   sequence-similarity ratio on the literal column names.
//! - [`MappingState`] holds the current choice for every target column,
//!   seeded with the matcher's suggestions and edited by the user.
//! - [`MappingFile`] saves and re-applies a set of choices as JSON.
//!
//! # Example
//!
//! ```ignore
//! use sheetmap_map::{ColumnMatcher, MappingState};
//! use sheetmap_model::MappingChoice;
//!
//! let matcher = ColumnMatcher::default();
//! let mut state = MappingState::from_tables(&target, &source, &matcher);
//!
//! // Override one suggestion, drop another column
//! state.set_source("Email Address", "Email")?;
//! state.ignore("Full Name")?;
//!
//! let mapping = state.get_all();
//! ```

mod error;
mod file;
mod matcher;
mod state;

pub use error::MappingError;
pub use file::{MAPPING_FILE_VERSION, MappingFile, MappingFileEntry};
pub use matcher::{Candidate, ColumnMatcher, DEFAULT_MIN_SIMILARITY, MatchOptions, suggest};
pub use state::{ChoiceStatus, MappingState, MappingSummary};
