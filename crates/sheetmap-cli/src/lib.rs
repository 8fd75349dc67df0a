//! CLI library components for sheetmap.

pub mod logging;
pub mod prompt;
pub mod session;
