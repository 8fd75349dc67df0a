//! Scalar cell values.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single table cell.
///
/// Typed variants are only produced when rendering them gives back the exact
/// source text, so a value read from a file always writes back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    #[default]
    Missing,
    Integer(i64),
    Float(f64),
    Date(NaiveDate),
    Text(String),
}

impl CellValue {
    /// Interprets raw field text. Only the empty string is
    /// [`CellValue::Missing`]; whitespace is kept as text.
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            return Self::Missing;
        }
        if let Ok(value) = raw.parse::<i64>()
            && value.to_string() == raw
        {
            return Self::Integer(value);
        }
        if let Ok(value) = raw.parse::<f64>()
            && value.is_finite()
            && value.to_string() == raw
        {
            return Self::Float(value);
        }
        if let Ok(value) = NaiveDate::parse_from_str(raw, DATE_FORMAT)
            && value.format(DATE_FORMAT).to_string() == raw
        {
            return Self::Date(value);
        }
        Self::Text(raw.to_string())
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Short type label used in previews.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Date(_) => "date",
            Self::Text(_) => "text",
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => Ok(()),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Date(v) => write!(f, "{}", v.format(DATE_FORMAT)),
            Self::Text(v) => f.write_str(v),
        }
    }
}
