//! Fuzzy matching of target column names against source column names.
//!
//! Scores are the normalized Indel similarity of the two names,
//! `2 * LCS / (len_a + len_b)`, computed on the literal characters. The
//! comparison is case-sensitive and does no whitespace folding, so
//! `"Email"` vs `"email"` scores below 1.0.

use std::cmp::Ordering;

use rapidfuzz::distance::indel;
use serde::{Deserialize, Serialize};

/// Minimum similarity a candidate needs to be suggested.
pub const DEFAULT_MIN_SIMILARITY: f64 = 0.3;

/// Absorbs float noise when a score lands exactly on the threshold.
const SCORE_EPSILON: f64 = 1e-9;

/// Matcher configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchOptions {
    /// Candidates scoring below this (0.0 to 1.0) are never suggested.
    pub min_similarity: f64,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            min_similarity: DEFAULT_MIN_SIMILARITY,
        }
    }
}

/// A scored source column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate<'a> {
    /// Source column name.
    pub column: &'a str,
    /// Similarity to the target name (0.0 to 1.0).
    pub score: f64,
}

/// Suggests source columns for target columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnMatcher {
    options: MatchOptions,
}

impl ColumnMatcher {
    pub fn new(options: MatchOptions) -> Self {
        Self { options }
    }

    pub fn with_min_similarity(min_similarity: f64) -> Self {
        Self::new(MatchOptions { min_similarity })
    }

    pub fn options(&self) -> MatchOptions {
        self.options
    }

    /// Similarity of two names on a 0.0 to 1.0 scale.
    pub fn similarity(left: &str, right: &str) -> f64 {
        indel::normalized_similarity(left.chars(), right.chars())
    }

    /// Whether `score` clears the configured threshold.
    pub fn accepts(&self, score: f64) -> bool {
        score + SCORE_EPSILON >= self.options.min_similarity
    }

    /// Scores every candidate against `target`.
    ///
    /// Returns candidates sorted by score (highest first); equal scores keep
    /// their input order.
    pub fn score_all<'a, S: AsRef<str>>(&self, target: &str, candidates: &'a [S]) -> Vec<Candidate<'a>> {
        let mut scored: Vec<Candidate<'a>> = candidates
            .iter()
            .map(|candidate| {
                let column = candidate.as_ref();
                Candidate {
                    column,
                    score: Self::similarity(target, column),
                }
            })
            .collect();
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        scored
    }

    /// Best candidate for `target`, or `None` when nothing clears the
    /// threshold or there are no candidates.
    ///
    /// Among equally scored candidates the earliest one wins.
    pub fn suggest<'a, S: AsRef<str>>(&self, target: &str, candidates: &'a [S]) -> Option<&'a str> {
        let mut best: Option<Candidate<'a>> = None;
        for candidate in candidates {
            let column = candidate.as_ref();
            let score = Self::similarity(target, column);
            if best.is_none_or(|current| score > current.score) {
                best = Some(Candidate { column, score });
            }
        }
        best.filter(|candidate| self.accepts(candidate.score))
            .map(|candidate| candidate.column)
    }
}

/// [`ColumnMatcher::suggest`] with the default threshold.
pub fn suggest<'a, S: AsRef<str>>(target: &str, candidates: &'a [S]) -> Option<&'a str> {
    ColumnMatcher::default().suggest(target, candidates)
}
