//! Line-based review of a mapping on the terminal.
//!
//! For every target column the prompt lists `0) -- Ignore --` followed by
//! the numbered source columns and reads one answer:
//!
//! - empty line: keep the current choice
//! - a number: pick that option
//! - an exact source column name: pick that column
//! - `-` or `ignore`: ignore the target
//!
//! Anything else is reported and asked again. End of input keeps the current
//! choice for every remaining target.

use std::io::{self, BufRead, Write};

use sheetmap_map::{ChoiceStatus, MappingState};
use sheetmap_model::{ColumnName, IGNORE_LABEL, MappingChoice};
use tracing::debug;

/// What the review did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReviewOutcome {
    /// Targets the user answered for.
    pub reviewed: usize,
    /// Answers that changed the current choice.
    pub changed: usize,
    /// False when input ended before the last target.
    pub completed: bool,
}

/// A parsed answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Keep,
    Choose(MappingChoice),
    Invalid(String),
}

/// Interprets one input line against the numbered `sources`.
pub fn parse_answer(line: &str, sources: &[ColumnName]) -> Answer {
    let raw = line.trim_end_matches(['\r', '\n']);
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Answer::Keep;
    }
    if let Ok(number) = trimmed.parse::<usize>() {
        return match number {
            0 => Answer::Choose(MappingChoice::Ignore),
            n => match sources.get(n - 1) {
                Some(source) => Answer::Choose(MappingChoice::Source(source.clone())),
                None => Answer::Invalid(format!(
                    "no option {n}; choose 0 to {}",
                    sources.len()
                )),
            },
        };
    }
    if let Some(source) = sources
        .iter()
        .find(|source| source.as_str() == raw || source.as_str() == trimmed)
    {
        return Answer::Choose(MappingChoice::Source(source.clone()));
    }
    if trimmed == "-" || trimmed.eq_ignore_ascii_case("ignore") || trimmed == IGNORE_LABEL {
        return Answer::Choose(MappingChoice::Ignore);
    }
    Answer::Invalid(format!("'{trimmed}' is not a source column"))
}

/// Walks through every target column of `state`, reading answers from
/// `input` and writing the menu to `output`.
pub fn review_mapping<R, W>(
    state: &mut MappingState,
    mut input: R,
    mut output: W,
) -> io::Result<ReviewOutcome>
where
    R: BufRead,
    W: Write,
{
    let targets = state.targets().to_vec();
    let sources = state.sources().to_vec();
    let mut outcome = ReviewOutcome::default();
    let mut line = String::new();

    for (position, target) in targets.iter().enumerate() {
        write_menu(&mut output, state, target, position + 1, targets.len(), &sources)?;
        loop {
            write!(output, "choice [enter keeps current]: ")?;
            output.flush()?;
            line.clear();
            if input.read_line(&mut line)? == 0 {
                writeln!(output)?;
                debug!(remaining = targets.len() - position, "input ended, keeping defaults");
                return Ok(outcome);
            }
            match parse_answer(&line, &sources) {
                Answer::Keep => break,
                Answer::Choose(choice) => {
                    let changed = state.get(target.as_str()) != Some(&choice);
                    match state.set(target.as_str(), choice) {
                        Ok(()) => {
                            outcome.changed += usize::from(changed);
                            break;
                        }
                        Err(error) => writeln!(output, "  {error}")?,
                    }
                }
                Answer::Invalid(message) => writeln!(output, "  {message}")?,
            }
        }
        outcome.reviewed += 1;
    }

    outcome.completed = true;
    Ok(outcome)
}

fn write_menu<W: Write>(
    output: &mut W,
    state: &MappingState,
    target: &ColumnName,
    position: usize,
    total: usize,
    sources: &[ColumnName],
) -> io::Result<()> {
    writeln!(output)?;
    writeln!(output, "[{position}/{total}] {target}")?;
    let current = state
        .get(target.as_str())
        .map_or_else(|| IGNORE_LABEL.to_string(), ToString::to_string);
    match state.status(target.as_str()) {
        Some(ChoiceStatus::Suggested) => writeln!(output, "  current: {current} (suggested)")?,
        Some(ChoiceStatus::Manual) => writeln!(output, "  current: {current} (manual)")?,
        Some(ChoiceStatus::Ignored) | None => writeln!(output, "  current: {current}")?,
    }
    writeln!(output, "  0) {IGNORE_LABEL}")?;
    for (idx, source) in sources.iter().enumerate() {
        writeln!(output, "  {}) {source}", idx + 1)?;
    }
    Ok(())
}
