//! CLI argument definitions for sheetmap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use sheetmap_map::DEFAULT_MIN_SIMILARITY;
use sheetmap_output::OUTPUT_FILE_NAME;

#[derive(Parser)]
#[command(
    name = "sheetmap",
    version,
    about = "Map the columns of a source spreadsheet onto a target template",
    long_about = "Reshape a source spreadsheet into the column layout of a target template.\n\n\
                  Every target column is matched to the most similar source column name,\n\
                  the suggestions can be edited, and the source rows are exported in the\n\
                  target's column order."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the header and first rows of a file.
    Preview(PreviewArgs),

    /// Show the suggested source column for every target column.
    Suggest(SuggestArgs),

    /// Map, project and write the reshaped file.
    Map(MapArgs),
}

#[derive(Args)]
pub struct PreviewArgs {
    /// File to preview.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Number of rows to show.
    #[arg(long = "rows", default_value_t = 30)]
    pub rows: usize,
}

/// The two input files.
#[derive(Args)]
pub struct InputArgs {
    /// Source dataset (the rows to reshape).
    #[arg(value_name = "SOURCE")]
    pub source: Option<PathBuf>,

    /// Target template (its header defines the output columns).
    #[arg(value_name = "TARGET")]
    pub target: Option<PathBuf>,

    /// Minimum name similarity (0.0 to 1.0) for a suggestion.
    #[arg(long = "threshold", default_value_t = DEFAULT_MIN_SIMILARITY, value_parser = parse_threshold)]
    pub threshold: f64,
}

#[derive(Args)]
pub struct SuggestArgs {
    #[command(flatten)]
    pub inputs: InputArgs,

    /// Number of runner-up source columns to list per target.
    #[arg(long = "alternatives", default_value_t = 2)]
    pub alternatives: usize,

    /// Save the suggested mapping as a JSON mapping file.
    #[arg(long = "save-mapping", value_name = "PATH")]
    pub save_mapping: Option<PathBuf>,
}

#[derive(Args)]
pub struct MapArgs {
    #[command(flatten)]
    pub inputs: InputArgs,

    /// Apply choices from a JSON mapping file.
    #[arg(long = "mapping", value_name = "PATH")]
    pub mapping: Option<PathBuf>,

    /// Map a target column to a source column (repeatable).
    #[arg(long = "set", value_name = "TARGET=SOURCE", value_parser = parse_assignment)]
    pub set: Vec<Assignment>,

    /// Leave a target column empty (repeatable).
    #[arg(long = "ignore", value_name = "TARGET")]
    pub ignore: Vec<String>,

    /// Review every target column on the terminal before writing.
    #[arg(long = "interactive", short = 'i')]
    pub interactive: bool,

    /// Output file, CSV or TSV (`.tsv` writes tab separated values).
    #[arg(long = "output", short = 'o', value_name = "PATH", default_value = OUTPUT_FILE_NAME)]
    pub output: PathBuf,

    /// Save the final mapping as a JSON mapping file.
    #[arg(long = "save-mapping", value_name = "PATH")]
    pub save_mapping: Option<PathBuf>,

    /// Show the mapping without writing the output file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

/// A `TARGET=SOURCE` edit from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub target: String,
    pub source: String,
}

/// Splits on the first `=`; both sides must be non-empty.
pub fn parse_assignment(raw: &str) -> Result<Assignment, String> {
    let (target, source) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected TARGET=SOURCE, got '{raw}'"))?;
    if target.trim().is_empty() || source.trim().is_empty() {
        return Err(format!("expected TARGET=SOURCE, got '{raw}'"));
    }
    Ok(Assignment {
        target: target.to_string(),
        source: source.to_string(),
    })
}

fn parse_threshold(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .parse()
        .map_err(|_| format!("'{raw}' is not a number"))?;
    if !(0.0..=1.0).contains(&value) {
        return Err(format!("threshold must be between 0 and 1, got {value}"));
    }
    Ok(value)
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
