use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};
use sheetmap_cli::prompt::review_mapping;
use sheetmap_cli::session::{Session, SessionError};
use sheetmap_ingest::{InputFormat, read_table};
use sheetmap_map::{ColumnMatcher, MappingFile, MappingState, MatchOptions};
use sheetmap_model::{ColumnName, Delimiter};
use sheetmap_output::{mime_type, write_table};
use tracing::{info, warn};

use crate::cli::{InputArgs, MapArgs, PreviewArgs, SuggestArgs};
use crate::types::{
    MapResult, OutputInfo, PreviewResult, ScoredColumn, SuggestResult, SuggestionRow,
};

pub fn run_preview(args: &PreviewArgs) -> Result<PreviewResult> {
    let table = read_table(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    Ok(PreviewResult {
        path: args.file.clone(),
        head: table.head(args.rows),
        total_rows: table.row_count(),
    })
}

pub fn run_suggest(args: &SuggestArgs) -> Result<SuggestResult> {
    let mut session = open_session(&args.inputs)?;
    let matcher = *session.matcher();
    let state: &MappingState = session.init_mapping()?;
    let rows = state
        .targets()
        .iter()
        .map(|target| suggestion_row(&matcher, state, target, args.alternatives))
        .collect();

    if let Some(path) = &args.save_mapping {
        MappingFile::from_mapping(state.get_all()).save(path)?;
        info!(path = %path.display(), "mapping saved");
    }

    Ok(SuggestResult {
        rows,
        threshold: matcher.options().min_similarity,
        saved_mapping: args.save_mapping.clone(),
    })
}

pub fn run_map(args: &MapArgs) -> Result<MapResult> {
    run_map_with(args, io::stdin().lock(), io::stderr().lock())
}

/// Runs `map` with the interactive review reading `prompt_in` and writing
/// `prompt_out`.
///
/// Edits apply in order: mapping file, `--set`, `--ignore`, then the review,
/// so a later step overrides an earlier one for the same target.
pub fn run_map_with<R, W>(args: &MapArgs, prompt_in: R, prompt_out: W) -> Result<MapResult>
where
    R: BufRead,
    W: Write,
{
    if InputFormat::from_path(&args.output) == InputFormat::Workbook {
        bail!(
            "cannot write {}: output is CSV or TSV text",
            args.output.display()
        );
    }
    let mut session = open_session(&args.inputs)?;
    let state = session.init_mapping()?;
    let mut problems = Vec::new();

    if let Some(path) = &args.mapping {
        let file = MappingFile::load(path)?;
        for error in file.apply_to(state) {
            warn!(path = %path.display(), %error, "mapping file entry skipped");
            problems.push(format!("{}: {error}", path.display()));
        }
    }
    for assignment in &args.set {
        if let Err(error) = state.set_source(&assignment.target, &assignment.source) {
            warn!(%error, "--set skipped");
            problems.push(format!("--set {}={}: {error}", assignment.target, assignment.source));
        }
    }
    for target in &args.ignore {
        if let Err(error) = state.ignore(target) {
            warn!(%error, "--ignore skipped");
            problems.push(format!("--ignore {target}: {error}"));
        }
    }
    if args.interactive {
        let outcome =
            review_mapping(state, prompt_in, prompt_out).context("Interactive review failed")?;
        info!(
            reviewed = outcome.reviewed,
            changed = outcome.changed,
            completed = outcome.completed,
            "interactive review finished"
        );
    }
    let state = state.clone();

    if let Some(path) = &args.save_mapping {
        MappingFile::from_mapping(state.get_all()).save(path)?;
        info!(path = %path.display(), "mapping saved");
    }

    let output = if args.dry_run {
        info!("dry run, output not written");
        None
    } else {
        let table = session.generate()?;
        write_table(&table, &args.output)
            .with_context(|| format!("Failed to write {}", args.output.display()))?;
        Some(OutputInfo {
            path: args.output.clone(),
            mime_type: mime_type(Delimiter::from_path(&args.output)),
            rows: table.row_count(),
            columns: table.column_count(),
        })
    };

    Ok(MapResult {
        state,
        problems,
        output,
        saved_mapping: args.save_mapping.clone(),
    })
}

/// Loads both inputs. Nothing is read unless both paths were given.
fn open_session(inputs: &InputArgs) -> Result<Session> {
    let (Some(source), Some(target)) = (&inputs.source, &inputs.target) else {
        return Err(SessionError::MissingInputs {
            missing_source: inputs.source.is_none(),
            missing_target: inputs.target.is_none(),
        }
        .into());
    };
    let mut session = Session::new(MatchOptions {
        min_similarity: inputs.threshold,
    });
    session.load_source(source)?;
    session.load_target(target)?;
    Ok(session)
}

fn suggestion_row(
    matcher: &ColumnMatcher,
    state: &MappingState,
    target: &ColumnName,
    alternatives: usize,
) -> SuggestionRow {
    let ranked = matcher.score_all(target.as_str(), state.sources());
    let suggested = state.suggestion_for(target.as_str());
    let suggestion = suggested.and_then(|name| {
        ranked
            .iter()
            .find(|candidate| candidate.column == name.as_str())
            .map(|candidate| ScoredColumn {
                column: candidate.column.to_string(),
                score: candidate.score,
            })
    });
    let alternatives = ranked
        .iter()
        .filter(|candidate| suggested.is_none_or(|name| name.as_str() != candidate.column))
        .filter(|candidate| matcher.accepts(candidate.score))
        .take(alternatives)
        .map(|candidate| ScoredColumn {
            column: candidate.column.to_string(),
            score: candidate.score,
        })
        .collect();
    SuggestionRow {
        target: target.to_string(),
        suggestion,
        alternatives,
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::Cursor;
    use std::path::{Path, PathBuf};

    use sheetmap_map::{DEFAULT_MIN_SIMILARITY, MappingFileEntry};
    use sheetmap_model::MappingChoice;
    use tempfile::TempDir;

    use super::*;
    use crate::cli::Assignment;

    struct Fixture {
        dir: TempDir,
        source: PathBuf,
        target: PathBuf,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let source = dir.path().join("people.csv");
            fs::write(
                &source,
                "First Name,Last Name,Email\nAnn,Lee,a@x.com\nBo,Kim,b@y.org\n",
            )
            .unwrap();
            let target = dir.path().join("template.csv");
            fs::write(&target, "Full Name,Email Address,XYZ123\n").unwrap();
            Self { dir, source, target }
        }

        fn path(&self, name: &str) -> PathBuf {
            self.dir.path().join(name)
        }

        fn map_args(&self) -> MapArgs {
            MapArgs {
                inputs: InputArgs {
                    source: Some(self.source.clone()),
                    target: Some(self.target.clone()),
                    threshold: DEFAULT_MIN_SIMILARITY,
                },
                mapping: None,
                set: Vec::new(),
                ignore: Vec::new(),
                interactive: false,
                output: self.path("Mapped_Output.csv"),
                save_mapping: None,
                dry_run: false,
            }
        }
    }

    fn assign(target: &str, source: &str) -> Assignment {
        Assignment {
            target: target.to_string(),
            source: source.to_string(),
        }
    }

    fn source(name: &str) -> MappingChoice {
        MappingChoice::Source(ColumnName::new(name).unwrap())
    }

    fn run(args: &MapArgs) -> MapResult {
        run_map_with(args, Cursor::new(""), io::sink()).unwrap()
    }

    fn write_mapping(path: &Path, entries: &[(&str, Option<&str>)]) {
        let file = MappingFile {
            version: "1.0".to_string(),
            mappings: entries
                .iter()
                .map(|(target, source)| MappingFileEntry {
                    target: target.to_string(),
                    source: source.map(str::to_string),
                })
                .collect(),
        };
        file.save(path).unwrap();
    }

    #[test]
    fn set_overrides_mapping_file_and_ignore_overrides_set() {
        let fixture = Fixture::new();
        let mapping = fixture.path("mapping.json");
        write_mapping(
            &mapping,
            &[("Full Name", Some("Last Name")), ("XYZ123", Some("Last Name"))],
        );
        let mut args = fixture.map_args();
        args.mapping = Some(mapping);
        args.set = vec![assign("Full Name", "First Name"), assign("Email Address", "Last Name")];
        args.ignore = vec!["Email Address".to_string()];

        let result = run(&args);

        assert!(result.problems.is_empty());
        assert_eq!(result.state.get("Full Name"), Some(&source("First Name")));
        assert_eq!(result.state.get("Email Address"), Some(&MappingChoice::Ignore));
        assert_eq!(result.state.get("XYZ123"), Some(&source("Last Name")));
        assert_eq!(
            fs::read_to_string(&args.output).unwrap(),
            "Full Name,Email Address,XYZ123\nAnn,,Lee\nBo,,Kim\n"
        );
    }

    #[test]
    fn review_runs_after_flag_edits() {
        let fixture = Fixture::new();
        let mut args = fixture.map_args();
        args.ignore = vec!["Email Address".to_string(), "Full Name".to_string()];
        args.interactive = true;

        // keep Full Name ignored, pick Email (3) for Email Address, keep XYZ123
        let mut prompt_out = Vec::new();
        let result = run_map_with(&args, Cursor::new("\n3\n\n"), &mut prompt_out).unwrap();

        assert_eq!(result.state.get("Full Name"), Some(&MappingChoice::Ignore));
        assert_eq!(result.state.get("Email Address"), Some(&source("Email")));
        assert!(String::from_utf8(prompt_out).unwrap().contains("[2/3] Email Address"));
        assert_eq!(
            fs::read_to_string(&args.output).unwrap(),
            "Full Name,Email Address,XYZ123\n,a@x.com,\n,b@y.org,\n"
        );
    }

    #[test]
    fn invalid_edits_are_reported_not_fatal() {
        let fixture = Fixture::new();
        let mut args = fixture.map_args();
        args.set = vec![assign("Nope", "Email"), assign("Full Name", "Nope")];
        args.ignore = vec!["Missing Target".to_string()];

        let result = run(&args);

        assert_eq!(result.problems.len(), 3);
        assert!(result.problems[0].starts_with("--set Nope=Email"));
        assert!(result.problems[2].starts_with("--ignore Missing Target"));
        let output = result.output.expect("output written");
        assert_eq!(output.rows, 2);
        assert!(output.path.exists());
    }

    #[test]
    fn dry_run_writes_nothing() {
        let fixture = Fixture::new();
        let mut args = fixture.map_args();
        args.dry_run = true;

        let result = run(&args);

        assert!(result.output.is_none());
        assert!(!args.output.exists());
        assert_eq!(result.state.get("Email Address"), Some(&source("Email")));
    }

    #[test]
    fn tsv_output_reports_tsv_mime_type() {
        let fixture = Fixture::new();
        let mut args = fixture.map_args();
        args.output = fixture.path("out.tsv");

        let result = run(&args);

        let output = result.output.expect("output written");
        assert_eq!(output.mime_type, "text/tab-separated-values");
        assert_eq!(output.columns, 3);
        let written = fs::read_to_string(&args.output).unwrap();
        assert!(written.starts_with("Full Name\tEmail Address\tXYZ123\n"));
    }

    #[test]
    fn workbook_output_is_refused() {
        let fixture = Fixture::new();
        let mut args = fixture.map_args();
        args.output = fixture.path("Mapped_Output.xlsx");

        assert!(run_map_with(&args, Cursor::new(""), io::sink()).is_err());
        assert!(!args.output.exists());
    }

    #[test]
    fn missing_source_is_reported_before_loading_target() {
        let fixture = Fixture::new();
        let mut args = fixture.map_args();
        args.inputs.source = None;
        args.inputs.target = Some(fixture.path("does-not-exist.csv"));

        let error = run_map_with(&args, Cursor::new(""), io::sink()).unwrap_err();

        assert!(matches!(
            error.downcast_ref::<SessionError>(),
            Some(SessionError::MissingInputs {
                missing_source: true,
                missing_target: false,
            })
        ));
        assert!(!args.output.exists());
    }

    #[test]
    fn suggest_lists_ranked_alternatives() {
        let fixture = Fixture::new();
        let args = SuggestArgs {
            inputs: fixture.map_args().inputs,
            alternatives: 2,
            save_mapping: None,
        };

        let result = run_suggest(&args).unwrap();

        let email = &result.rows[1];
        assert_eq!(email.target, "Email Address");
        assert_eq!(
            email.suggestion.as_ref().map(|s| s.column.as_str()),
            Some("Email")
        );
        assert!(email.alternatives.iter().all(|alt| alt.column != "Email"));
        assert!(result.rows[2].suggestion.is_none());
    }
}
