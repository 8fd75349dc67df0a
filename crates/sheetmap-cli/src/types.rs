use std::path::PathBuf;

use sheetmap_map::MappingState;
use sheetmap_model::Table;

#[derive(Debug)]
pub struct PreviewResult {
    pub path: PathBuf,
    pub head: Table,
    pub total_rows: usize,
}

#[derive(Debug)]
pub struct ScoredColumn {
    pub column: String,
    pub score: f64,
}

#[derive(Debug)]
pub struct SuggestionRow {
    pub target: String,
    pub suggestion: Option<ScoredColumn>,
    pub alternatives: Vec<ScoredColumn>,
}

#[derive(Debug)]
pub struct SuggestResult {
    pub rows: Vec<SuggestionRow>,
    pub threshold: f64,
    pub saved_mapping: Option<PathBuf>,
}

#[derive(Debug)]
pub struct OutputInfo {
    pub path: PathBuf,
    pub mime_type: &'static str,
    pub rows: usize,
    pub columns: usize,
}

#[derive(Debug)]
pub struct MapResult {
    pub state: MappingState,
    pub problems: Vec<String>,
    pub output: Option<OutputInfo>,
    pub saved_mapping: Option<PathBuf>,
}
