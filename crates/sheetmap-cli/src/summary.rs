use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use sheetmap_map::{ChoiceStatus, MappingState};
use sheetmap_model::{CellValue, IGNORE_LABEL, MappingChoice};

use crate::types::{MapResult, PreviewResult, ScoredColumn, SuggestResult};

pub fn print_preview(result: &PreviewResult) {
    println!("File: {}", result.path.display());
    println!(
        "Rows: {} ({} columns)",
        result.total_rows,
        result.head.column_count()
    );
    let mut table = Table::new();
    table.set_header(result.head.column_names().map(header_cell));
    apply_table_style(&mut table);
    for row in result.head.rows() {
        table.add_row(row.cells().iter().map(value_cell));
    }
    println!("{table}");
    if result.head.row_count() < result.total_rows {
        println!(
            "Showing first {} of {} rows",
            result.head.row_count(),
            result.total_rows
        );
    }
}

pub fn print_suggestions(result: &SuggestResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Target"),
        header_cell("Suggestion"),
        header_cell("Score"),
        header_cell("Alternatives"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for row in &result.rows {
        let (suggestion, score) = match &row.suggestion {
            Some(scored) => (
                Cell::new(&scored.column).fg(Color::Green),
                Cell::new(percent(scored.score)),
            ),
            None => (dim_cell(IGNORE_LABEL), dim_cell("-")),
        };
        table.add_row(vec![
            target_cell(&row.target),
            suggestion,
            score,
            alternatives_cell(&row.alternatives),
        ]);
    }
    println!("{table}");
    println!("Minimum similarity: {}", percent(result.threshold));
    if let Some(path) = &result.saved_mapping {
        println!("Mapping saved: {}", path.display());
    }
}

pub fn print_map_result(result: &MapResult) {
    print_mapping_table(&result.state);
    let summary = result.state.summary();
    println!(
        "Targets: {} | mapped: {} (manual: {}) | ignored: {}",
        summary.total, summary.mapped, summary.manual, summary.ignored
    );
    if let Some(path) = &result.saved_mapping {
        println!("Mapping saved: {}", path.display());
    }
    match &result.output {
        Some(output) => println!(
            "Output: {} ({}, {} rows, {} columns)",
            output.path.display(),
            output.mime_type,
            output.rows,
            output.columns
        ),
        None => println!("Output: not written (dry run)"),
    }
    if !result.problems.is_empty() {
        eprintln!("Skipped edits:");
        for problem in &result.problems {
            eprintln!("- {problem}");
        }
    }
}

fn print_mapping_table(state: &MappingState) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Target"),
        header_cell("Source"),
        header_cell("Status"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    for entry in state.get_all().iter() {
        let source = match &entry.choice {
            MappingChoice::Source(column) => Cell::new(column),
            MappingChoice::Ignore => dim_cell(IGNORE_LABEL),
        };
        table.add_row(vec![
            target_cell(entry.target.as_str()),
            source,
            status_cell(state.status(entry.target.as_str())),
        ]);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn status_cell(status: Option<ChoiceStatus>) -> Cell {
    match status {
        Some(ChoiceStatus::Suggested) => Cell::new("suggested").fg(Color::Green),
        Some(ChoiceStatus::Manual) => Cell::new("manual")
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold),
        Some(ChoiceStatus::Ignored) | None => dim_cell("ignored"),
    }
}

fn alternatives_cell(alternatives: &[ScoredColumn]) -> Cell {
    if alternatives.is_empty() {
        return dim_cell("-");
    }
    let text = alternatives
        .iter()
        .map(|alt| format!("{} ({})", alt.column, percent(alt.score)))
        .collect::<Vec<_>>()
        .join(", ");
    Cell::new(text)
}

fn value_cell(value: &CellValue) -> Cell {
    if value.is_missing() {
        dim_cell("-")
    } else {
        Cell::new(value)
    }
}

fn percent(score: f64) -> String {
    format!("{:.0}%", score * 100.0)
}

fn target_cell(name: &str) -> Cell {
    Cell::new(name)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
