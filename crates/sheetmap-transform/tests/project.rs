//! Projection scenarios and invariants.

use proptest::prelude::*;
use sheetmap_model::{CellValue, ColumnMapping, ColumnName, MappingChoice, Table};
use sheetmap_transform::project;

fn name(value: &str) -> ColumnName {
    ColumnName::new(value).unwrap()
}

fn text(value: &str) -> CellValue {
    CellValue::Text(value.to_string())
}

fn contacts() -> Table {
    let mut table = Table::with_headers(["First Name", "Last Name", "Email"]).unwrap();
    table
        .push_row(vec![text("Ann"), text("Lee"), text("a@x.com")])
        .unwrap();
    table
        .push_row(vec![text("Bo"), text("Kim"), CellValue::Missing])
        .unwrap();
    table
}

#[test]
fn ignored_target_is_empty_and_mapped_target_is_copied() {
    let source = contacts();
    let targets = vec![name("Full Name"), name("Email Address")];
    let mut mapping = ColumnMapping::new();
    mapping.insert(name("Full Name"), MappingChoice::Ignore);
    mapping.insert(name("Email Address"), MappingChoice::Source(name("Email")));

    let output = project(&source, &mapping, &targets).expect("project");

    let columns: Vec<&str> = output.column_names().collect();
    assert_eq!(columns, vec!["Full Name", "Email Address"]);
    let first = &output.rows()[0];
    assert_eq!(output.cell(first, "Full Name"), Some(&CellValue::Missing));
    assert_eq!(output.cell(first, "Email Address"), Some(&text("a@x.com")));
    assert_eq!(output.rows()[1].cells(), &[CellValue::Missing, CellValue::Missing]);
}

#[test]
fn target_order_wins_over_source_order() {
    let source = contacts();
    let targets = vec![name("Mail"), name("Surname"), name("Given")];
    let mut mapping = ColumnMapping::new();
    mapping.insert(name("Given"), MappingChoice::Source(name("First Name")));
    mapping.insert(name("Surname"), MappingChoice::Source(name("Last Name")));
    mapping.insert(name("Mail"), MappingChoice::Source(name("Email")));

    let output = project(&source, &mapping, &targets).expect("project");

    assert_eq!(
        output.rows()[0].cells(),
        &[text("a@x.com"), text("Lee"), text("Ann")]
    );
}

#[test]
fn stale_and_unlisted_targets_are_empty() {
    let source = contacts();
    let targets = vec![name("Phone"), name("Notes")];
    let mut mapping = ColumnMapping::new();
    mapping.insert(name("Phone"), MappingChoice::Source(name("Mobile")));

    let output = project(&source, &mapping, &targets).expect("project");

    assert_eq!(output.row_count(), 2);
    for row in output.rows() {
        assert!(row.cells().iter().all(CellValue::is_missing));
    }
}

#[test]
fn same_source_column_can_feed_several_targets() {
    let source = contacts();
    let targets = vec![name("A"), name("B")];
    let mut mapping = ColumnMapping::new();
    mapping.insert(name("A"), MappingChoice::Source(name("Email")));
    mapping.insert(name("B"), MappingChoice::Source(name("Email")));

    let output = project(&source, &mapping, &targets).expect("project");

    assert_eq!(output.rows()[0].cells(), &[text("a@x.com"), text("a@x.com")]);
}

#[test]
fn empty_source_gives_header_only_output() {
    let source = Table::with_headers(["Email"]).unwrap();
    let targets = vec![name("Email Address")];
    let mut mapping = ColumnMapping::new();
    mapping.insert(name("Email Address"), MappingChoice::Source(name("Email")));

    let output = project(&source, &mapping, &targets).expect("project");

    assert_eq!(output.column_count(), 1);
    assert!(output.is_empty());
}

#[test]
fn inputs_are_not_modified() {
    let source = contacts();
    let before = source.clone();
    let mut mapping = ColumnMapping::new();
    mapping.insert(name("X"), MappingChoice::Source(name("Email")));
    let mapping_before = mapping.clone();

    let _ = project(&source, &mapping, &[name("X")]).expect("project");

    assert_eq!(source, before);
    assert_eq!(mapping, mapping_before);
}

/// Source table with columns `s0..sN` and integer cells.
fn source_strategy() -> impl Strategy<Value = Table> {
    (1usize..6, 0usize..12).prop_flat_map(|(width, height)| {
        proptest::collection::vec(proptest::collection::vec(any::<Option<i64>>(), width), height)
            .prop_map(move |rows| {
                let mut table = Table::with_headers((0..width).map(|i| format!("s{i}"))).unwrap();
                for row in rows {
                    let cells = row
                        .into_iter()
                        .map(|v| v.map_or(CellValue::Missing, CellValue::Integer))
                        .collect();
                    table.push_row(cells).unwrap();
                }
                table
            })
    })
}

/// Target columns `t0..tN`, each ignored or mapped to `sK` (possibly stale).
fn mapping_strategy() -> impl Strategy<Value = (Vec<ColumnName>, ColumnMapping)> {
    proptest::collection::vec(proptest::option::of(0usize..8), 1..6).prop_map(|choices| {
        let targets: Vec<ColumnName> = (0..choices.len())
            .map(|i| ColumnName::new(format!("t{i}")).unwrap())
            .collect();
        let mut mapping = ColumnMapping::new();
        for (target, choice) in targets.iter().rev().zip(choices.iter().rev()) {
            let choice = choice.map_or(MappingChoice::Ignore, |k| {
                MappingChoice::Source(ColumnName::new(format!("s{k}")).unwrap())
            });
            mapping.insert(target.clone(), choice);
        }
        (targets, mapping)
    })
}

proptest! {
    #[test]
    fn output_columns_equal_target_columns(
        source in source_strategy(),
        (targets, mapping) in mapping_strategy(),
    ) {
        let output = project(&source, &mapping, &targets).unwrap();
        prop_assert_eq!(output.columns(), targets.as_slice());
    }

    #[test]
    fn output_row_count_equals_source(
        source in source_strategy(),
        (targets, mapping) in mapping_strategy(),
    ) {
        let output = project(&source, &mapping, &targets).unwrap();
        prop_assert_eq!(output.row_count(), source.row_count());
    }

    #[test]
    fn ignored_columns_are_always_empty(
        source in source_strategy(),
        (targets, mapping) in mapping_strategy(),
    ) {
        let output = project(&source, &mapping, &targets).unwrap();
        for (idx, target) in targets.iter().enumerate() {
            if mapping.get(target.as_str()) == Some(&MappingChoice::Ignore) {
                for row in output.rows() {
                    prop_assert_eq!(row.get(idx), Some(&CellValue::Missing));
                }
            }
        }
    }

    #[test]
    fn mapped_cells_copy_the_source(
        source in source_strategy(),
        (targets, mapping) in mapping_strategy(),
    ) {
        let output = project(&source, &mapping, &targets).unwrap();
        for (idx, target) in targets.iter().enumerate() {
            let Some(column) = mapping.source_for(target.as_str()) else {
                continue;
            };
            for (out_row, src_row) in output.rows().iter().zip(source.rows()) {
                let expected = source
                    .cell(src_row, column.as_str())
                    .cloned()
                    .unwrap_or(CellValue::Missing);
                prop_assert_eq!(row_value(out_row, idx), expected);
            }
        }
    }

    #[test]
    fn projection_is_idempotent(
        source in source_strategy(),
        (targets, mapping) in mapping_strategy(),
    ) {
        let first = project(&source, &mapping, &targets).unwrap();
        let second = project(&source, &mapping, &targets).unwrap();
        prop_assert_eq!(first, second);
    }
}

fn row_value(row: &sheetmap_model::Row, idx: usize) -> CellValue {
    row.get(idx).cloned().unwrap_or_default()
}
