//! End-to-end merge scenarios.

use sheetmerge_core::{merge_with_spec, validate_selection};
use sheetmerge_model::{
    CellValue, ColumnSelection, Dataset, DatasetSide, MergeError, MergeOptions, MergeSpec,
};

fn text(value: &str) -> CellValue {
    CellValue::text(value)
}

fn people() -> Dataset {
    Dataset::from_rows(
        ["id", "name"],
        vec![vec![text("1"), text("Ann")], vec![text("2"), text("Bo")]],
    )
    .expect("lookup dataset")
}

#[test]
fn differently_named_and_typed_keys_join() {
    let target = Dataset::from_rows(
        ["code", "dept"],
        vec![
            vec![CellValue::Number(1.0), text("X")],
            vec![CellValue::Number(3.0), text("Y")],
        ],
    )
    .expect("target dataset");
    let spec = MergeSpec::new(
        ColumnSelection::new("id", ["id", "name"]),
        ColumnSelection::new("code", ["dept"]),
    );

    let outcome = merge_with_spec(&people(), &target, &spec).expect("merge");

    assert_eq!(outcome.table.columns(), ["id", "name", "dept"]);
    assert_eq!(
        outcome.table.rows(),
        [
            vec![text("1"), text("Ann"), text("X")],
            vec![text("2"), text("Bo"), CellValue::Missing],
        ]
    );
    assert_eq!(outcome.stats.unmatched_lookup_rows, 1);
}

#[test]
fn duplicate_target_keys_fan_out() {
    let target = Dataset::from_rows(
        ["code", "dept"],
        vec![
            vec![CellValue::Number(1.0), text("X")],
            vec![CellValue::Number(1.0), text("Z")],
        ],
    )
    .expect("target dataset");
    let spec = MergeSpec::new(
        ColumnSelection::new("id", ["id", "name"]),
        ColumnSelection::new("code", ["dept"]),
    );

    let outcome = merge_with_spec(&people(), &target, &spec).expect("merge");

    let ann_rows: Vec<_> = outcome
        .table
        .rows()
        .iter()
        .filter(|row| row[0] == text("1"))
        .collect();
    assert_eq!(ann_rows.len(), 2);
    assert_eq!(ann_rows[0][2], text("X"));
    assert_eq!(ann_rows[1][2], text("Z"));
    assert_eq!(outcome.table.height(), 3);
}

#[test]
fn absent_target_column_stops_the_merge() {
    let target = Dataset::from_rows(["code", "dept"], Vec::new()).expect("target dataset");
    let spec = MergeSpec::new(
        ColumnSelection::new("id", ["id"]),
        ColumnSelection::new("code", ["zzz"]),
    );

    let err = merge_with_spec(&people(), &target, &spec).expect_err("zzz is absent");

    assert_eq!(
        err,
        MergeError::MissingOutputColumns {
            side: DatasetSide::Target,
            names: vec!["zzz".to_string()],
            available: vec!["code".to_string(), "dept".to_string()],
        }
    );
}

#[test]
fn shared_key_name_with_colliding_column() {
    let target = Dataset::from_rows(
        ["id", "name"],
        vec![vec![text("1"), text("Annabel")]],
    )
    .expect("target dataset");
    let spec = MergeSpec::new(
        ColumnSelection::new("id", ["id", "name"]),
        ColumnSelection::new("id", ["id", "name"]),
    );

    let outcome = merge_with_spec(&people(), &target, &spec).expect("merge");

    assert_eq!(outcome.table.columns(), ["id", "name-lookup", "name-target"]);
    assert!(!outcome.table.has_column("name"));
    assert_eq!(outcome.table.value(0, "name-lookup"), Some(&text("Ann")));
    assert_eq!(outcome.table.value(0, "name-target"), Some(&text("Annabel")));
}

#[test]
fn missing_keys_match_through_the_sentinel() {
    let lookup = Dataset::from_rows(
        ["id", "name"],
        vec![vec![CellValue::Missing, text("Nobody")]],
    )
    .expect("lookup dataset");
    let target = Dataset::from_rows(
        ["id", "dept"],
        vec![
            vec![CellValue::Missing, text("Unassigned")],
            vec![text("<blank>"), text("Blank")],
        ],
    )
    .expect("target dataset");
    let selection = (
        ColumnSelection::new("id", ["name"]),
        ColumnSelection::new("id", ["dept"]),
    );

    let default_spec = MergeSpec::new(selection.0.clone(), selection.1.clone());
    let outcome = merge_with_spec(&lookup, &target, &default_spec).expect("merge");
    assert_eq!(outcome.table.value(0, "dept"), Some(&text("Unassigned")));
    assert_eq!(outcome.table.value(0, "id"), Some(&text("nan")));

    // A sentinel equal to a real key makes the two indistinguishable.
    let custom_spec = MergeSpec::new(selection.0, selection.1)
        .with_options(MergeOptions::default().with_missing_key_sentinel("<blank>"));
    let outcome = merge_with_spec(&lookup, &target, &custom_spec).expect("merge");
    assert_eq!(outcome.table.height(), 2);
}

#[test]
fn target_column_named_like_lookup_key_survives() {
    let target = Dataset::from_rows(
        ["code", "id", "dept"],
        vec![vec![CellValue::Number(2.0), text("legacy-7"), text("Y")]],
    )
    .expect("target dataset");
    let spec = MergeSpec::new(
        ColumnSelection::new("id", ["id", "name"]),
        ColumnSelection::new("code", ["id", "dept"]),
    );

    let outcome = merge_with_spec(&people(), &target, &spec).expect("merge");

    assert_eq!(outcome.table.columns(), ["id", "name", "id-target", "dept"]);
    assert_eq!(outcome.table.value(1, "id-target"), Some(&text("legacy-7")));
    assert_eq!(outcome.table.value(0, "id-target"), Some(&CellValue::Missing));
}

#[test]
fn validator_reports_without_merging() {
    let ds = people();
    assert!(validate_selection(&ds, DatasetSide::Lookup, &ColumnSelection::new("id", ["name"])).is_ok());
    let err = validate_selection(
        &ds,
        DatasetSide::Lookup,
        &ColumnSelection::new("id", ["name", "zzz"]),
    )
    .expect_err("zzz is absent");
    assert_eq!(err.available_columns(), ["id".to_string(), "name".to_string()]);
}
