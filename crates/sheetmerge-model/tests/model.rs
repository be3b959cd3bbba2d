//! Tests for sheetmerge-model types.

use sheetmerge_model::{
    CellValue, ColumnSelection, DatasetSide, MergeError, MergeOptions, MergeSpec,
};

#[test]
fn merge_spec_round_trips_through_json() {
    let spec = MergeSpec::new(
        ColumnSelection::new("id", ["id", "name"]),
        ColumnSelection::new("code", ["dept"]),
    )
    .with_options(MergeOptions::default().with_missing_key_sentinel("<none>"));
    let json = serde_json::to_string(&spec).expect("serialize spec");
    let round: MergeSpec = serde_json::from_str(&json).expect("deserialize spec");
    assert_eq!(round, spec);
}

#[test]
fn merge_spec_defaults_options() {
    let json = r#"{
        "lookup": {"key": "id", "columns": ["id", "name"]},
        "target": {"key": "code"}
    }"#;
    let spec: MergeSpec = serde_json::from_str(json).expect("deserialize spec");
    assert_eq!(spec.options.missing_key_sentinel, "nan");
    assert!(spec.target.columns.is_empty());
}

#[test]
fn key_only_selection_lists_key() {
    let selection = ColumnSelection::key_only("id");
    assert_eq!(selection.key, "id");
    assert_eq!(selection.columns, vec!["id".to_string()]);
}

#[test]
fn cell_values_serialize_tagged() {
    let json = serde_json::to_string(&vec![
        CellValue::text("a"),
        CellValue::Number(1.5),
        CellValue::Missing,
    ])
    .expect("serialize cells");
    assert_eq!(
        json,
        r#"[{"kind":"Text","value":"a"},{"kind":"Number","value":1.5},{"kind":"Missing"}]"#
    );
}

#[test]
fn missing_key_error_names_side_and_column() {
    let err = MergeError::MissingKeyColumn {
        side: DatasetSide::Lookup,
        column: "id".to_string(),
        available: vec!["ID".to_string()],
    };
    assert_eq!(
        err.to_string(),
        "key column 'id' was not found in the lookup file"
    );
    assert_eq!(err.available_columns(), ["ID".to_string()]);
}
