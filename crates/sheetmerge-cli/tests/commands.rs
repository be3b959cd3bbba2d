//! The merge and inspect commands run against files on disk.

use std::fs;
use std::path::Path;

use clap::Parser;
use sheetmerge_cli::cli::{Cli, Command, InspectArgs, MergeArgs};
use sheetmerge_cli::commands::{run_inspect, run_merge};
use sheetmerge_ingest::SourceFormat;
use sheetmerge_model::{CellValue, WorkbookError};
use sheetmerge_output::ExportFormat;
use tempfile::TempDir;

fn merge_args(argv: &[&str]) -> MergeArgs {
    let cli = Cli::try_parse_from(argv).unwrap();
    match cli.command {
        Command::Merge(args) => args,
        Command::Inspect(_) => panic!("expected merge"),
    }
}

fn inspect_args(argv: &[&str]) -> InspectArgs {
    let cli = Cli::try_parse_from(argv).unwrap();
    match cli.command {
        Command::Inspect(args) => args,
        Command::Merge(_) => panic!("expected inspect"),
    }
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

fn write_csv_pair(dir: &Path) {
    fs::write(dir.join("people.csv"), "id,name\n1,Ann\n2,Bo\n3,Cy\n").unwrap();
    fs::write(dir.join("depts.csv"), "code,dept\n1,X\n1,Y\n3,Z\n").unwrap();
}

fn write_staff_workbook(path: &Path) {
    let mut book = rust_xlsxwriter::Workbook::new();

    let people = book.add_worksheet();
    people.set_name("People").unwrap();
    people.write_string(0, 0, "id").unwrap();
    people.write_string(0, 1, "name").unwrap();
    people.write_number(1, 0, 1.0).unwrap();
    people.write_string(1, 1, "Ann").unwrap();
    people.write_number(2, 0, 2.0).unwrap();
    people.write_string(2, 1, "Bo").unwrap();

    let depts = book.add_worksheet();
    depts.set_name("Depts").unwrap();
    depts.write_string(0, 0, "code").unwrap();
    depts.write_string(0, 1, "dept").unwrap();
    depts.write_string(1, 0, "2").unwrap();
    depts.write_string(1, 1, "Y").unwrap();

    book.save(path).unwrap();
}

#[test]
fn csv_pair_merges_and_exports() {
    let dir = TempDir::new().unwrap();
    write_csv_pair(dir.path());
    let lookup = dir.path().join("people.csv");
    let target = dir.path().join("depts.csv");
    let output = dir.path().join("out/merged.csv");

    let report = run_merge(&merge_args(&[
        "sheetmerge",
        "merge",
        "--lookup",
        path_str(&lookup),
        "--target",
        path_str(&target),
        "--lookup-key",
        "id",
        "--target-key",
        "code",
        "--lookup-columns",
        "id,name",
        "--target-columns",
        "dept",
        "-o",
        path_str(&output),
    ]))
    .unwrap();

    let stats = report.outcome.stats;
    assert_eq!(report.outcome.key, "id");
    assert_eq!(stats.lookup_rows, 3);
    assert_eq!(stats.output_rows, 4);
    assert_eq!(stats.matched_lookup_rows, 2);
    assert_eq!(stats.unmatched_lookup_rows, 1);
    assert_eq!(stats.fanned_out_lookup_rows, 1);

    let export = report.export.unwrap();
    assert_eq!(export.path, output);
    assert_eq!(export.format, ExportFormat::Csv);
    insta::assert_snapshot!(fs::read_to_string(&output).unwrap(), @r"
    id,name,dept
    1,Ann,X
    1,Ann,Y
    2,Bo,
    3,Cy,Z
    ");
}

#[test]
fn dry_run_leaves_no_file() {
    let dir = TempDir::new().unwrap();
    write_csv_pair(dir.path());
    let output = dir.path().join("merged.csv");

    let report = run_merge(&merge_args(&[
        "sheetmerge",
        "merge",
        "--lookup",
        path_str(&dir.path().join("people.csv")),
        "--target",
        path_str(&dir.path().join("depts.csv")),
        "--lookup-key",
        "id",
        "--target-key",
        "code",
        "-o",
        path_str(&output),
        "--dry-run",
    ]))
    .unwrap();

    assert!(report.dry_run);
    assert!(report.export.is_none());
    assert_eq!(report.outcome.table.height(), 4);
    assert!(!output.exists());
}

#[test]
fn workbook_merges_first_sheet_with_the_next() {
    let dir = TempDir::new().unwrap();
    let book = dir.path().join("staff.xlsx");
    write_staff_workbook(&book);

    let report = run_merge(&merge_args(&[
        "sheetmerge",
        "merge",
        "--workbook",
        path_str(&book),
        "--lookup-key",
        "id",
        "--target-key",
        "code",
        "--lookup-columns",
        "id,name",
        "--target-columns",
        "dept",
    ]))
    .unwrap();

    assert!(report.lookup_label.ends_with("[People]"));
    assert!(report.target_label.ends_with("[Depts]"));
    assert!(report.export.is_none());

    let table = &report.outcome.table;
    assert_eq!(table.columns(), ["id", "name", "dept"]);
    assert_eq!(table.value(0, "dept"), Some(&CellValue::Missing));
    assert_eq!(table.value(1, "id"), Some(&CellValue::text("2")));
    assert_eq!(table.value(1, "dept"), Some(&CellValue::text("Y")));
}

#[test]
fn unknown_lookup_sheet_is_reported_as_not_found() {
    let dir = TempDir::new().unwrap();
    let book = dir.path().join("staff.xlsx");
    write_staff_workbook(&book);

    let err = run_merge(&merge_args(&[
        "sheetmerge",
        "merge",
        "--workbook",
        path_str(&book),
        "--lookup-sheet",
        "Peeple",
        "--lookup-key",
        "id",
        "--target-key",
        "code",
    ]))
    .unwrap_err();

    let workbook_error = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<WorkbookError>())
        .unwrap();
    assert_eq!(
        workbook_error,
        &WorkbookError::SheetNotFound {
            sheet: "Peeple".to_string(),
            available: vec!["People".to_string(), "Depts".to_string()],
        }
    );
}

#[test]
fn inspect_previews_a_sheet() {
    let dir = TempDir::new().unwrap();
    let book = dir.path().join("staff.xlsx");
    write_staff_workbook(&book);

    let summary = run_inspect(&inspect_args(&[
        "sheetmerge",
        "inspect",
        path_str(&book),
        "--rows",
        "1",
    ]))
    .unwrap();

    assert_eq!(summary.format, SourceFormat::Workbook);
    assert_eq!(summary.sheet_names, vec!["People", "Depts"]);
    assert_eq!(summary.sheet.as_deref(), Some("People"));
    assert_eq!(summary.total_rows, 2);
    assert_eq!(summary.preview.height(), 1);
    assert_eq!(summary.preview.columns(), ["id", "name"]);
}
