//! Loading real files from disk.

use std::io::Write;
use std::path::Path;

use sheetmerge_ingest::{IngestError, Source, SourceFormat, read_source};
use sheetmerge_model::CellValue;
use tempfile::TempDir;

fn write_people_workbook(path: &Path) {
    let mut book = rust_xlsxwriter::Workbook::new();

    let people = book.add_worksheet();
    people.set_name("People").unwrap();
    people.write_string(0, 0, "id").unwrap();
    people.write_string(0, 1, "name").unwrap();
    people.write_number(1, 0, 1.0).unwrap();
    people.write_string(1, 1, "Ann").unwrap();
    people.write_number(2, 0, 2.0).unwrap();

    let depts = book.add_worksheet();
    depts.set_name("Depts").unwrap();
    depts.write_string(0, 0, "code").unwrap();
    depts.write_string(0, 1, "dept").unwrap();
    depts.write_string(1, 0, "1").unwrap();
    depts.write_string(1, 1, "X").unwrap();

    book.save(path).unwrap();
}

#[test]
fn workbook_sheets_load_in_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("staff.xlsx");
    write_people_workbook(&path);

    let source = read_source(&path).unwrap();

    assert_eq!(source.format(), SourceFormat::Workbook);
    assert_eq!(source.sheet_names(), vec!["People", "Depts"]);

    let people = source.dataset(Some("People")).unwrap();
    assert_eq!(people.columns(), ["id", "name"]);
    assert_eq!(
        people.rows(),
        [
            vec![CellValue::Number(1.0), CellValue::text("Ann")],
            vec![CellValue::Number(2.0), CellValue::Missing],
        ]
    );

    let Source::Workbook(book) = source else {
        panic!("expected a workbook");
    };
    assert_eq!(book.default_target_sheet("People"), Some("Depts"));
    assert_eq!(book.default_target_sheet("Depts"), Some("People"));
    let (lookup, target) = book.sheet_pair("People", "Depts").unwrap();
    assert_eq!(lookup.height(), 2);
    assert_eq!(target.value(0, "code"), Some(&CellValue::text("1")));
}

#[test]
fn csv_file_loads_as_single_table() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("codes.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "code,dept").unwrap();
    writeln!(file, "1,X").unwrap();
    writeln!(file, "3,Y").unwrap();
    drop(file);

    let ds = read_source(&path).unwrap().into_dataset(None).unwrap();

    assert_eq!(ds.columns(), ["code", "dept"]);
    assert_eq!(ds.value(1, "code"), Some(&CellValue::Number(3.0)));
}

#[test]
fn unsupported_extension_is_rejected_before_reading() {
    let err = read_source(Path::new("missing.json")).unwrap_err();
    assert!(matches!(err, IngestError::UnsupportedFormat { .. }));
}

#[test]
fn workbook_dates_load_as_calendar_text() {
    use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("hires.xlsx");
    let mut book = Workbook::new();
    let sheet = book.add_worksheet();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    let time_format = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");
    sheet.write_string(0, 0, "id").unwrap();
    sheet.write_string(0, 1, "hired").unwrap();
    sheet.write_number(1, 0, 1.0).unwrap();
    sheet
        .write_datetime_with_format(1, 1, &ExcelDateTime::from_ymd(2024, 3, 15).unwrap(), &date_format)
        .unwrap();
    sheet.write_number(2, 0, 2.0).unwrap();
    sheet
        .write_datetime_with_format(
            2,
            1,
            &ExcelDateTime::from_ymd(2023, 12, 1)
                .unwrap()
                .and_hms(9, 30, 0)
                .unwrap(),
            &time_format,
        )
        .unwrap();
    book.save(&path).unwrap();

    let ds = read_source(&path).unwrap().into_dataset(None).unwrap();

    assert_eq!(ds.value(0, "hired"), Some(&CellValue::text("2024-03-15 00:00:00")));
    assert_eq!(ds.value(1, "hired"), Some(&CellValue::text("2023-12-01 09:30:00")));
}
