use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use sheetmerge_core::JoinStats;
use sheetmerge_model::{CellValue, Dataset, MergeError};

use sheetmerge_cli::types::{MergeReport, SourceSummary};

pub fn print_merge_report(report: &MergeReport) {
    let outcome = &report.outcome;
    println!("Lookup: {}", report.lookup_label);
    println!("Target: {}", report.target_label);
    println!("Key: {}", outcome.key);

    let preview = outcome.table.head(report.preview_rows);
    println!("{}", dataset_table(&preview));
    if outcome.table.height() > preview.height() {
        println!(
            "Showing first {} of {} rows.",
            preview.height(),
            outcome.table.height()
        );
    }

    println!("{}", stats_table(&outcome.stats));

    match &report.export {
        Some(export) => println!("Wrote {} ({})", export.path.display(), export.format),
        None if report.dry_run => println!("Dry run: no file written."),
        None => println!("No output file given; use --output to export the result."),
    }
}

pub fn print_source_summary(summary: &SourceSummary) {
    println!("File: {} ({})", summary.path.display(), summary.format);
    if !summary.sheet_names.is_empty() {
        println!("Sheets: {}", summary.sheet_names.join(", "));
    }
    if let Some(sheet) = &summary.sheet {
        println!("Sheet: {sheet}");
    }
    println!(
        "Shape: {} rows x {} columns",
        summary.total_rows,
        summary.preview.width()
    );
    println!("Columns: {}", summary.preview.columns().join(", "));
    println!("{}", dataset_table(&summary.preview));
}

/// Print a failed command to stderr.
pub fn print_error(error: &anyhow::Error) {
    eprintln!("{}", error_report(error));
}

/// The error chain, followed by the real column names when the failure came
/// from the merge itself.
pub fn error_report(error: &anyhow::Error) -> String {
    let report = format!("error: {error:#}");
    let merge_error = error
        .chain()
        .find_map(|cause| cause.downcast_ref::<MergeError>());
    let Some(merge_error) = merge_error else {
        return report;
    };
    if merge_error.available_columns().is_empty() {
        return report;
    }
    let columns = merge_error.available_columns().join(", ");
    match merge_error.side() {
        Some(side) => format!("{report}\navailable columns in the {side}: {columns}"),
        None => format!("{report}\navailable columns: {columns}"),
    }
}

pub fn dataset_table(dataset: &Dataset) -> Table {
    let mut table = Table::new();
    table.set_header(
        dataset
            .columns()
            .iter()
            .map(|name| header_cell(name))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    for row in dataset.rows() {
        table.add_row(row.iter().map(value_cell).collect::<Vec<_>>());
    }
    table
}

fn stats_table(stats: &JoinStats) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Rows"), header_cell("Count")]);
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    let rows = [
        ("Lookup", stats.lookup_rows, None),
        ("Target", stats.target_rows, None),
        ("Matched", stats.matched_lookup_rows, Some(Color::Green)),
        ("Unmatched", stats.unmatched_lookup_rows, Some(Color::Yellow)),
        ("Fanned out", stats.fanned_out_lookup_rows, Some(Color::Yellow)),
        ("Result", stats.output_rows, None),
    ];
    for (label, count, color) in rows {
        table.add_row(vec![Cell::new(label), count_cell(count, color)]);
    }
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn value_cell(value: &CellValue) -> Cell {
    match value {
        CellValue::Text(text) => Cell::new(text),
        CellValue::Number(_) => Cell::new(value).set_alignment(CellAlignment::Right),
        CellValue::Missing => dim_cell(""),
    }
}

fn count_cell(count: usize, color: Option<Color>) -> Cell {
    match color {
        Some(color) if count > 0 => Cell::new(count).fg(color).add_attribute(Attribute::Bold),
        _ => Cell::new(count),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
