//! XLSX serialization with rust_xlsxwriter.

use rust_xlsxwriter::{Format, Workbook};
use sheetmerge_model::{CellValue, Dataset, format_number};

use crate::error::{OutputError, Result};

/// Name of the single worksheet in an exported workbook.
pub const RESULT_SHEET_NAME: &str = "Result";

/// Worksheet grid limits (rows include the header).
const MAX_ROWS: usize = 1_048_576;
const MAX_COLUMNS: usize = 16_384;

/// Serialize a dataset as a one-sheet workbook with a bold header row.
///
/// Numbers are numeric cells, text is string cells, missing cells stay blank.
pub fn write_xlsx(dataset: &Dataset) -> Result<Vec<u8>> {
    check_limits(dataset)?;

    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name(RESULT_SHEET_NAME)?;

    for (col, name) in dataset.columns().iter().enumerate() {
        sheet.write_string_with_format(0, grid_col(col), name, &header)?;
    }

    for (idx, row) in dataset.rows().iter().enumerate() {
        let row_num = grid_row(idx + 1);
        for (col, cell) in row.iter().enumerate() {
            let col_num = grid_col(col);
            match cell {
                CellValue::Text(text) => {
                    sheet.write_string(row_num, col_num, text)?;
                }
                CellValue::Number(value) if value.is_finite() => {
                    sheet.write_number(row_num, col_num, *value)?;
                }
                CellValue::Number(value) => {
                    sheet.write_string(row_num, col_num, format_number(*value))?;
                }
                CellValue::Missing => {}
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn check_limits(dataset: &Dataset) -> Result<()> {
    if dataset.height() + 1 > MAX_ROWS {
        return Err(OutputError::TooLarge {
            what: "rows",
            count: dataset.height(),
            max: MAX_ROWS - 1,
        });
    }
    if dataset.width() > MAX_COLUMNS {
        return Err(OutputError::TooLarge {
            what: "columns",
            count: dataset.width(),
            max: MAX_COLUMNS,
        });
    }
    Ok(())
}

// Callers stay within the limits checked above.
fn grid_row(idx: usize) -> u32 {
    u32::try_from(idx).unwrap_or(u32::MAX)
}

fn grid_col(idx: usize) -> u16 {
    u16::try_from(idx).unwrap_or(u16::MAX)
}
