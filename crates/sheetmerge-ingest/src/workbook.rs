//! Workbook loading via calamine.
//!
//! The first row of every sheet is its header. Blank header cells are named
//! `Unnamed: N` after their zero-based column position; repeated names are
//! rejected.

use std::io::Cursor;

use calamine::{Data, Range, Reader, open_workbook_auto_from_rs};
use sheetmerge_model::{CellValue, Dataset, Sheet, Workbook};
use tracing::{debug, warn};

use crate::convert::data_to_cell;
use crate::error::{IngestError, Result};
use crate::header::{column_name, ensure_unique_headers};

/// Parse workbook bytes (xlsx, xlsm, xls or ods) into an ordered workbook.
pub fn read_workbook_bytes(bytes: &[u8], name: &str) -> Result<Workbook> {
    let mut book = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec())).map_err(|e| {
        IngestError::WorkbookParse {
            name: name.to_string(),
            message: e.to_string(),
        }
    })?;

    let sheet_names = book.sheet_names();
    if sheet_names.is_empty() {
        return Err(IngestError::EmptyWorkbook {
            name: name.to_string(),
        });
    }

    let mut sheets = Vec::with_capacity(sheet_names.len());
    for sheet_name in sheet_names {
        let range = book
            .worksheet_range(&sheet_name)
            .map_err(|e| IngestError::WorkbookParse {
                name: name.to_string(),
                message: format!("sheet '{sheet_name}': {e}"),
            })?;
        let data = range_to_dataset(&range, &format!("{name} [{sheet_name}]"))?;
        debug!(
            source = name,
            sheet = %sheet_name,
            rows = data.height(),
            columns = data.width(),
            "parsed sheet"
        );
        sheets.push(Sheet::new(sheet_name, data));
    }

    Ok(Workbook::new(sheets)?)
}

/// Convert a sheet range to a dataset.
pub fn range_to_dataset(range: &Range<Data>, name: &str) -> Result<Dataset> {
    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        warn!(source = name, "sheet is empty");
        return Dataset::empty(Vec::new()).map_err(|source| IngestError::Dataset {
            name: name.to_string(),
            source,
        });
    };

    let headers = header_names(header_row, name)?;
    let width = headers.len();
    let data: Vec<Vec<CellValue>> = rows
        .map(|row| {
            let mut cells: Vec<CellValue> = row.iter().map(data_to_cell).collect();
            cells.resize(width, CellValue::Missing);
            cells
        })
        .collect();

    Dataset::new(headers, data).map_err(|source| IngestError::Dataset {
        name: name.to_string(),
        source,
    })
}

fn header_names(row: &[Data], name: &str) -> Result<Vec<String>> {
    let headers: Vec<String> = row
        .iter()
        .enumerate()
        .map(|(index, cell)| match data_to_cell(cell) {
            CellValue::Missing => format!("Unnamed: {index}"),
            value => column_name(&value.to_string(), index),
        })
        .collect();
    ensure_unique_headers(&headers, name)?;
    Ok(headers)
}
