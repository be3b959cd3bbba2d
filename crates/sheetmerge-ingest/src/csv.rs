//! CSV loading.
//!
//! The header row is read with the `csv` crate: blank names become
//! `Unnamed: <index>` and repeated names are reported by name. The body is
//! then handed to Polars under the cleaned header, with cell types inferred
//! over the whole file.

use std::io::Cursor;

use polars::prelude::*;
use sheetmerge_model::{CellValue, Dataset};
use tracing::debug;

use crate::convert::any_to_cell;
use crate::error::{IngestError, Result};
use crate::header::{column_name, ensure_unique_headers};

/// Reject byte-order marks of encodings other than UTF-8.
pub fn validate_encoding(bytes: &[u8], name: &str) -> Result<()> {
    let encoding = match bytes {
        [0xFF, 0xFE, ..] => "UTF-16 LE",
        [0xFE, 0xFF, ..] => "UTF-16 BE",
        _ => return Ok(()),
    };
    Err(IngestError::UnsupportedEncoding {
        name: name.to_string(),
        encoding,
    })
}

/// Read and check the header row.
pub fn read_headers(bytes: &[u8], name: &str) -> Result<Vec<String>> {
    header_row(bytes, name).map(|(headers, _)| headers)
}

/// Header names and the byte offset where the first data row starts.
fn header_row(bytes: &[u8], name: &str) -> Result<(Vec<String>, usize)> {
    validate_encoding(bytes, name)?;

    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);
    let record = reader.headers().map_err(|e| csv_error(name, &e))?;

    if record.is_empty() {
        return Err(IngestError::EmptySource {
            name: name.to_string(),
        });
    }

    let headers: Vec<String> = record
        .iter()
        .enumerate()
        .map(|(index, raw)| column_name(raw, index))
        .collect();
    ensure_unique_headers(&headers, name)?;

    let body_start = usize::try_from(reader.position().byte())
        .unwrap_or(bytes.len())
        .min(bytes.len());
    Ok((headers, body_start))
}

/// The data rows of `body` under a rewritten header line.
fn with_header(headers: &[String], body: &[u8], name: &str) -> Result<Vec<u8>> {
    let mut writer = ::csv::Writer::from_writer(Vec::with_capacity(body.len() + 128));
    writer
        .write_record(headers)
        .map_err(|e| csv_error(name, &e))?;
    let mut rebuilt = writer.into_inner().map_err(|e| IngestError::CsvParse {
        name: name.to_string(),
        message: e.error().to_string(),
    })?;
    rebuilt.extend_from_slice(body);
    Ok(rebuilt)
}

fn csv_error(name: &str, err: &::csv::Error) -> IngestError {
    IngestError::CsvParse {
        name: name.to_string(),
        message: err.to_string(),
    }
}

/// Parse CSV bytes into a dataset.
///
/// Empty fields are missing. Whole-number columns become numbers.
pub fn read_csv_bytes(bytes: &[u8], name: &str) -> Result<Dataset> {
    let (headers, body_start) = header_row(bytes, name)?;
    let rebuilt = with_header(&headers, &bytes[body_start..], name)?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .into_reader_with_file_handle(Cursor::new(rebuilt))
        .finish()
        .map_err(|e| IngestError::CsvParse {
            name: name.to_string(),
            message: e.to_string(),
        })?;

    if df.width() != headers.len() {
        return Err(IngestError::CsvParse {
            name: name.to_string(),
            message: format!(
                "expected {} columns from the header, parsed {}",
                headers.len(),
                df.width()
            ),
        });
    }

    let rows = frame_rows(&df).map_err(|e| IngestError::CsvParse {
        name: name.to_string(),
        message: e.to_string(),
    })?;

    debug!(source = name, rows = rows.len(), columns = headers.len(), "parsed csv");

    Dataset::new(headers, rows).map_err(|source| IngestError::Dataset {
        name: name.to_string(),
        source,
    })
}

fn frame_rows(df: &DataFrame) -> PolarsResult<Vec<Vec<CellValue>>> {
    let columns = df.get_columns();
    let mut rows = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let row = columns
            .iter()
            .map(|column| column.get(idx).map(any_to_cell))
            .collect::<PolarsResult<Vec<_>>>()?;
        rows.push(row);
    }
    Ok(rows)
}
