//! Header-row naming shared by the CSV and workbook readers.

use std::collections::HashSet;

use crate::error::{IngestError, Result};

/// Normalize a header cell: strip a byte-order mark and surrounding whitespace.
pub fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_string()
}

/// Column name for the header cell at zero-based `index`.
///
/// Blank cells are named `Unnamed: <index>`.
///
/// ```
/// use sheetmerge_ingest::column_name;
///
/// assert_eq!(column_name(" id ", 0), "id");
/// assert_eq!(column_name("", 2), "Unnamed: 2");
/// ```
pub fn column_name(raw: &str, index: usize) -> String {
    let header = normalize_header(raw);
    if header.is_empty() {
        format!("Unnamed: {index}")
    } else {
        header
    }
}

/// Reject a header row that names a column twice.
pub fn ensure_unique_headers(headers: &[String], name: &str) -> Result<()> {
    let mut seen = HashSet::with_capacity(headers.len());
    for header in headers {
        if !seen.insert(header.as_str()) {
            return Err(IngestError::DuplicateColumn {
                name: name.to_string(),
                column: header.clone(),
            });
        }
    }
    Ok(())
}
