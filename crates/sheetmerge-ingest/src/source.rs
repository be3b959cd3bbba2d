//! Source files: a single CSV table or a multi-sheet workbook.

use std::path::Path;

use sheetmerge_model::{Dataset, Sheet, Workbook};
use tracing::{info, warn};

use crate::csv::read_csv_bytes;
use crate::error::{IngestError, Result};
use crate::format::SourceFormat;
use crate::workbook::read_workbook_bytes;

/// Maximum source file size in bytes (500 MB).
pub const MAX_SOURCE_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// Sheet name given to a CSV table when it is viewed as a workbook.
pub const CSV_SHEET_NAME: &str = "Sheet1";

/// A loaded source file.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    Table(Dataset),
    Workbook(Workbook),
}

impl Source {
    pub fn format(&self) -> SourceFormat {
        match self {
            Self::Table(_) => SourceFormat::Csv,
            Self::Workbook(_) => SourceFormat::Workbook,
        }
    }

    /// Sheet names in file order; empty for a CSV table.
    pub fn sheet_names(&self) -> Vec<String> {
        match self {
            Self::Table(_) => Vec::new(),
            Self::Workbook(book) => book.sheet_names(),
        }
    }

    /// The table to merge from this source.
    ///
    /// For workbooks `sheet` picks the sheet and defaults to the first one.
    /// CSV tables have no sheets, so a sheet name is ignored.
    pub fn dataset(&self, sheet: Option<&str>) -> Result<&Dataset> {
        match (self, sheet) {
            (Self::Table(data), None) => Ok(data),
            (Self::Table(data), Some(sheet)) => {
                warn!(sheet, "sheet name ignored for a CSV source");
                Ok(data)
            }
            (Self::Workbook(book), Some(sheet)) => Ok(book.require_sheet(sheet)?),
            (Self::Workbook(book), None) => book
                .first_sheet()
                .map(|sheet| &sheet.data)
                .ok_or_else(|| IngestError::EmptyWorkbook {
                    name: "source".to_string(),
                }),
        }
    }

    /// Owned variant of [`Source::dataset`].
    pub fn into_dataset(self, sheet: Option<&str>) -> Result<Dataset> {
        self.dataset(sheet).cloned()
    }

    /// View the source as a workbook; a CSV table becomes a single sheet.
    pub fn into_workbook(self) -> Result<Workbook> {
        match self {
            Self::Table(data) => Ok(Workbook::new(vec![Sheet::new(CSV_SHEET_NAME, data)])?),
            Self::Workbook(book) => Ok(book),
        }
    }
}

/// Parse in-memory source bytes. `name` is only used in messages.
pub fn parse_source(bytes: &[u8], format: SourceFormat, name: &str) -> Result<Source> {
    match format {
        SourceFormat::Csv => read_csv_bytes(bytes, name).map(Source::Table),
        SourceFormat::Workbook => read_workbook_bytes(bytes, name).map(Source::Workbook),
    }
}

/// Load a source file, detecting its format from the extension.
pub fn read_source(path: &Path) -> Result<Source> {
    let format = SourceFormat::from_path(path)?;
    check_file_size(path)?;

    let bytes = std::fs::read(path).map_err(|e| file_error(path, e))?;
    let source = parse_source(&bytes, format, &path.display().to_string())?;

    info!(
        path = %path.display(),
        format = %format,
        sheets = source.sheet_names().len(),
        "loaded source"
    );
    Ok(source)
}

/// Check file size before loading.
pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_SOURCE_FILE_SIZE)
}

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| file_error(path, e))?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

fn file_error(path: &Path, e: std::io::Error) -> IngestError {
    if e.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        }
    }
}
