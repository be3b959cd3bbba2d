//! Source format detection.

use std::fmt;
use std::path::Path;

use crate::error::{IngestError, Result};

/// Extensions read as spreadsheet workbooks.
pub const WORKBOOK_EXTENSIONS: [&str; 4] = ["xlsx", "xlsm", "xls", "ods"];

/// How a source file is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    /// Comma-separated values, one table.
    Csv,
    /// Spreadsheet workbook, one table per sheet.
    Workbook,
}

impl SourceFormat {
    /// Detect the format from a file extension (case-insensitive).
    pub fn from_extension(name: &str, extension: &str) -> Result<Self> {
        let lower = extension.to_ascii_lowercase();
        if lower == "csv" {
            Ok(Self::Csv)
        } else if WORKBOOK_EXTENSIONS.contains(&lower.as_str()) {
            Ok(Self::Workbook)
        } else {
            Err(IngestError::UnsupportedFormat {
                name: name.to_string(),
                extension: extension.to_string(),
            })
        }
    }

    /// Detect the format from a file path.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        Self::from_extension(&path.display().to_string(), extension)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Workbook => "workbook",
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
