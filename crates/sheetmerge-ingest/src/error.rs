//! Error types for source ingestion.

use std::path::PathBuf;

use sheetmerge_model::{DatasetError, WorkbookError};
use thiserror::Error;

/// Errors that can occur while loading a source file.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Source file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the size limit.
    #[error("file too large: {path} ({size} bytes, max {max_size} bytes)")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    // === Format Errors ===
    /// Extension is neither CSV nor a workbook format.
    #[error("unsupported format '{extension}' for {name} (expected csv, xlsx, xlsm, xls or ods)")]
    UnsupportedFormat { name: String, extension: String },

    /// Text encoding other than UTF-8.
    #[error("unsupported encoding {encoding} in {name} (only UTF-8 is supported)")]
    UnsupportedEncoding {
        name: String,
        encoding: &'static str,
    },

    // === Parsing Errors ===
    /// Source has no header row.
    #[error("{name} is empty")]
    EmptySource { name: String },

    /// Failed to parse CSV.
    #[error("failed to parse CSV {name}: {message}")]
    CsvParse { name: String, message: String },

    /// Failed to open or read a workbook.
    #[error("failed to read workbook {name}: {message}")]
    WorkbookParse { name: String, message: String },

    /// Workbook without any sheets.
    #[error("workbook {name} has no sheets")]
    EmptyWorkbook { name: String },

    /// Two header cells with the same name.
    #[error("{name} has more than one column named '{column}'")]
    DuplicateColumn { name: String, column: String },

    /// Parsed cells did not form a valid dataset.
    #[error("invalid table in {name}: {source}")]
    Dataset {
        name: String,
        #[source]
        source: DatasetError,
    },

    // === Sheet Selection Errors ===
    #[error(transparent)]
    Workbook(#[from] WorkbookError),
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
