//! Error types for result export.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    /// Format name or extension not recognised.
    #[error("unsupported export format '{0}' (expected csv or xlsx)")]
    UnsupportedFormat(String),

    #[error("failed to write CSV: {0}")]
    Csv(String),

    #[error("failed to write XLSX: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// Result exceeds the worksheet grid.
    #[error("result has {count} {what}, more than a worksheet holds ({max})")]
    TooLarge {
        what: &'static str,
        count: usize,
        max: usize,
    },

    #[error("failed to create {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, OutputError>;
