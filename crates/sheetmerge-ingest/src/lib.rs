//! Source ingestion for spreadsheet merging.
//!
//! Loads CSV files and workbooks (xlsx, xlsm, xls, ods) into
//! [`sheetmerge_model::Dataset`] tables:
//!
//! - **csv**: header checks, then Polars type inference
//! - **header**: header naming shared by both readers
//! - **workbook**: calamine, one dataset per sheet
//! - **convert**: parsed values to cells
//! - **source**: format detection and file loading

pub mod convert;
pub mod csv;
pub mod error;
pub mod format;
pub mod header;
pub mod source;
pub mod workbook;

pub use convert::{any_to_cell, data_to_cell, int_cell};
pub use csv::{read_csv_bytes, read_headers};
pub use error::{IngestError, Result};
pub use format::{SourceFormat, WORKBOOK_EXTENSIONS};
pub use header::{column_name, ensure_unique_headers, normalize_header};
pub use source::{
    CSV_SHEET_NAME, MAX_SOURCE_FILE_SIZE, Source, check_file_size, check_file_size_with_limit,
    parse_source, read_source,
};
pub use workbook::{range_to_dataset, read_workbook_bytes};
