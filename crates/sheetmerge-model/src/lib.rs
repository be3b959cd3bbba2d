//! Data model for spreadsheet merging.
//!
//! - **cell**: tagged cell values and canonical number formatting
//! - **dataset**: immutable in-memory tables
//! - **workbook**: ordered multi-sheet sources
//! - **selection**: per-side column selections and merge options
//! - **error**: shared error types

pub mod cell;
pub mod dataset;
pub mod error;
pub mod selection;
pub mod workbook;

pub use cell::{CellValue, format_number};
pub use dataset::Dataset;
pub use error::{
    DatasetError, DatasetSide, MergeError, MergeErrorKind, Result, SelectionPart, WorkbookError,
};
pub use selection::{
    ColumnSelection, DEFAULT_MISSING_KEY_SENTINEL, LOOKUP_SUFFIX, MergeOptions, MergeSpec,
    TARGET_SUFFIX,
};
pub use workbook::{Sheet, Workbook};
