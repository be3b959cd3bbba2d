//! Export of merged results as CSV or XLSX.

pub mod common;
pub mod csv;
pub mod error;
pub mod format;
pub mod xlsx;

pub use common::{ensure_parent_dir, serialize, write_export};
pub use error::{OutputError, Result};
pub use format::ExportFormat;
pub use xlsx::RESULT_SHEET_NAME;
