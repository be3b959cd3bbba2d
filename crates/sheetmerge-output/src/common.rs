//! Writing exports to disk.

use std::fs;
use std::path::Path;

use sheetmerge_model::Dataset;
use tracing::info;

use crate::csv::write_csv;
use crate::error::{OutputError, Result};
use crate::format::ExportFormat;
use crate::xlsx::write_xlsx;

/// Serialize a dataset in the given format.
pub fn serialize(dataset: &Dataset, format: ExportFormat) -> Result<Vec<u8>> {
    match format {
        ExportFormat::Csv => write_csv(dataset),
        ExportFormat::Xlsx => write_xlsx(dataset),
    }
}

/// Serialize a dataset and write it to `path`, creating parent directories.
pub fn write_export(dataset: &Dataset, path: &Path, format: ExportFormat) -> Result<()> {
    let bytes = serialize(dataset, format)?;
    ensure_parent_dir(path)?;
    fs::write(path, &bytes).map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        path = %path.display(),
        format = %format,
        rows = dataset.height(),
        bytes = bytes.len(),
        "wrote export"
    );
    Ok(())
}

/// Ensure a parent directory exists for a file path.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| OutputError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}
