//! CSV serialization.

use sheetmerge_model::Dataset;

use crate::error::{OutputError, Result};

/// Serialize a dataset as CSV: a header row, then one record per row.
///
/// Missing cells are empty fields; numbers use their canonical text.
pub fn write_csv(dataset: &Dataset) -> Result<Vec<u8>> {
    let mut writer = ::csv::Writer::from_writer(Vec::new());

    writer
        .write_record(dataset.columns())
        .map_err(|e| OutputError::Csv(e.to_string()))?;
    for row in dataset.rows() {
        writer
            .write_record(row.iter().map(ToString::to_string))
            .map_err(|e| OutputError::Csv(e.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|e| OutputError::Csv(e.to_string()))
}
