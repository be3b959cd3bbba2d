//! Checks that a selection names columns the dataset actually has.
//!
//! The key column is checked on its own and first, so a wrong key is reported
//! as such instead of being folded into a list of missing output columns.

use std::collections::HashSet;

use sheetmerge_model::{ColumnSelection, Dataset, DatasetSide, MergeError, Result, SelectionPart};

/// Requested names absent from `dataset`, deduplicated, in request order.
pub fn missing_columns<S: AsRef<str>>(dataset: &Dataset, names: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| !dataset.has_column(name))
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}

/// Fails with [`MergeError::MissingKeyColumn`] if `key` is not a column of `dataset`.
pub fn validate_key(dataset: &Dataset, side: DatasetSide, key: &str) -> Result<()> {
    if dataset.has_column(key) {
        return Ok(());
    }
    Err(MergeError::MissingKeyColumn {
        side,
        column: key.to_string(),
        available: dataset.columns().to_vec(),
    })
}

/// Fails with [`MergeError::MissingOutputColumns`] listing every absent name.
pub fn validate_columns<S: AsRef<str>>(
    dataset: &Dataset,
    side: DatasetSide,
    columns: &[S],
) -> Result<()> {
    let names = missing_columns(dataset, columns);
    if names.is_empty() {
        return Ok(());
    }
    Err(MergeError::MissingOutputColumns {
        side,
        names,
        available: dataset.columns().to_vec(),
    })
}

/// Validate a full selection: key first, then output columns.
pub fn validate_selection(
    dataset: &Dataset,
    side: DatasetSide,
    selection: &ColumnSelection,
) -> Result<()> {
    validate_key(dataset, side, &selection.key)?;
    validate_columns(dataset, side, &selection.columns)?;
    tracing::debug!(
        side = side.as_str(),
        key = %selection.key,
        columns = selection.columns.len(),
        "selection validated"
    );
    Ok(())
}

/// Fails with [`MergeError::EmptySelection`] when no key is named.
pub fn ensure_key_chosen(
    dataset: &Dataset,
    side: DatasetSide,
    selection: &ColumnSelection,
) -> Result<()> {
    if selection.key.trim().is_empty() {
        return Err(empty_selection(dataset, side, SelectionPart::KeyColumn));
    }
    Ok(())
}

/// Fails with [`MergeError::EmptySelection`] when no output column is named.
pub fn ensure_columns_chosen(
    dataset: &Dataset,
    side: DatasetSide,
    selection: &ColumnSelection,
) -> Result<()> {
    if selection.columns.is_empty() {
        return Err(empty_selection(dataset, side, SelectionPart::OutputColumns));
    }
    Ok(())
}

fn empty_selection(dataset: &Dataset, side: DatasetSide, part: SelectionPart) -> MergeError {
    MergeError::EmptySelection {
        side,
        part,
        available: dataset.columns().to_vec(),
    }
}
