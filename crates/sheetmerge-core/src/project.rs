//! Column projection.

use std::collections::HashSet;

use sheetmerge_model::{Dataset, DatasetSide, Result};

use crate::validate::{validate_columns, validate_key};

/// Output column order for a projection.
///
/// Desired columns come first, duplicates collapsed with the first occurrence
/// winning. The key is appended when it was not listed; when it was listed it
/// keeps its position.
///
/// ```
/// use sheetmerge_core::project::projection_order;
///
/// let desired = vec!["name".to_string(), "dept".to_string(), "name".to_string()];
/// assert_eq!(projection_order("id", &desired), ["name", "dept", "id"]);
///
/// let desired = vec!["name".to_string(), "id".to_string()];
/// assert_eq!(projection_order("id", &desired), ["name", "id"]);
/// ```
pub fn projection_order(key: &str, desired: &[String]) -> Vec<String> {
    let mut seen = HashSet::with_capacity(desired.len() + 1);
    let mut order = Vec::with_capacity(desired.len() + 1);
    for name in desired {
        if seen.insert(name.as_str()) {
            order.push(name.clone());
        }
    }
    if !seen.contains(key) {
        order.push(key.to_string());
    }
    order
}

/// Reduce `dataset` to the key plus the desired columns.
pub fn project(
    dataset: &Dataset,
    side: DatasetSide,
    key: &str,
    desired: &[String],
) -> Result<Dataset> {
    validate_key(dataset, side, key)?;
    validate_columns(dataset, side, desired)?;
    let order = projection_order(key, desired);
    let projected = dataset.select(&order)?;
    tracing::debug!(
        side = side.as_str(),
        columns = projected.width(),
        dropped = dataset.width() - projected.width(),
        "projected dataset"
    );
    Ok(projected)
}
