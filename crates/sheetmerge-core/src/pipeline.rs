//! Merge orchestration: validate, normalize, project, join.

use sheetmerge_model::{
    ColumnSelection, Dataset, DatasetSide, MergeOptions, MergeSpec, Result,
};
use tracing::{debug, info, info_span};

use crate::join::{JoinStats, left_join_with_stats};
use crate::normalize::normalize_keys;
use crate::project::project;
use crate::validate::{ensure_columns_chosen, ensure_key_chosen, validate_columns, validate_key};

/// A dataset together with the user's selection on it.
#[derive(Debug, Clone, Copy)]
pub struct DatasetSelection<'a> {
    pub dataset: &'a Dataset,
    pub selection: &'a ColumnSelection,
}

impl<'a> DatasetSelection<'a> {
    pub fn new(dataset: &'a Dataset, selection: &'a ColumnSelection) -> Self {
        Self { dataset, selection }
    }
}

/// The merged table and how it was produced.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub table: Dataset,
    /// Name of the shared key column in `table`.
    pub key: String,
    pub stats: JoinStats,
}

/// Merge two selected datasets with a left join.
///
/// Checks run in a fixed order and the first failure is returned: empty
/// selections, lookup key, target key, lookup columns, target columns.
/// Neither input is modified.
pub fn merge(
    lookup: DatasetSelection<'_>,
    target: DatasetSelection<'_>,
    options: &MergeOptions,
) -> Result<MergeOutcome> {
    let span = info_span!(
        "merge",
        lookup_key = %lookup.selection.key,
        target_key = %target.selection.key
    );
    let _guard = span.enter();

    ensure_key_chosen(lookup.dataset, DatasetSide::Lookup, lookup.selection)?;
    ensure_key_chosen(target.dataset, DatasetSide::Target, target.selection)?;
    ensure_columns_chosen(lookup.dataset, DatasetSide::Lookup, lookup.selection)?;
    ensure_columns_chosen(target.dataset, DatasetSide::Target, target.selection)?;

    validate_key(lookup.dataset, DatasetSide::Lookup, &lookup.selection.key)?;
    validate_key(target.dataset, DatasetSide::Target, &target.selection.key)?;
    validate_columns(lookup.dataset, DatasetSide::Lookup, &lookup.selection.columns)?;
    validate_columns(target.dataset, DatasetSide::Target, &target.selection.columns)?;

    let normalized = normalize_keys(
        lookup.dataset,
        &lookup.selection.key,
        target.dataset,
        &target.selection.key,
        options,
    )?;
    debug!(
        key = %normalized.key,
        renamed = !normalized.target_renames.is_empty(),
        "keys normalized"
    );

    let lookup_projected = project(
        &normalized.lookup,
        DatasetSide::Lookup,
        &normalized.key,
        &lookup.selection.columns,
    )?;
    let target_columns: Vec<String> = target
        .selection
        .columns
        .iter()
        .map(|name| normalized.target_renames.resolve(name).to_string())
        .collect();
    let target_projected = project(
        &normalized.target,
        DatasetSide::Target,
        &normalized.key,
        &target_columns,
    )?;

    let (table, stats) = left_join_with_stats(&lookup_projected, &target_projected, &normalized.key)?;
    info!(
        rows = stats.output_rows,
        columns = table.width(),
        matched = stats.matched_lookup_rows,
        unmatched = stats.unmatched_lookup_rows,
        fanned_out = stats.fanned_out_lookup_rows,
        "merge complete"
    );
    Ok(MergeOutcome {
        table,
        key: normalized.key,
        stats,
    })
}

/// [`merge`] driven by a [`MergeSpec`].
pub fn merge_with_spec(lookup: &Dataset, target: &Dataset, spec: &MergeSpec) -> Result<MergeOutcome> {
    merge(
        DatasetSelection::new(lookup, &spec.lookup),
        DatasetSelection::new(target, &spec.target),
        &spec.options,
    )
}
