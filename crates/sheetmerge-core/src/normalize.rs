//! Key normalization.
//!
//! Brings both datasets to one key-column name (the lookup's) and rewrites
//! every key value to text, so integer keys on one side match text keys on
//! the other.

use sheetmerge_model::{
    CellValue, Dataset, DatasetError, DatasetSide, MergeError, MergeOptions, Result,
    TARGET_SUFFIX, format_number,
};

/// Canonical text form of a key value.
///
/// ```
/// use sheetmerge_core::normalize::canonical_key;
/// use sheetmerge_model::CellValue;
///
/// assert_eq!(canonical_key(&CellValue::Number(1.0), "nan"), "1");
/// assert_eq!(canonical_key(&CellValue::Number(1.5), "nan"), "1.5");
/// assert_eq!(canonical_key(&CellValue::text("007"), "nan"), "007");
/// assert_eq!(canonical_key(&CellValue::Missing, "nan"), "nan");
/// ```
pub fn canonical_key(value: &CellValue, missing_sentinel: &str) -> String {
    match value {
        CellValue::Text(text) => text.clone(),
        CellValue::Number(number) => format_number(*number),
        CellValue::Missing => missing_sentinel.to_string(),
    }
}

/// Rewrite every value of `key` as [`CellValue::Text`].
pub fn canonicalize_key_column(
    dataset: &Dataset,
    key: &str,
    missing_sentinel: &str,
) -> std::result::Result<Dataset, DatasetError> {
    dataset.map_column(key, |value| {
        CellValue::Text(canonical_key(value, missing_sentinel))
    })
}

/// Original-to-new column names applied to the target dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnRenames {
    renames: Vec<(String, String)>,
}

impl ColumnRenames {
    fn push(&mut self, from: &str, to: &str) {
        self.renames.push((from.to_string(), to.to_string()));
    }

    pub fn is_empty(&self) -> bool {
        self.renames.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.renames
            .iter()
            .map(|(from, to)| (from.as_str(), to.as_str()))
    }

    /// Current name of a column known by its original name.
    pub fn resolve<'a>(&'a self, original: &'a str) -> &'a str {
        self.renames
            .iter()
            .find(|(from, _)| from == original)
            .map_or(original, |(_, to)| to.as_str())
    }
}

/// Rename the target key to `lookup_key`.
///
/// A different target column already named `lookup_key` gives way: it becomes
/// `<lookup_key>-target` and stays an ordinary column.
pub fn align_key_name(
    target: &Dataset,
    target_key: &str,
    lookup_key: &str,
) -> Result<(Dataset, ColumnRenames)> {
    let mut renames = ColumnRenames::default();
    if !target.has_column(target_key) {
        return Err(MergeError::MissingKeyColumn {
            side: DatasetSide::Target,
            column: target_key.to_string(),
            available: target.columns().to_vec(),
        });
    }
    if target_key == lookup_key {
        return Ok((target.clone(), renames));
    }

    let mut aligned = target.clone();
    if aligned.has_column(lookup_key) {
        let displaced = format!("{lookup_key}{TARGET_SUFFIX}");
        aligned = aligned
            .rename_column(lookup_key, &displaced)
            .map_err(|err| {
                MergeError::incompatible(
                    format!("cannot move target column '{lookup_key}' out of the key's way: {err}"),
                    target.columns(),
                )
            })?;
        tracing::debug!(
            column = lookup_key,
            renamed = %displaced,
            "target column displaced by renamed key"
        );
        renames.push(lookup_key, &displaced);
    }
    aligned = aligned
        .rename_column(target_key, lookup_key)
        .map_err(|err| MergeError::from(err).with_available_columns(target.columns().to_vec()))?;
    renames.push(target_key, lookup_key);
    Ok((aligned, renames))
}

/// Both datasets after key normalization.
#[derive(Debug, Clone)]
pub struct NormalizedPair {
    pub lookup: Dataset,
    pub target: Dataset,
    /// The shared key-column name.
    pub key: String,
    /// Renames applied to the target, keyed by original name.
    pub target_renames: ColumnRenames,
}

/// Align key names and canonicalize key values on both sides.
pub fn normalize_keys(
    lookup: &Dataset,
    lookup_key: &str,
    target: &Dataset,
    target_key: &str,
    options: &MergeOptions,
) -> Result<NormalizedPair> {
    if !lookup.has_column(lookup_key) {
        return Err(MergeError::MissingKeyColumn {
            side: DatasetSide::Lookup,
            column: lookup_key.to_string(),
            available: lookup.columns().to_vec(),
        });
    }
    let (target, target_renames) = align_key_name(target, target_key, lookup_key)?;
    let sentinel = options.missing_key_sentinel.as_str();
    let lookup = canonicalize_key_column(lookup, lookup_key, sentinel)?;
    let target = canonicalize_key_column(&target, lookup_key, sentinel)?;
    Ok(NormalizedPair {
        lookup,
        target,
        key: lookup_key.to_string(),
        target_renames,
    })
}
