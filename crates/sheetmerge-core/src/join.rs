//! Left join on a shared, already normalized key column.
//!
//! Output layout: every lookup column in its projected order, then every
//! target column except the key. A non-key name present on both sides is
//! emitted twice, as `<name>-lookup` and `<name>-target`.

use std::collections::{HashMap, HashSet};
use std::iter;

use serde::Serialize;

use sheetmerge_model::{
    CellValue, Dataset, DatasetSide, LOOKUP_SUFFIX, MergeError, Result, TARGET_SUFFIX,
};

/// Row accounting for one join.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct JoinStats {
    pub lookup_rows: usize,
    pub target_rows: usize,
    pub output_rows: usize,
    /// Lookup rows with at least one target match.
    pub matched_lookup_rows: usize,
    /// Lookup rows with no target match (emitted once, target columns missing).
    pub unmatched_lookup_rows: usize,
    /// Lookup rows with more than one target match.
    pub fanned_out_lookup_rows: usize,
}

impl JoinStats {
    /// Extra rows produced by fan-out.
    pub fn duplicated_rows(&self) -> usize {
        self.output_rows.saturating_sub(self.lookup_rows)
    }
}

/// Left join `lookup` with `target` on `key`.
pub fn left_join(lookup: &Dataset, target: &Dataset, key: &str) -> Result<Dataset> {
    left_join_with_stats(lookup, target, key).map(|(table, _)| table)
}

/// Left join returning the joined table and its [`JoinStats`].
///
/// A failed join reports the columns of both inputs, lookup first.
pub fn left_join_with_stats(
    lookup: &Dataset,
    target: &Dataset,
    key: &str,
) -> Result<(Dataset, JoinStats)> {
    join_rows(lookup, target, key).map_err(|err| {
        err.with_available_columns(lookup.columns().iter().chain(target.columns()).cloned())
    })
}

fn join_rows(lookup: &Dataset, target: &Dataset, key: &str) -> Result<(Dataset, JoinStats)> {
    let lookup_key = key_index(lookup, DatasetSide::Lookup, key)?;
    let target_key = key_index(target, DatasetSide::Target, key)?;
    let attached: Vec<usize> = (0..target.width()).filter(|&idx| idx != target_key).collect();
    let columns = output_columns(lookup, target, key, &attached)?;

    // Target positions per key, in target order.
    let mut index: HashMap<&str, Vec<usize>> = HashMap::with_capacity(target.height());
    for (pos, row) in target.rows().iter().enumerate() {
        let value = key_text(&row[target_key], DatasetSide::Target, pos)?;
        index.entry(value).or_default().push(pos);
    }

    let mut stats = JoinStats {
        lookup_rows: lookup.height(),
        target_rows: target.height(),
        ..JoinStats::default()
    };
    let mut rows = Vec::with_capacity(lookup.height());
    for (pos, row) in lookup.rows().iter().enumerate() {
        let value = key_text(&row[lookup_key], DatasetSide::Lookup, pos)?;
        match index.get(value) {
            Some(matches) => {
                stats.matched_lookup_rows += 1;
                if matches.len() > 1 {
                    stats.fanned_out_lookup_rows += 1;
                }
                for &matched in matches {
                    let source = &target.rows()[matched];
                    let mut out = Vec::with_capacity(columns.len());
                    out.extend(row.iter().cloned());
                    out.extend(attached.iter().map(|&idx| source[idx].clone()));
                    rows.push(out);
                }
            }
            None => {
                stats.unmatched_lookup_rows += 1;
                let mut out = Vec::with_capacity(columns.len());
                out.extend(row.iter().cloned());
                out.extend(iter::repeat_n(CellValue::Missing, attached.len()));
                rows.push(out);
            }
        }
    }
    stats.output_rows = rows.len();

    let table = Dataset::new(columns, rows)?;
    tracing::debug!(
        key,
        output_rows = stats.output_rows,
        matched = stats.matched_lookup_rows,
        unmatched = stats.unmatched_lookup_rows,
        "left join complete"
    );
    Ok((table, stats))
}

fn key_index(dataset: &Dataset, side: DatasetSide, key: &str) -> Result<usize> {
    dataset
        .column_index(key)
        .ok_or_else(|| MergeError::MissingKeyColumn {
            side,
            column: key.to_string(),
            available: dataset.columns().to_vec(),
        })
}

fn key_text(value: &CellValue, side: DatasetSide, row: usize) -> Result<&str> {
    match value {
        CellValue::Text(text) => Ok(text),
        other => Err(MergeError::incompatible(
            format!(
                "{side} row {row} has a non-text key value {other:?}; keys must be normalized before joining"
            ),
            &[],
        )),
    }
}

fn output_columns(
    lookup: &Dataset,
    target: &Dataset,
    key: &str,
    attached: &[usize],
) -> Result<Vec<String>> {
    let lookup_names: HashSet<&str> = lookup
        .columns()
        .iter()
        .map(String::as_str)
        .filter(|name| *name != key)
        .collect();
    let target_names: Vec<&str> = attached
        .iter()
        .map(|&idx| target.columns()[idx].as_str())
        .collect();
    let shared: HashSet<&str> = target_names
        .iter()
        .copied()
        .filter(|name| lookup_names.contains(name))
        .collect();

    let mut columns = Vec::with_capacity(lookup.width() + target_names.len());
    for name in lookup.columns() {
        if shared.contains(name.as_str()) {
            columns.push(format!("{name}{LOOKUP_SUFFIX}"));
        } else {
            columns.push(name.clone());
        }
    }
    for name in target_names {
        if shared.contains(name) {
            columns.push(format!("{name}{TARGET_SUFFIX}"));
        } else {
            columns.push(name.to_string());
        }
    }

    let mut seen = HashSet::with_capacity(columns.len());
    for column in &columns {
        if !seen.insert(column.as_str()) {
            return Err(MergeError::incompatible(
                format!("output column '{column}' appears more than once after suffixing"),
                &[],
            ));
        }
    }
    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetmerge_model::MergeErrorKind;

    fn text(value: &str) -> CellValue {
        CellValue::text(value)
    }

    fn lookup() -> Dataset {
        Dataset::from_rows(
            ["id", "name"],
            vec![
                vec![text("1"), text("Ann")],
                vec![text("2"), text("Bo")],
            ],
        )
        .unwrap()
    }

    #[test]
    fn unmatched_rows_get_missing_target_columns() {
        let target = Dataset::from_rows(
            ["dept", "id"],
            vec![vec![text("X"), text("1")], vec![text("Y"), text("3")]],
        )
        .unwrap();
        let (joined, stats) = left_join_with_stats(&lookup(), &target, "id").unwrap();
        assert_eq!(joined.columns(), ["id", "name", "dept"]);
        assert_eq!(
            joined.rows(),
            [
                vec![text("1"), text("Ann"), text("X")],
                vec![text("2"), text("Bo"), CellValue::Missing],
            ]
        );
        assert_eq!(stats.matched_lookup_rows, 1);
        assert_eq!(stats.unmatched_lookup_rows, 1);
        assert_eq!(stats.duplicated_rows(), 0);
    }

    #[test]
    fn fan_out_follows_target_order() {
        let target = Dataset::from_rows(
            ["id", "dept"],
            vec![
                vec![text("1"), text("X")],
                vec![text("1"), text("Z")],
            ],
        )
        .unwrap();
        let (joined, stats) = left_join_with_stats(&lookup(), &target, "id").unwrap();
        assert_eq!(joined.height(), 3);
        let depts: Vec<_> = joined.column_values("dept").unwrap().cloned().collect();
        assert_eq!(depts, vec![text("X"), text("Z"), CellValue::Missing]);
        assert_eq!(stats.fanned_out_lookup_rows, 1);
        assert_eq!(stats.duplicated_rows(), 1);
    }

    #[test]
    fn shared_names_are_suffixed() {
        let target = Dataset::from_rows(
            ["id", "name"],
            vec![vec![text("2"), text("Robert")]],
        )
        .unwrap();
        let joined = left_join(&lookup(), &target, "id").unwrap();
        assert_eq!(joined.columns(), ["id", "name-lookup", "name-target"]);
        assert_eq!(joined.value(1, "name-target"), Some(&text("Robert")));
        assert_eq!(joined.value(0, "name-target"), Some(&CellValue::Missing));
    }

    #[test]
    fn suffix_clash_is_incompatible() {
        let lookup = Dataset::from_rows(["id", "name", "name-lookup"], Vec::new()).unwrap();
        let target = Dataset::from_rows(["id", "name"], Vec::new()).unwrap();
        let err = left_join(&lookup, &target, "id").unwrap_err();
        assert_eq!(err.kind(), MergeErrorKind::IncompatibleJoin);
        assert_eq!(
            err.available_columns(),
            ["id", "name", "name-lookup", "id", "name"]
        );
    }

    #[test]
    fn missing_key_names_the_side() {
        let target = Dataset::from_rows(["code"], Vec::new()).unwrap();
        let err = left_join(&lookup(), &target, "id").unwrap_err();
        assert_eq!(err.side(), Some(DatasetSide::Target));
        assert_eq!(err.kind(), MergeErrorKind::MissingKeyColumn);
    }

    #[test]
    fn non_text_key_is_incompatible() {
        let target = Dataset::from_rows(["id"], vec![vec![CellValue::Number(1.0)]]).unwrap();
        let err = left_join(&lookup(), &target, "id").unwrap_err();
        assert_eq!(err.kind(), MergeErrorKind::IncompatibleJoin);
        assert!(!err.available_columns().is_empty());
    }

    #[test]
    fn empty_inputs_are_not_errors() {
        let empty_lookup = Dataset::from_rows(["id", "name"], Vec::new()).unwrap();
        let target = Dataset::from_rows(["id", "dept"], vec![vec![text("1"), text("X")]]).unwrap();
        assert_eq!(left_join(&empty_lookup, &target, "id").unwrap().height(), 0);

        let empty_target = Dataset::from_rows(["id", "dept"], Vec::new()).unwrap();
        let joined = left_join(&lookup(), &empty_target, "id").unwrap();
        assert_eq!(joined.height(), 2);
        assert!(joined.column_values("dept").unwrap().all(CellValue::is_missing));
    }
}
