//! In-memory tabular dataset.
//!
//! A [`Dataset`] is an ordered list of uniquely named columns and rows holding
//! exactly one [`CellValue`] per column. Datasets are values: every reshaping
//! method returns a new dataset and leaves the receiver untouched.

use std::collections::HashSet;

use serde::Serialize;

use crate::cell::CellValue;
use crate::error::DatasetError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Dataset {
    /// Build a dataset, rejecting duplicate column names and ragged rows.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Result<Self, DatasetError> {
        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(DatasetError::DuplicateColumn {
                    column: column.clone(),
                });
            }
        }
        for (idx, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(DatasetError::RaggedRow {
                    row: idx,
                    expected: columns.len(),
                    found: row.len(),
                });
            }
        }
        Ok(Self { columns, rows })
    }

    /// A dataset with the given columns and no rows.
    pub fn empty(columns: Vec<String>) -> Result<Self, DatasetError> {
        Self::new(columns, Vec::new())
    }

    /// Convenience constructor for literal tables.
    ///
    /// ```
    /// use sheetmerge_model::{CellValue, Dataset};
    ///
    /// let ds = Dataset::from_rows(
    ///     ["id", "name"],
    ///     vec![vec![CellValue::from("1"), CellValue::from("Ann")]],
    /// )
    /// .unwrap();
    /// assert_eq!(ds.height(), 1);
    /// assert_eq!(ds.columns(), ["id", "name"]);
    /// ```
    pub fn from_rows<I, S>(columns: I, rows: Vec<Vec<CellValue>>) -> Result<Self, DatasetError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(columns.into_iter().map(Into::into).collect(), rows)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Iterate the values of one column, top to bottom.
    pub fn column_values<'a>(
        &'a self,
        name: &str,
    ) -> Option<impl Iterator<Item = &'a CellValue> + use<'a>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| &row[idx]))
    }

    /// Value at `row` in column `name`.
    pub fn value(&self, row: usize, name: &str) -> Option<&CellValue> {
        let idx = self.column_index(name)?;
        self.rows.get(row).map(|values| &values[idx])
    }

    /// The first `n` rows.
    pub fn head(&self, n: usize) -> Dataset {
        Self {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }

    /// Rename one column. The new name must not already be taken.
    pub fn rename_column(&self, from: &str, to: &str) -> Result<Dataset, DatasetError> {
        let idx = self
            .column_index(from)
            .ok_or_else(|| DatasetError::ColumnNotFound {
                column: from.to_string(),
            })?;
        if from == to {
            return Ok(self.clone());
        }
        if self.has_column(to) {
            return Err(DatasetError::ColumnExists {
                column: to.to_string(),
            });
        }
        let mut columns = self.columns.clone();
        columns[idx] = to.to_string();
        Ok(Self {
            columns,
            rows: self.rows.clone(),
        })
    }

    /// Keep only `names`, in the given order.
    pub fn select(&self, names: &[String]) -> Result<Dataset, DatasetError> {
        let indices = names
            .iter()
            .map(|name| {
                self.column_index(name)
                    .ok_or_else(|| DatasetError::ColumnNotFound {
                        column: name.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let rows = self
            .rows
            .iter()
            .map(|row| indices.iter().map(|&idx| row[idx].clone()).collect())
            .collect();
        Self::new(names.to_vec(), rows)
    }

    /// Replace every value of column `name` with `f(value)`.
    pub fn map_column<F>(&self, name: &str, mut f: F) -> Result<Dataset, DatasetError>
    where
        F: FnMut(&CellValue) -> CellValue,
    {
        let idx = self
            .column_index(name)
            .ok_or_else(|| DatasetError::ColumnNotFound {
                column: name.to_string(),
            })?;
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut row = row.clone();
                row[idx] = f(&row[idx]);
                row
            })
            .collect();
        Ok(Self {
            columns: self.columns.clone(),
            rows,
        })
    }
}
