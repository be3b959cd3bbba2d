//! Error types shared across the merge workspace.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which side of the join a dataset or selection belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetSide {
    /// The left-hand table whose rows are all kept.
    Lookup,
    /// The right-hand table whose columns are attached.
    Target,
}

impl DatasetSide {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lookup => "lookup",
            Self::Target => "target",
        }
    }
}

impl fmt::Display for DatasetSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} file", self.as_str())
    }
}

/// The part of a selection that was left empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPart {
    KeyColumn,
    OutputColumns,
}

impl fmt::Display for SelectionPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeyColumn => f.write_str("key column"),
            Self::OutputColumns => f.write_str("output columns"),
        }
    }
}

/// Structural errors raised while building or reshaping a [`Dataset`](crate::Dataset).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatasetError {
    #[error("duplicate column name '{column}'")]
    DuplicateColumn { column: String },

    #[error("row {row} has {found} values but the dataset has {expected} columns")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("column '{column}' not found")]
    ColumnNotFound { column: String },

    #[error("column '{column}' already exists")]
    ColumnExists { column: String },
}

/// Errors raised when choosing sheets from a workbook.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkbookError {
    #[error("duplicate sheet name '{sheet}'")]
    DuplicateSheet { sheet: String },

    #[error("sheet '{sheet}' not found (available: {})", .available.join(", "))]
    SheetNotFound {
        sheet: String,
        available: Vec<String>,
    },

    #[error("the workbook needs at least two sheets to merge, found {found}")]
    NotEnoughSheets { found: usize },

    #[error("lookup and target cannot both use sheet '{sheet}'")]
    SameSheet { sheet: String },
}

/// Coarse classification of a [`MergeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MergeErrorKind {
    MissingKeyColumn,
    MissingOutputColumns,
    EmptySelection,
    IncompatibleJoin,
}

/// Errors reported by a merge attempt.
///
/// Every variant carries the actual column names involved so a caller can
/// re-prompt without reloading anything. For a failed join these are the
/// columns of both inputs, lookup first.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeError {
    #[error("key column '{column}' was not found in the {side}")]
    MissingKeyColumn {
        side: DatasetSide,
        column: String,
        available: Vec<String>,
    },

    #[error(
        "the following columns selected for the {side} were not found: {}",
        .names.join(", ")
    )]
    MissingOutputColumns {
        side: DatasetSide,
        names: Vec<String>,
        available: Vec<String>,
    },

    #[error("no {part} selected for the {side}")]
    EmptySelection {
        side: DatasetSide,
        part: SelectionPart,
        available: Vec<String>,
    },

    #[error("join failed: {detail}")]
    IncompatibleJoin {
        detail: String,
        available: Vec<String>,
    },
}

impl MergeError {
    pub fn kind(&self) -> MergeErrorKind {
        match self {
            Self::MissingKeyColumn { .. } => MergeErrorKind::MissingKeyColumn,
            Self::MissingOutputColumns { .. } => MergeErrorKind::MissingOutputColumns,
            Self::EmptySelection { .. } => MergeErrorKind::EmptySelection,
            Self::IncompatibleJoin { .. } => MergeErrorKind::IncompatibleJoin,
        }
    }

    /// The side the error refers to, if any.
    pub fn side(&self) -> Option<DatasetSide> {
        match self {
            Self::MissingKeyColumn { side, .. }
            | Self::MissingOutputColumns { side, .. }
            | Self::EmptySelection { side, .. } => Some(*side),
            Self::IncompatibleJoin { .. } => None,
        }
    }

    /// Column names actually present in the dataset(s) the error refers to.
    pub fn available_columns(&self) -> &[String] {
        match self {
            Self::MissingKeyColumn { available, .. }
            | Self::MissingOutputColumns { available, .. }
            | Self::EmptySelection { available, .. }
            | Self::IncompatibleJoin { available, .. } => available,
        }
    }

    pub fn incompatible(detail: impl Into<String>, available: &[String]) -> Self {
        Self::IncompatibleJoin {
            detail: detail.into(),
            available: available.to_vec(),
        }
    }

    /// Fill in the column list of an [`MergeError::IncompatibleJoin`] that
    /// has none yet. Other variants are returned unchanged.
    #[must_use]
    pub fn with_available_columns(self, columns: impl IntoIterator<Item = String>) -> Self {
        match self {
            Self::IncompatibleJoin { detail, available } if available.is_empty() => {
                Self::IncompatibleJoin {
                    detail,
                    available: columns.into_iter().collect(),
                }
            }
            other => other,
        }
    }
}

impl From<DatasetError> for MergeError {
    fn from(err: DatasetError) -> Self {
        Self::incompatible(err.to_string(), &[])
    }
}

/// Result type for merge operations.
pub type Result<T> = std::result::Result<T, MergeError>;
