//! User selections and merge options.

use serde::{Deserialize, Serialize};

/// Suffix appended to lookup columns whose name also exists in the target.
pub const LOOKUP_SUFFIX: &str = "-lookup";

/// Suffix appended to target columns whose name also exists in the lookup.
pub const TARGET_SUFFIX: &str = "-target";

/// Text that missing key values become before matching.
pub const DEFAULT_MISSING_KEY_SENTINEL: &str = "nan";

/// Key column plus the columns to keep from one dataset.
///
/// The key is always kept, whether or not it is listed in `columns`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSelection {
    pub key: String,
    #[serde(default)]
    pub columns: Vec<String>,
}

impl ColumnSelection {
    pub fn new<I, S>(key: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            key: key.into(),
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Select only the key column.
    pub fn key_only(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            columns: vec![key.clone()],
            key,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeOptions {
    /// Replacement text for missing key values.
    ///
    /// A real key equal to this text is indistinguishable from a missing one,
    /// so pick something that cannot occur in the data when that matters.
    pub missing_key_sentinel: String,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            missing_key_sentinel: DEFAULT_MISSING_KEY_SENTINEL.to_string(),
        }
    }
}

impl MergeOptions {
    #[must_use]
    pub fn with_missing_key_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.missing_key_sentinel = sentinel.into();
        self
    }
}

/// Selections for both sides of a merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeSpec {
    pub lookup: ColumnSelection,
    pub target: ColumnSelection,
    #[serde(default)]
    pub options: MergeOptions,
}

impl MergeSpec {
    pub fn new(lookup: ColumnSelection, target: ColumnSelection) -> Self {
        Self {
            lookup,
            target,
            options: MergeOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: MergeOptions) -> Self {
        self.options = options;
        self
    }
}
