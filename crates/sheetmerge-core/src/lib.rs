//! Column reconciliation and join engine.
//!
//! Stages, in the order [`merge`] runs them:
//!
//! - **validate**: selected key and output columns exist
//! - **normalize**: one key-column name, key values as canonical text
//! - **project**: keep only the selected columns plus the key
//! - **join**: left join with `-lookup` / `-target` collision suffixes

pub mod join;
pub mod normalize;
pub mod pipeline;
pub mod project;
pub mod validate;

pub use join::{JoinStats, left_join, left_join_with_stats};
pub use normalize::{ColumnRenames, NormalizedPair, canonical_key, normalize_keys};
pub use pipeline::{DatasetSelection, MergeOutcome, merge, merge_with_spec};
pub use project::{project, projection_order};
pub use validate::{missing_columns, validate_selection};
