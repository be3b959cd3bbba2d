//! Merge configuration: a JSON plan file overlaid with command-line flags.
//!
//! A plan looks like:
//!
//! ```json
//! {
//!   "lookup": { "file": "people.csv", "key": "id", "columns": ["id", "name"] },
//!   "target": { "file": "depts.xlsx", "sheet": "Depts", "key": "code", "columns": ["dept"] },
//!   "missing_key_sentinel": "nan",
//!   "output": "merged.xlsx"
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use sheetmerge_model::{ColumnSelection, DatasetSide, MergeOptions, MergeSpec};
use sheetmerge_output::ExportFormat;

use crate::cli::MergeArgs;

/// One side of a saved merge plan. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SidePlan {
    pub file: Option<PathBuf>,
    pub sheet: Option<String>,
    pub key: Option<String>,
    pub columns: Option<Vec<String>>,
}

/// Saved merge settings loaded with `--plan`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MergePlan {
    /// Single workbook holding both sheets.
    pub workbook: Option<PathBuf>,
    pub lookup: SidePlan,
    pub target: SidePlan,
    pub missing_key_sentinel: Option<String>,
    pub output: Option<PathBuf>,
    /// `csv` or `xlsx`.
    pub format: Option<String>,
}

impl MergePlan {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("parse merge plan")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read merge plan {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("in {}", path.display()))
    }
}

/// Where the two tables come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourcePaths {
    /// Two files, each with an optional sheet.
    Files { lookup: PathBuf, target: PathBuf },
    /// One workbook; both sheets come from it.
    Workbook(PathBuf),
}

/// Fully resolved settings for one `merge` run.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeConfig {
    pub sources: SourcePaths,
    pub lookup_sheet: Option<String>,
    pub target_sheet: Option<String>,
    pub spec: MergeSpec,
    pub output: Option<PathBuf>,
    pub format: ExportFormat,
    pub preview_rows: usize,
    pub dry_run: bool,
}

/// Resolve the merge settings: flags first, then the plan, then defaults.
pub fn resolve_merge_config(args: &MergeArgs, plan: MergePlan) -> Result<MergeConfig> {
    let MergePlan {
        workbook,
        lookup,
        target,
        missing_key_sentinel,
        output,
        format,
    } = plan;

    let sources = resolve_sources(args, workbook, lookup.file, target.file)?;

    let lookup_selection = resolve_selection(
        DatasetSide::Lookup,
        args.lookup_key.clone().or(lookup.key),
        args.lookup_columns.clone().or(lookup.columns),
    )?;
    let target_selection = resolve_selection(
        DatasetSide::Target,
        args.target_key.clone().or(target.key),
        args.target_columns.clone().or(target.columns),
    )?;

    let mut options = MergeOptions::default();
    if let Some(sentinel) = args.missing_sentinel.clone().or(missing_key_sentinel) {
        options = options.with_missing_key_sentinel(sentinel);
    }

    let output = args.output.clone().or(output);
    let format = resolve_format(args, format.as_deref(), output.as_deref())?;

    Ok(MergeConfig {
        sources,
        lookup_sheet: args.lookup_sheet.clone().or(lookup.sheet),
        target_sheet: args.target_sheet.clone().or(target.sheet),
        spec: MergeSpec::new(lookup_selection, target_selection).with_options(options),
        output,
        format,
        preview_rows: args.preview_rows,
        dry_run: args.dry_run,
    })
}

fn resolve_sources(
    args: &MergeArgs,
    plan_workbook: Option<PathBuf>,
    plan_lookup: Option<PathBuf>,
    plan_target: Option<PathBuf>,
) -> Result<SourcePaths> {
    // Files named on the command line replace the plan's source layout.
    let from_flags = args.workbook.is_some() || args.lookup.is_some() || args.target.is_some();
    let (workbook, lookup, target) = if from_flags {
        (args.workbook.clone(), args.lookup.clone(), args.target.clone())
    } else {
        (plan_workbook, plan_lookup, plan_target)
    };

    match (workbook, lookup, target) {
        (Some(path), None, None) => Ok(SourcePaths::Workbook(path)),
        (Some(_), _, _) => bail!("use either a single workbook or --lookup and --target, not both"),
        (None, Some(lookup), Some(target)) => Ok(SourcePaths::Files { lookup, target }),
        (None, None, Some(_)) => bail!("no lookup file given (use --lookup or --workbook)"),
        (None, Some(_), None) => bail!("no target file given (use --target or --workbook)"),
        (None, None, None) => bail!("no input given (use --lookup and --target, or --workbook)"),
    }
}

/// Key and columns for one side; the columns default to the key alone.
fn resolve_selection(
    side: DatasetSide,
    key: Option<String>,
    columns: Option<Vec<String>>,
) -> Result<ColumnSelection> {
    let Some(key) = key else {
        bail!(
            "no key column given for the {side} (use --{}-key)",
            side.as_str()
        );
    };
    let columns: Vec<String> = match columns {
        Some(columns) => columns
            .into_iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect(),
        None => vec![key.clone()],
    };
    Ok(ColumnSelection::new(key, columns))
}

fn resolve_format(
    args: &MergeArgs,
    plan_format: Option<&str>,
    output: Option<&Path>,
) -> Result<ExportFormat> {
    if let Some(format) = args.format {
        return Ok(format.into());
    }
    if let Some(name) = plan_format {
        return name.parse().context("merge plan format");
    }
    Ok(output
        .and_then(ExportFormat::from_path)
        .unwrap_or_default())
}
