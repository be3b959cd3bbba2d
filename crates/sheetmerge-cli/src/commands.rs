//! The `merge` and `inspect` commands, independent of terminal output.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use tracing::{info, info_span, trace};

use sheetmerge_core::{MergeOutcome, merge_with_spec};
use sheetmerge_ingest::{Source, read_source};
use sheetmerge_model::Dataset;
use sheetmerge_output::write_export;

use crate::cli::{InspectArgs, MergeArgs};
use crate::config::{MergeConfig, MergePlan, SourcePaths, resolve_merge_config};
use crate::logging::redact_value;
use crate::types::{ExportSummary, MergeReport, SourceSummary};

/// Load both sides, merge them and export the result unless this is a dry run.
pub fn run_merge(args: &MergeArgs) -> Result<MergeReport> {
    let plan = match &args.plan {
        Some(path) => MergePlan::load(path)?,
        None => MergePlan::default(),
    };
    let config = resolve_merge_config(args, plan)?;

    let span = info_span!("merge_command", dry_run = config.dry_run);
    let _guard = span.enter();
    let start = Instant::now();

    let (lookup_label, target_label, outcome) = match &config.sources {
        SourcePaths::Files { lookup, target } => merge_files(&config, lookup, target)?,
        SourcePaths::Workbook(path) => merge_workbook(&config, path)?,
    };
    log_key_sample(&outcome, config.preview_rows);

    let export = match &config.output {
        Some(path) if !config.dry_run => {
            write_export(&outcome.table, path, config.format)
                .with_context(|| format!("write {}", path.display()))?;
            Some(ExportSummary {
                path: path.clone(),
                format: config.format,
            })
        }
        Some(path) => {
            info!(path = %path.display(), "dry run, export skipped");
            None
        }
        None => None,
    };

    info!(
        rows = outcome.table.height(),
        elapsed_ms = start.elapsed().as_millis(),
        "merge command finished"
    );

    Ok(MergeReport {
        lookup_label,
        target_label,
        outcome,
        preview_rows: config.preview_rows,
        export,
        dry_run: config.dry_run,
    })
}

fn merge_files(
    config: &MergeConfig,
    lookup: &Path,
    target: &Path,
) -> Result<(String, String, MergeOutcome)> {
    let lookup_source = load(lookup, "lookup")?;
    let target_source = load(target, "target")?;
    let lookup_data = lookup_source.dataset(config.lookup_sheet.as_deref())?;
    let target_data = target_source.dataset(config.target_sheet.as_deref())?;

    let outcome = merge_with_spec(lookup_data, target_data, &config.spec)?;
    Ok((
        source_label(lookup, &lookup_source, config.lookup_sheet.as_deref()),
        source_label(target, &target_source, config.target_sheet.as_deref()),
        outcome,
    ))
}

fn merge_workbook(config: &MergeConfig, path: &Path) -> Result<(String, String, MergeOutcome)> {
    let book = load(path, "workbook")?.into_workbook()?;

    let lookup_sheet = match &config.lookup_sheet {
        Some(sheet) => sheet.clone(),
        None => book
            .first_sheet()
            .map(|sheet| sheet.name.clone())
            .ok_or_else(|| anyhow!("{} has no sheets", path.display()))?,
    };
    book.require_sheet(&lookup_sheet)?;
    let target_sheet = match &config.target_sheet {
        Some(sheet) => sheet.clone(),
        None => book
            .default_target_sheet(&lookup_sheet)
            .map(str::to_string)
            .unwrap_or_else(|| lookup_sheet.clone()),
    };

    let (lookup_data, target_data) = book.sheet_pair(&lookup_sheet, &target_sheet)?;
    let outcome = merge_with_spec(lookup_data, target_data, &config.spec)?;

    let name = path.display();
    Ok((
        format!("{name} [{lookup_sheet}]"),
        format!("{name} [{target_sheet}]"),
        outcome,
    ))
}

/// Load one source and preview its first rows.
pub fn run_inspect(args: &InspectArgs) -> Result<SourceSummary> {
    let source = load(&args.file, "source")?;
    let data: &Dataset = source.dataset(args.sheet.as_deref())?;

    let sheet = match &source {
        Source::Table(_) => None,
        Source::Workbook(book) => args
            .sheet
            .clone()
            .or_else(|| book.first_sheet().map(|sheet| sheet.name.clone())),
    };

    Ok(SourceSummary {
        path: args.file.clone(),
        format: source.format(),
        sheet_names: source.sheet_names(),
        sheet,
        total_rows: data.height(),
        preview: data.head(args.rows),
    })
}

fn load(path: &Path, role: &str) -> Result<Source> {
    read_source(path).with_context(|| format!("load {role} {}", path.display()))
}

fn source_label(path: &Path, source: &Source, sheet: Option<&str>) -> String {
    match (source, sheet) {
        (Source::Workbook(book), None) => match book.first_sheet() {
            Some(first) => format!("{} [{}]", path.display(), first.name),
            None => path.display().to_string(),
        },
        (Source::Workbook(_), Some(sheet)) => format!("{} [{sheet}]", path.display()),
        (Source::Table(_), _) => path.display().to_string(),
    }
}

/// Trace the merged key of the previewed rows; values are redacted unless
/// data logging is enabled.
fn log_key_sample(outcome: &MergeOutcome, limit: usize) {
    let Some(keys) = outcome.table.column_values(&outcome.key) else {
        return;
    };
    for (row, key) in keys.take(limit).enumerate() {
        trace!(row, key = redact_value(&key.to_string()), "merged row");
    }
}
