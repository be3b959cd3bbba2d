//! Results returned by the commands.

use std::path::PathBuf;

use sheetmerge_core::MergeOutcome;
use sheetmerge_ingest::SourceFormat;
use sheetmerge_model::Dataset;
use sheetmerge_output::ExportFormat;

#[derive(Debug)]
pub struct MergeReport {
    pub lookup_label: String,
    pub target_label: String,
    pub outcome: MergeOutcome,
    pub preview_rows: usize,
    pub export: Option<ExportSummary>,
    pub dry_run: bool,
}

#[derive(Debug)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub format: ExportFormat,
}

#[derive(Debug)]
pub struct SourceSummary {
    pub path: PathBuf,
    pub format: SourceFormat,
    pub sheet_names: Vec<String>,
    pub sheet: Option<String>,
    pub total_rows: usize,
    pub preview: Dataset,
}
