//! CLI argument definitions for sheetmerge.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use sheetmerge_output::ExportFormat;

#[derive(Parser)]
#[command(
    name = "sheetmerge",
    version,
    about = "Spreadsheet lookup merge - left-join two tables on a key column",
    long_about = "Left-join a lookup table with a target table on a key column, \
                  the way a spreadsheet VLOOKUP fills columns.\n\n\
                  Reads CSV files and workbooks (xlsx, xlsm, xls, ods). \
                  Writes CSV or XLSX."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Prefix pretty and compact log lines with a timestamp.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow cell values (such as key values) in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Merge a lookup table with a target table and preview or export the result.
    Merge(MergeArgs),

    /// Show the sheets, columns and first rows of a source file.
    Inspect(InspectArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct MergeArgs {
    /// Lookup file: every one of its rows appears in the result.
    #[arg(long, value_name = "FILE", conflicts_with = "workbook")]
    pub lookup: Option<PathBuf>,

    /// Target file: supplies the columns attached to matching rows.
    #[arg(long, value_name = "FILE", conflicts_with = "workbook")]
    pub target: Option<PathBuf>,

    /// Single workbook holding both the lookup and the target sheet.
    #[arg(long, value_name = "FILE")]
    pub workbook: Option<PathBuf>,

    /// Sheet of the lookup source (default: first sheet).
    #[arg(long = "lookup-sheet", value_name = "SHEET")]
    pub lookup_sheet: Option<String>,

    /// Sheet of the target source.
    ///
    /// In single-workbook mode this defaults to the sheet after the lookup
    /// sheet, wrapping around to the first.
    #[arg(long = "target-sheet", value_name = "SHEET")]
    pub target_sheet: Option<String>,

    /// Key column of the lookup table.
    #[arg(long = "lookup-key", value_name = "COLUMN")]
    pub lookup_key: Option<String>,

    /// Key column of the target table.
    #[arg(long = "target-key", value_name = "COLUMN")]
    pub target_key: Option<String>,

    /// Comma-separated lookup columns to keep (default: the lookup key).
    #[arg(long = "lookup-columns", value_name = "COLUMNS", value_delimiter = ',')]
    pub lookup_columns: Option<Vec<String>>,

    /// Comma-separated target columns to attach (default: the target key).
    #[arg(long = "target-columns", value_name = "COLUMNS", value_delimiter = ',')]
    pub target_columns: Option<Vec<String>>,

    /// Write the merged table to this file.
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Export format (default: from the output extension, else csv).
    #[arg(long, value_enum)]
    pub format: Option<ExportFormatArg>,

    /// Number of result rows to preview.
    #[arg(long = "preview-rows", value_name = "N", default_value_t = 100)]
    pub preview_rows: usize,

    /// Text that empty key cells match as (default: nan).
    #[arg(long = "missing-sentinel", value_name = "TEXT")]
    pub missing_sentinel: Option<String>,

    /// JSON merge plan; command-line flags override its values.
    #[arg(long, value_name = "FILE")]
    pub plan: Option<PathBuf>,

    /// Merge and preview without writing the output file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    /// Source file to inspect.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Sheet to show (default: first sheet).
    #[arg(long, value_name = "SHEET")]
    pub sheet: Option<String>,

    /// Number of rows to show.
    #[arg(long, value_name = "N", default_value_t = 5)]
    pub rows: usize,
}

/// CLI export format choices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormatArg {
    Csv,
    Xlsx,
}

impl From<ExportFormatArg> for ExportFormat {
    fn from(arg: ExportFormatArg) -> Self {
        match arg {
            ExportFormatArg::Csv => ExportFormat::Csv,
            ExportFormatArg::Xlsx => ExportFormat::Xlsx,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
