//! Conversion of parsed values into dataset cells.

use calamine::{Data, ExcelDateTime};
use polars::prelude::AnyValue;
use sheetmerge_model::CellValue;

/// Largest integer magnitude an `f64` holds exactly (2^53).
const MAX_EXACT_INTEGER: i64 = 1 << 53;

/// Converts a Polars AnyValue to a cell.
///
/// Integers beyond the exact `f64` range stay as text so their digits survive.
pub fn any_to_cell(value: AnyValue<'_>) -> CellValue {
    match value {
        AnyValue::Null => CellValue::Missing,
        AnyValue::Int8(v) => CellValue::Number(f64::from(v)),
        AnyValue::Int16(v) => CellValue::Number(f64::from(v)),
        AnyValue::Int32(v) => CellValue::Number(f64::from(v)),
        AnyValue::Int64(v) => int_cell(v),
        AnyValue::UInt8(v) => CellValue::Number(f64::from(v)),
        AnyValue::UInt16(v) => CellValue::Number(f64::from(v)),
        AnyValue::UInt32(v) => CellValue::Number(f64::from(v)),
        AnyValue::UInt64(v) => match i64::try_from(v) {
            Ok(v) => int_cell(v),
            Err(_) => CellValue::Text(v.to_string()),
        },
        AnyValue::Float32(v) => CellValue::number(f64::from(v)),
        AnyValue::Float64(v) => CellValue::number(v),
        AnyValue::String(s) => CellValue::text(s),
        AnyValue::StringOwned(s) => CellValue::text(s.as_str()),
        AnyValue::Boolean(b) => CellValue::text(bool_text(b)),
        other => CellValue::Text(other.to_string()),
    }
}

/// Converts a workbook cell to a dataset cell.
///
/// Empty and error cells are missing. Dates become `YYYY-MM-DD HH:MM:SS`
/// text and durations `H:MM:SS`.
pub fn data_to_cell(value: &Data) -> CellValue {
    match value {
        Data::Empty | Data::Error(_) => CellValue::Missing,
        Data::String(s) => CellValue::text(s.as_str()),
        Data::Float(v) => CellValue::number(*v),
        Data::Int(v) => int_cell(*v),
        Data::Bool(b) => CellValue::text(bool_text(*b)),
        Data::DateTime(dt) => date_cell(dt),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::text(s.as_str()),
    }
}

fn date_cell(value: &ExcelDateTime) -> CellValue {
    if value.is_duration() {
        if let Some(duration) = value.as_duration() {
            return CellValue::Text(duration_text(duration.num_seconds()));
        }
    } else if let Some(datetime) = value.as_datetime() {
        return CellValue::Text(datetime.format("%Y-%m-%d %H:%M:%S").to_string());
    }
    // Serial outside the representable calendar.
    CellValue::number(value.as_f64())
}

fn duration_text(total_seconds: i64) -> String {
    let sign = if total_seconds < 0 { "-" } else { "" };
    let seconds = total_seconds.unsigned_abs();
    format!(
        "{sign}{}:{:02}:{:02}",
        seconds / 3600,
        seconds / 60 % 60,
        seconds % 60
    )
}

/// Stores an integer as a number when `f64` represents it exactly.
pub fn int_cell(value: i64) -> CellValue {
    if (-MAX_EXACT_INTEGER..=MAX_EXACT_INTEGER).contains(&value) {
        CellValue::Number(value as f64)
    } else {
        CellValue::Text(value.to_string())
    }
}

fn bool_text(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}
