//! Cell values held by a [`Dataset`](crate::Dataset).

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single spreadsheet cell.
///
/// Source files mix text, numbers and blanks within one column, so every cell
/// carries its own tag instead of the column carrying a type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Text(String),
    Number(f64),
    #[default]
    Missing,
}

impl CellValue {
    /// Build a text cell.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Build a numeric cell; `NaN` is treated as missing.
    pub fn number(value: f64) -> Self {
        if value.is_nan() {
            Self::Missing
        } else {
            Self::Number(value)
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    /// Missing cells render as an empty string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(value) => f.write_str(value),
            Self::Number(value) => f.write_str(&format_number(*value)),
            Self::Missing => Ok(()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Into::into)
    }
}

/// Largest magnitude printed through the integer path.
const INTEGRAL_LIMIT: f64 = 1e15;

/// Format a number without adding or losing precision.
///
/// Integral values print without a fractional part (`1.0` becomes `"1"`);
/// everything else uses the shortest decimal that round-trips.
///
/// ```
/// use sheetmerge_model::format_number;
///
/// assert_eq!(format_number(1.0), "1");
/// assert_eq!(format_number(-42.0), "-42");
/// assert_eq!(format_number(2.5), "2.5");
/// assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
/// ```
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < INTEGRAL_LIMIT {
        // Avoids "-0" for negative zero.
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_becomes_missing() {
        assert_eq!(CellValue::number(f64::NAN), CellValue::Missing);
        assert_eq!(CellValue::from(f64::NAN), CellValue::Missing);
    }

    #[test]
    fn display_renders_canonical_forms() {
        assert_eq!(CellValue::text("abc").to_string(), "abc");
        assert_eq!(CellValue::Number(3.0).to_string(), "3");
        assert_eq!(CellValue::Number(3.25).to_string(), "3.25");
        assert_eq!(CellValue::Missing.to_string(), "");
    }

    #[test]
    fn format_number_handles_negative_zero_and_large_values() {
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(1e20), "100000000000000000000");
        assert_eq!(format_number(f64::INFINITY), "inf");
    }

    #[test]
    fn option_conversion() {
        assert_eq!(CellValue::from(None::<&str>), CellValue::Missing);
        assert_eq!(CellValue::from(Some("x")), CellValue::text("x"));
    }
}
