use std::fmt;

use serde::{Deserialize, Serialize};

/// A single decoded spreadsheet cell.
///
/// Columns are not statically typed, so the same column may hold text in one
/// row and a number in the next.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Text(String),
    Number(f64),
    #[default]
    Empty,
}

pub(crate) static EMPTY: CellValue = CellValue::Empty;

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn number(value: f64) -> Self {
        Self::Number(value)
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

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// True for cells that carry no usable value: `Empty` or zero-length text.
    pub fn is_absent(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(value) => value.is_empty(),
            Self::Number(_) => false,
        }
    }

    /// True for `Empty`, zero-length text, zero and NaN.
    pub fn is_falsy(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(value) => value.is_empty(),
            Self::Number(value) => *value == 0.0 || value.is_nan(),
        }
    }

    /// String form used to look the cell up in a mapping dictionary.
    ///
    /// Numbers use [`format_number`], so a numeric `5` finds the entry keyed
    /// `"5"`. Empty cells have no key.
    pub fn lookup_key(&self) -> Option<String> {
        match self {
            Self::Text(value) => Some(value.clone()),
            Self::Number(value) => Some(format_number(*value)),
            Self::Empty => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(value) => f.write_str(value),
            Self::Number(value) => f.write_str(&format_number(*value)),
            Self::Empty => Ok(()),
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
        Self::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

/// Formats a number the way spreadsheet tools print it as text.
///
/// Integral values have no fractional part (`5.0` -> `"5"`), negative zero
/// prints as `"0"` and infinities print as `"Infinity"`. Magnitudes from
/// `1e21` up and below `1e-6` switch to exponent form with a signed
/// exponent (`"1e+21"`, `"1.5e-7"`).
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        };
    }
    if value.is_nan() {
        return "NaN".to_string();
    }
    let scientific = format!("{value:e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return format!("{value}");
    };
    match exponent.parse::<i32>() {
        Ok(exp) if exp >= 21 => format!("{mantissa}e+{exp}"),
        Ok(exp) if exp <= -7 => format!("{mantissa}e{exp}"),
        _ => format!("{value}"),
    }
}
