//! Cell value types

use lazy_regex::regex_is_match;
use std::fmt;

/// Prefix of the text form of an error value
pub const ERROR_PREFIX: &str = "#ERROR: ";

/// Represents the value stored in (or computed for) a cell
///
/// Raw values entered by a user are only ever `Number`, `Text` or `Empty`;
/// `Error` appears as the computed value of a formula that failed.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", content = "value", rename_all = "lowercase")
)]
pub enum CellValue {
    /// Empty cell (no value)
    #[default]
    Empty,

    /// Numeric value
    Number(f64),

    /// Text value
    Text(String),

    /// Evaluation error, holding the error message
    Error(String),
}

impl CellValue {
    /// Create a new text value
    pub fn text<S: Into<String>>(s: S) -> Self {
        CellValue::Text(s.into())
    }

    /// Create a new error value from a message
    pub fn error<S: Into<String>>(message: S) -> Self {
        CellValue::Error(message.into())
    }

    /// Classify typed input the way a user enters it into a cell
    ///
    /// - blank or whitespace-only -> `Empty`
    /// - decimal number -> `Number`
    /// - anything else -> `Text` (kept verbatim)
    pub fn from_input(input: &str) -> Self {
        if input.trim().is_empty() {
            return CellValue::Empty;
        }
        match parse_decimal(input) {
            Some(n) => CellValue::Number(n),
            None => CellValue::Text(input.to_string()),
        }
    }

    /// Check if the cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Check if the cell contains an error
    pub fn is_error(&self) -> bool {
        matches!(self, CellValue::Error(_))
    }

    /// Numeric coercion
    ///
    /// Numbers are numeric; text is numeric when its trimmed form is a
    /// decimal number. Empty cells and errors are never numeric.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => parse_decimal(s),
            CellValue::Empty | CellValue::Error(_) => None,
        }
    }

    /// Textual form of the value (same as `Display`)
    pub fn as_text(&self) -> String {
        self.to_string()
    }

    /// Get the error message if this is an error
    pub fn error_message(&self) -> Option<&str> {
        match self {
            CellValue::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Parse text as a plain decimal number (`12`, `-3.5`, `.5`, `1e3`)
///
/// Rejects the non-decimal spellings `f64::from_str` accepts (`inf`, `NaN`).
pub fn parse_decimal(text: &str) -> Option<f64> {
    let text = text.trim();
    if !regex_is_match!(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?$", text) {
        return None;
    }
    text.parse().ok().filter(|n: &f64| n.is_finite())
}

/// Format a number without a trailing `.0` for integral values
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number(n) => write!(f, "{}", format_number(*n)),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Error(message) => write!(f, "{}{}", ERROR_PREFIX, message),
        }
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::text(s)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}
