//! Formula error types

use gridcalc_core::Error as CoreError;
use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur during formula parsing or evaluation
///
/// The `Display` text is what ends up after `#ERROR: ` in a failed cell.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormulaError {
    /// Reference text that does not decode to a cell address
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Range used as a whole formula instead of a function argument
    #[error("Cell ranges can only be used within functions")]
    RangeNotAllowedHere,

    /// Function name not in the registry (name as written)
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    /// Wrong number of arguments
    #[error("{function} function requires {expected} argument(s), got {actual}")]
    ArgumentCountMismatch {
        function: String,
        expected: String,
        actual: usize,
    },

    /// Reference chain that comes back to a cell already being evaluated
    #[error("Circular reference detected")]
    CircularReference,

    /// Chain of formula references longer than [`MAX_REFERENCE_DEPTH`](crate::MAX_REFERENCE_DEPTH)
    #[error("Reference chain too deep (limit {0})")]
    ReferenceDepthExceeded(usize),

    /// Function result that is not a finite number
    #[error("Numeric overflow in {0}")]
    NumericOverflow(String),

    /// Formula text that does not follow the grammar
    #[error("Malformed formula: {0}")]
    MalformedFormula(String),
}

impl FormulaError {
    pub(crate) fn malformed<S: Into<String>>(detail: S) -> Self {
        FormulaError::MalformedFormula(detail.into())
    }
}

impl From<CoreError> for FormulaError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidAddress(text) | CoreError::InvalidRange(text) => {
                FormulaError::InvalidAddress(text)
            }
            other => FormulaError::MalformedFormula(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            FormulaError::UnknownFunction("FOO".into()).to_string(),
            "Unknown function: FOO"
        );
        assert_eq!(
            FormulaError::ArgumentCountMismatch {
                function: "TRIM".into(),
                expected: "exactly 1".into(),
                actual: 2,
            }
            .to_string(),
            "TRIM function requires exactly 1 argument(s), got 2"
        );
        assert_eq!(
            FormulaError::RangeNotAllowedHere.to_string(),
            "Cell ranges can only be used within functions"
        );
        assert_eq!(
            FormulaError::InvalidAddress("A0".into()).to_string(),
            "Invalid cell address: A0"
        );
        assert_eq!(
            FormulaError::ReferenceDepthExceeded(256).to_string(),
            "Reference chain too deep (limit 256)"
        );
        assert_eq!(
            FormulaError::NumericOverflow("SUM".into()).to_string(),
            "Numeric overflow in SUM"
        );
    }

    #[test]
    fn test_from_core_error() {
        let err: FormulaError = CoreError::InvalidRange("A1:".into()).into();
        assert_eq!(err, FormulaError::InvalidAddress("A1:".into()));
    }
}
