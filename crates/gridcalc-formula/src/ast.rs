//! Parsed formula shapes
//!
//! The grammar is shallow: a formula is either one function call or one bare
//! term, and arguments stay as text until they are classified.

/// A formula with its leading `=` stripped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedFormula {
    /// `NAME(arg, arg, ...)`
    Call {
        /// Function name as written
        name: String,
        /// Top-level arguments, trimmed
        args: Vec<String>,
    },
    /// Anything that is not a call: a reference or a literal
    Term(String),
}

/// Classification of one argument string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
    /// Nested function call spanning the whole argument
    Call {
        name: String,
        args: Vec<String>,
    },
    /// `START:END`
    Range { start: String, end: String },
    /// Single A1-style reference
    Reference(String),
    /// Anything else, with surrounding double quotes removed
    Literal(String),
}
