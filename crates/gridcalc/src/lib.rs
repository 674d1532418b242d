//! # gridcalc
//!
//! A small spreadsheet formula engine.
//!
//! gridcalc stores cells in a sparse grid addressed A1-style, evaluates
//! formulas of the form `=NAME(ARGS)` or `=TERM`, and records failures as
//! `#ERROR: <message>` values instead of returning them.
//!
//! ## Features
//!
//! - Built-in SUM, AVERAGE, MAX, MIN, COUNT, TRIM, UPPER, LOWER
//! - Cell and range references with circular reference detection
//! - Row and column insertion/deletion
//! - Whole-grid recalculation
//! - JSON snapshots (with the default `serde` feature)
//!
//! ## Example
//!
//! ```rust
//! use gridcalc::prelude::*;
//!
//! let mut sheet = Spreadsheet::new();
//! sheet.set_input("A1", "2").unwrap();
//! sheet.set_input("A2", "x").unwrap();
//! sheet.set_input("A3", "5").unwrap();
//!
//! let total = sheet.apply_formula("B1", "=SUM(A1:A3)").unwrap();
//! assert_eq!(total, CellValue::Number(7.0));
//!
//! let err = sheet.apply_formula("B2", "=FOO(A1)").unwrap();
//! assert_eq!(err.to_string(), "#ERROR: Unknown function: FOO");
//! ```

pub mod calculation;
pub mod prelude;
pub mod shared;
pub mod spreadsheet;

// Re-export calculation types
pub use calculation::{CalculationOptions, CalculationStats, GridCalculationExt};
pub use shared::SharedSpreadsheet;
pub use spreadsheet::Spreadsheet;

// Re-export core types
pub use gridcalc_core::{
    // Cell types
    Cell,
    CellAddress,
    CellId,
    CellRange,
    CellValue,
    // Error types
    Error,
    // Grid
    Grid,
    GridConfig,
    Result,
    Snapshot,
    ERROR_PREFIX,
};

// Re-export formula types
pub use gridcalc_formula::{
    evaluate_cell, function_registry, parse_formula, EvaluationContext, FormulaError,
    FormulaResult, FunctionCategory, FunctionDef, FunctionRegistry, ParsedFormula,
    MAX_REFERENCE_DEPTH,
};
