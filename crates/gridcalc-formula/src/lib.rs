//! # gridcalc-formula
//!
//! Formula parser and evaluator for gridcalc.
//!
//! This crate provides:
//! - Formula parsing (`=NAME(ARGS)` or `=TERM`)
//! - Reference resolution with cycle detection
//! - Built-in functions (SUM, AVERAGE, MAX, MIN, COUNT, TRIM, UPPER, LOWER)
//!
//! ## Example
//!
//! ```rust
//! use gridcalc_core::{CellAddress, CellValue, Grid};
//! use gridcalc_formula::evaluate_cell;
//!
//! let grid = Grid::new();
//! let target = CellAddress::parse("A1").unwrap();
//!
//! let value = evaluate_cell(&grid, target, "=FOO(B1)");
//! assert_eq!(value.to_string(), "#ERROR: Unknown function: FOO");
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod functions;
pub mod parser;
pub mod resolver;

pub use ast::{Argument, ParsedFormula};
pub use error::{FormulaError, FormulaResult};
pub use evaluator::{evaluate_cell, function_registry, EvaluationContext};
pub use functions::{FunctionCategory, FunctionDef, FunctionRegistry};
pub use parser::{parse_formula, split_arguments};
pub use resolver::{classify_argument, is_reference, MAX_REFERENCE_DEPTH};
