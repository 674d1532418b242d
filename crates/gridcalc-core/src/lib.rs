//! # gridcalc-core
//!
//! Core data structures for the gridcalc formula engine.
//!
//! This crate provides the fundamental types used throughout gridcalc:
//! - [`CellAddress`] and [`CellRange`] - A1-style addressing and ranges
//! - [`CellId`] - The grid's `row:col` key
//! - [`CellValue`] and [`Cell`] - Cell values and records
//! - [`Grid`] - The sparse cell store
//! - [`Snapshot`] - Export shape of a grid
//!
//! ## Example
//!
//! ```rust
//! use gridcalc_core::{CellAddress, CellValue, Grid};
//!
//! let mut grid = Grid::new();
//! grid.set_value("A1", 42.0).unwrap();
//!
//! let a1 = CellAddress::parse("A1").unwrap();
//! assert_eq!(a1.id().to_string(), "0:0");
//! assert_eq!(grid.value_at(a1), CellValue::Number(42.0));
//! ```

pub mod cell;
pub mod error;
pub mod grid;
pub mod snapshot;

// Re-exports for convenience
pub use cell::{
    format_number, parse_decimal, Cell, CellAddress, CellId, CellRange, CellRangeIterator,
    CellValue, ERROR_PREFIX,
};
pub use error::{Error, Result};
pub use grid::{Grid, GridConfig, DEFAULT_COLUMNS, DEFAULT_ROWS};
pub use snapshot::Snapshot;
