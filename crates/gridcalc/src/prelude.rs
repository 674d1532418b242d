//! Prelude module - common imports for gridcalc users
//!
//! ```rust
//! use gridcalc::prelude::*;
//! ```

pub use crate::{
    // Calculation types
    CalculationOptions,
    CalculationStats,
    // Cell types
    Cell,
    CellAddress,
    CellValue,
    // Error types
    Error,
    FormulaError,
    Grid,
    // Extension traits
    GridCalculationExt,
    GridConfig,
    Result,
    SharedSpreadsheet,
    Snapshot,
    // Main types
    Spreadsheet,
};
