//! The spreadsheet session
//!
//! [`Spreadsheet`] owns a [`Grid`] and is the write path for formulas: it
//! evaluates against the current grid, then stores the formula together with
//! its computed value as one cell.

use crate::calculation::{CalculationOptions, CalculationStats, GridCalculationExt};
use crate::{evaluate_cell, Cell, CellAddress, CellValue, Grid, GridConfig, Result, Snapshot};

/// A single-sheet spreadsheet
#[derive(Debug, Clone, Default)]
pub struct Spreadsheet {
    grid: Grid,
}

impl Spreadsheet {
    /// Create an empty spreadsheet (100 rows x 26 columns)
    pub fn new() -> Self {
        Self { grid: Grid::new() }
    }

    /// Create an empty spreadsheet with a custom extent
    pub fn with_config(config: &GridConfig) -> Self {
        Self {
            grid: Grid::with_config(config),
        }
    }

    /// Wrap an existing grid
    pub fn from_grid(grid: Grid) -> Self {
        Self { grid }
    }

    /// Restore a spreadsheet from a snapshot
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self::from_grid(Grid::from_snapshot(snapshot))
    }

    /// The underlying grid
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable access to the grid (row/column edits, bulk loads)
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    // === Formulas ===

    /// Evaluate `formula` for the cell at `address` and store the result
    ///
    /// Only an invalid target address is an error; formula failures are
    /// stored (and returned) as an error value.
    pub fn apply_formula(&mut self, address: &str, formula: &str) -> Result<CellValue> {
        let addr = CellAddress::parse(address)?;
        Ok(self.apply_formula_at(addr, formula))
    }

    /// Evaluate `formula` for the cell at `addr` and store the result
    ///
    /// Text without a leading `=` is stored as a plain text value.
    pub fn apply_formula_at(&mut self, addr: CellAddress, formula: &str) -> CellValue {
        let value = evaluate_cell(&self.grid, addr, formula);
        tracing::debug!(cell = %addr, formula, value = %value, "applied formula");

        let cell = if formula.starts_with('=') {
            Cell::with_formula(addr.id(), formula, value.clone())
        } else {
            Cell::with_value(addr.id(), value.clone())
        };
        self.grid.put(cell);
        value
    }

    /// Store typed input the way a formula bar does
    ///
    /// Input starting with `=` goes through [`apply_formula`](Self::apply_formula);
    /// anything else becomes a number, text or an empty value.
    pub fn set_input(&mut self, address: &str, input: &str) -> Result<CellValue> {
        let addr = CellAddress::parse(address)?;
        if input.starts_with('=') {
            return Ok(self.apply_formula_at(addr, input));
        }

        let value = CellValue::from_input(input);
        self.grid.set_value_at(addr, value.clone());
        Ok(value)
    }

    // === Values ===

    /// Store a plain value, dropping any formula the cell had
    pub fn set_value<V: Into<CellValue>>(&mut self, address: &str, value: V) -> Result<()> {
        self.grid.set_value(address, value)
    }

    /// Remove the cell at `address`
    pub fn clear(&mut self, address: &str) -> Result<Option<Cell>> {
        let addr = CellAddress::parse(address)?;
        Ok(self.grid.clear_at(addr))
    }

    /// The cell at `address`, if one is stored
    pub fn cell(&self, address: &str) -> Result<Option<&Cell>> {
        self.grid.cell(address)
    }

    /// The value at `address` (computed value for formula cells)
    pub fn value(&self, address: &str) -> Result<CellValue> {
        let addr = CellAddress::parse(address)?;
        Ok(self.grid.value_at(addr))
    }

    // === Calculation ===

    /// Re-evaluate every formula cell
    pub fn recalculate(&mut self) -> CalculationStats {
        self.grid.recalculate()
    }

    /// Re-evaluate every formula cell with custom options
    pub fn recalculate_with_options(&mut self, options: &CalculationOptions) -> CalculationStats {
        self.grid.recalculate_with_options(options)
    }

    /// Copy of all cells plus the extent
    pub fn snapshot(&self) -> Snapshot {
        self.grid.snapshot()
    }
}
