//! Grid recalculation
//!
//! Re-evaluates every formula cell in row-major order and writes each result
//! back. Evaluation is pull-based, so a cell that references a formula cell
//! later in the order still sees a fresh value.
//!
//! # Example
//!
//! ```rust
//! use gridcalc::prelude::*;
//!
//! let mut sheet = Spreadsheet::new();
//! sheet.set_value("A1", 10.0).unwrap();
//! sheet.apply_formula("A2", "=SUM(A1, 5)").unwrap();
//!
//! sheet.set_value("A1", 20.0).unwrap();
//! let stats = sheet.recalculate();
//! assert_eq!(stats.cells_calculated, 1);
//! assert_eq!(sheet.value("A2").unwrap(), CellValue::Number(25.0));
//! ```

use crate::{evaluate_cell, Cell, Grid};

/// Options for recalculation
#[derive(Debug, Clone, Default)]
pub struct CalculationOptions {
    /// Stop after the first cell whose formula fails
    pub stop_on_error: bool,
}

/// Statistics from a calculation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalculationStats {
    /// Total number of formula cells
    pub formula_count: usize,
    /// Number of cells calculated
    pub cells_calculated: usize,
    /// Number of cells whose formula produced an error
    pub errors: usize,
}

/// Extension trait for Grid to add calculation methods
pub trait GridCalculationExt {
    /// Recalculate all formulas with default options
    fn recalculate(&mut self) -> CalculationStats;

    /// Recalculate all formulas with custom options
    fn recalculate_with_options(&mut self, options: &CalculationOptions) -> CalculationStats;
}

impl GridCalculationExt for Grid {
    fn recalculate(&mut self) -> CalculationStats {
        self.recalculate_with_options(&CalculationOptions::default())
    }

    fn recalculate_with_options(&mut self, options: &CalculationOptions) -> CalculationStats {
        let order = self.formula_cells();
        let mut stats = CalculationStats {
            formula_count: order.len(),
            ..Default::default()
        };
        tracing::debug!(formulas = stats.formula_count, "recalculating");

        for id in order {
            let formula = match self.get(&id).and_then(|cell| cell.formula.clone()) {
                Some(formula) => formula,
                None => continue,
            };

            let value = evaluate_cell(self, id.address(), &formula);
            let failed = value.is_error();
            if let Some(message) = value.error_message() {
                tracing::warn!(cell = %id.address(), error = message, "formula error");
                stats.errors += 1;
            }

            self.put(Cell::with_formula(id, formula, value));
            stats.cells_calculated += 1;

            if failed && options.stop_on_error {
                break;
            }
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CellAddress, CellValue};
    use pretty_assertions::assert_eq;

    fn put_formula(grid: &mut Grid, at: &str, formula: &str) {
        let addr = CellAddress::parse(at).unwrap();
        let value = evaluate_cell(grid, addr, formula);
        grid.put(Cell::with_formula(addr.id(), formula, value));
    }

    #[test]
    fn test_recalculate_refreshes_stored_values() {
        let mut grid = Grid::new();
        grid.set_value("A1", 1.0).unwrap();
        put_formula(&mut grid, "B1", "=SUM(A1, 1)");
        put_formula(&mut grid, "A2", "=B1");

        grid.set_value("A1", 5.0).unwrap();
        let stats = grid.recalculate();

        assert_eq!(
            stats,
            CalculationStats {
                formula_count: 2,
                cells_calculated: 2,
                errors: 0,
            }
        );
        assert_eq!(grid.cell("B1").unwrap().unwrap().computed, CellValue::Number(6.0));
        assert_eq!(grid.cell("A2").unwrap().unwrap().computed, CellValue::Number(6.0));
    }

    #[test]
    fn test_stop_on_error() {
        let mut grid = Grid::new();
        put_formula(&mut grid, "A1", "=FOO()");
        put_formula(&mut grid, "A2", "=BAR()");
        put_formula(&mut grid, "A3", "=SUM(1)");

        let stats = grid.recalculate();
        assert_eq!(stats.errors, 2);
        assert_eq!(stats.cells_calculated, 3);

        let options = CalculationOptions {
            stop_on_error: true,
        };
        let stats = grid.recalculate_with_options(&options);
        assert_eq!(stats.formula_count, 3);
        assert_eq!(stats.errors, 1);
        assert_eq!(stats.cells_calculated, 1);
    }
}
