//! Grid store
//!
//! Sparse mapping from [`CellId`] to [`Cell`]. Absent entries read as empty
//! cells. Every write replaces a whole cell.

use ahash::AHashMap;

use crate::cell::{Cell, CellAddress, CellId, CellRange, CellValue};
use crate::error::{Error, Result};
use crate::snapshot::Snapshot;

/// Default number of rows in a new grid
pub const DEFAULT_ROWS: u32 = 100;

/// Default number of columns in a new grid (A-Z)
pub const DEFAULT_COLUMNS: u32 = 26;

/// Initial extent of a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridConfig {
    /// Number of rows
    pub rows: u32,
    /// Number of columns
    pub columns: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
        }
    }
}

/// Axis for row/column insertion and deletion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Row,
    Column,
}

impl Axis {
    fn coord(&self, id: &CellId) -> u32 {
        match self {
            Axis::Row => id.row(),
            Axis::Column => id.col(),
        }
    }

    fn with_coord(&self, id: &CellId, coord: u32) -> CellId {
        match self {
            Axis::Row => CellId::new(coord, id.col()),
            Axis::Column => CellId::new(id.row(), coord),
        }
    }
}

/// The grid: owns every cell of a session
#[derive(Debug, Clone, Default)]
pub struct Grid {
    /// Cell storage
    cells: AHashMap<CellId, Cell>,
    /// Number of rows in the sheet extent
    row_count: u32,
    /// Number of columns in the sheet extent
    column_count: u32,
}

impl Grid {
    /// Create an empty grid with the default extent (100 x 26)
    pub fn new() -> Self {
        Self::with_config(&GridConfig::default())
    }

    /// Create an empty grid with the given extent
    pub fn with_config(config: &GridConfig) -> Self {
        Self {
            cells: AHashMap::new(),
            row_count: config.rows,
            column_count: config.columns,
        }
    }

    /// Number of rows in the extent
    pub fn row_count(&self) -> u32 {
        self.row_count
    }

    /// Number of columns in the extent
    pub fn column_count(&self) -> u32 {
        self.column_count
    }

    // === Cell Access ===

    /// Look up a cell by id
    pub fn get(&self, id: &CellId) -> Option<&Cell> {
        self.cells.get(id)
    }

    /// Look up a cell by address
    pub fn cell_at(&self, addr: CellAddress) -> Option<&Cell> {
        self.cells.get(&addr.id())
    }

    /// Look up a cell by A1-style address string
    pub fn cell(&self, address: &str) -> Result<Option<&Cell>> {
        let addr = CellAddress::parse(address)?;
        Ok(self.cell_at(addr))
    }

    /// The value of a cell (computed value for formula cells); absent cells are empty
    pub fn value_at(&self, addr: CellAddress) -> CellValue {
        self.cell_at(addr)
            .map(|c| c.value().clone())
            .unwrap_or(CellValue::Empty)
    }

    /// Number of stored cells
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Check if no cells are stored
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate over stored cells in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.values()
    }

    /// Ids of all cells holding a formula, row-major
    pub fn formula_cells(&self) -> Vec<CellId> {
        let mut ids: Vec<CellId> = self
            .cells
            .values()
            .filter(|c| c.is_formula())
            .map(|c| c.id)
            .collect();
        ids.sort();
        ids
    }

    /// Bounds of all stored cells
    pub fn used_range(&self) -> Option<CellRange> {
        let mut ids = self.cells.keys();
        let first = ids.next()?;
        let (mut min_row, mut min_col) = (first.row(), first.col());
        let (mut max_row, mut max_col) = (min_row, min_col);
        for id in ids {
            min_row = min_row.min(id.row());
            min_col = min_col.min(id.col());
            max_row = max_row.max(id.row());
            max_col = max_col.max(id.col());
        }
        Some(CellRange::from_indices(min_row, min_col, max_row, max_col))
    }

    // === Cell Modification ===

    /// Store a cell, replacing whatever was at its id
    ///
    /// The extent grows to include the cell.
    pub fn put(&mut self, cell: Cell) -> Option<Cell> {
        self.row_count = self.row_count.max(cell.id.row().saturating_add(1));
        self.column_count = self.column_count.max(cell.id.col().saturating_add(1));
        self.cells.insert(cell.id, cell)
    }

    /// Store a plain value at an address
    pub fn set_value_at<V: Into<CellValue>>(&mut self, addr: CellAddress, value: V) {
        self.put(Cell::with_value(addr.id(), value.into()));
    }

    /// Store a plain value by A1-style address string
    pub fn set_value<V: Into<CellValue>>(&mut self, address: &str, value: V) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_value_at(addr, value);
        Ok(())
    }

    /// Remove a cell
    pub fn clear_at(&mut self, addr: CellAddress) -> Option<Cell> {
        self.cells.remove(&addr.id())
    }

    /// Remove all cells, keeping the extent
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    // === Row / Column Operations ===

    /// Insert an empty row at `at`, shifting rows below it down
    pub fn insert_row(&mut self, at: u32) -> Result<()> {
        if at > self.row_count {
            return Err(Error::RowOutOfBounds(at, self.row_count));
        }
        self.shift(Axis::Row, at, true);
        self.row_count = self.row_count.saturating_add(1);
        Ok(())
    }

    /// Delete row `at`, shifting rows below it up
    pub fn delete_row(&mut self, at: u32) -> Result<()> {
        if at >= self.row_count {
            return Err(Error::RowOutOfBounds(at, self.row_count));
        }
        self.shift(Axis::Row, at, false);
        self.row_count -= 1;
        Ok(())
    }

    /// Insert an empty column at `at`, shifting columns to its right
    pub fn insert_column(&mut self, at: u32) -> Result<()> {
        if at > self.column_count {
            return Err(Error::ColumnOutOfBounds(at, self.column_count));
        }
        self.shift(Axis::Column, at, true);
        self.column_count = self.column_count.saturating_add(1);
        Ok(())
    }

    /// Delete column `at`, shifting columns to its right left
    pub fn delete_column(&mut self, at: u32) -> Result<()> {
        if at >= self.column_count {
            return Err(Error::ColumnOutOfBounds(at, self.column_count));
        }
        self.shift(Axis::Column, at, false);
        self.column_count -= 1;
        Ok(())
    }

    /// Re-key cells at or past `at` on `axis`. Cells exactly at `at` are
    /// dropped when deleting. Formula text is left as written.
    fn shift(&mut self, axis: Axis, at: u32, insert: bool) {
        let cells = std::mem::take(&mut self.cells);
        self.cells.reserve(cells.len());

        for (id, cell) in cells {
            let coord = axis.coord(&id);
            let new_id = if coord < at {
                id
            } else if insert {
                match coord.checked_add(1) {
                    Some(c) => axis.with_coord(&id, c),
                    // Pushed past the last addressable index
                    None => continue,
                }
            } else if coord == at {
                continue;
            } else {
                axis.with_coord(&id, coord - 1)
            };
            self.cells.insert(new_id, cell.moved_to(new_id));
        }
    }

    // === Snapshot ===

    /// Copy of all cells plus the extent
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            cells: self.cells.iter().map(|(id, c)| (*id, c.clone())).collect(),
            row_count: self.row_count,
            column_count: self.column_count,
        }
    }

    /// Rebuild a grid from a snapshot
    ///
    /// Map keys win over the ids stored inside the cell records.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut grid = Self {
            cells: AHashMap::with_capacity(snapshot.cells.len()),
            row_count: snapshot.row_count,
            column_count: snapshot.column_count,
        };
        for (id, cell) in snapshot.cells {
            grid.put(cell.moved_to(id));
        }
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn addr(s: &str) -> CellAddress {
        CellAddress::parse(s).unwrap()
    }

    #[test]
    fn test_absent_cells_read_empty() {
        let grid = Grid::new();
        assert!(grid.cell_at(addr("A1")).is_none());
        assert_eq!(grid.value_at(addr("A1")), CellValue::Empty);
        assert_eq!(grid.row_count(), 100);
        assert_eq!(grid.column_count(), 26);
    }

    #[test]
    fn test_put_replaces_whole_cell() {
        let mut grid = Grid::new();
        let id = addr("B2").id();
        grid.put(Cell::with_formula(id, "=A1", CellValue::Number(1.0)));
        grid.put(Cell::with_value(id, CellValue::text("plain")));

        let cell = grid.get(&id).unwrap();
        assert_eq!(cell.formula, None);
        assert_eq!(cell.computed, CellValue::text("plain"));
    }

    #[test]
    fn test_put_grows_extent() {
        let mut grid = Grid::with_config(&GridConfig {
            rows: 2,
            columns: 2,
        });
        grid.set_value("E10", 1.0).unwrap();
        assert_eq!(grid.row_count(), 10);
        assert_eq!(grid.column_count(), 5);
    }

    #[test]
    fn test_set_value_rejects_bad_address() {
        let mut grid = Grid::new();
        assert!(grid.set_value("1A", 1.0).is_err());
    }

    #[test]
    fn test_formula_cells_row_major() {
        let mut grid = Grid::new();
        for a in ["B2", "A2", "C1"] {
            let id = addr(a).id();
            grid.put(Cell::with_formula(id, "=1", CellValue::Number(1.0)));
        }
        grid.set_value("A1", 5.0).unwrap();

        let ids: Vec<String> = grid
            .formula_cells()
            .iter()
            .map(|id| id.address().to_string())
            .collect();
        assert_eq!(ids, vec!["C1", "A2", "B2"]);
    }

    #[test]
    fn test_used_range() {
        let mut grid = Grid::new();
        assert!(grid.used_range().is_none());
        grid.set_value("B3", 1.0).unwrap();
        grid.set_value("D2", 1.0).unwrap();
        assert_eq!(grid.used_range().unwrap().to_string(), "B2:D3");
    }

    #[test]
    fn test_insert_and_delete_row() {
        let mut grid = Grid::new();
        grid.set_value("A1", 1.0).unwrap();
        grid.set_value("A2", 2.0).unwrap();
        grid.set_value("A3", 3.0).unwrap();

        grid.insert_row(1).unwrap();
        assert_eq!(grid.row_count(), 101);
        assert_eq!(grid.value_at(addr("A1")), CellValue::Number(1.0));
        assert_eq!(grid.value_at(addr("A2")), CellValue::Empty);
        assert_eq!(grid.value_at(addr("A3")), CellValue::Number(2.0));
        assert_eq!(grid.cell("A4").unwrap().unwrap().id, addr("A4").id());

        grid.delete_row(0).unwrap();
        assert_eq!(grid.row_count(), 100);
        assert_eq!(grid.value_at(addr("A1")), CellValue::Empty);
        assert_eq!(grid.value_at(addr("A2")), CellValue::Number(2.0));
        assert_eq!(grid.value_at(addr("A3")), CellValue::Number(3.0));
        assert_eq!(grid.cell_count(), 2);
    }

    #[test]
    fn test_insert_and_delete_column() {
        let mut grid = Grid::new();
        grid.set_value("A1", 1.0).unwrap();
        grid.set_value("B1", 2.0).unwrap();

        grid.insert_column(0).unwrap();
        assert_eq!(grid.column_count(), 27);
        assert_eq!(grid.value_at(addr("B1")), CellValue::Number(1.0));
        assert_eq!(grid.value_at(addr("C1")), CellValue::Number(2.0));

        grid.delete_column(2).unwrap();
        assert_eq!(grid.column_count(), 26);
        assert_eq!(grid.value_at(addr("C1")), CellValue::Empty);
        assert_eq!(grid.cell_count(), 1);
    }

    #[test]
    fn test_row_column_bounds() {
        let mut grid = Grid::new();
        assert_eq!(grid.delete_row(100), Err(Error::RowOutOfBounds(100, 100)));
        assert_eq!(
            grid.insert_column(27),
            Err(Error::ColumnOutOfBounds(27, 26))
        );
        assert!(grid.insert_row(100).is_ok());
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut grid = Grid::new();
        grid.set_value("A1", 2.0).unwrap();
        grid.put(Cell::with_formula(
            addr("A2").id(),
            "=A1",
            CellValue::Number(2.0),
        ));

        let snapshot = grid.snapshot();
        assert_eq!(snapshot.cells.len(), 2);
        assert_eq!(snapshot.row_count, 100);

        let restored = Grid::from_snapshot(snapshot);
        assert_eq!(restored.cell_count(), 2);
        assert_eq!(
            restored.cell("A2").unwrap().unwrap().formula.as_deref(),
            Some("=A1")
        );
    }
}
