//! Thread-safe handle to a spreadsheet
//!
//! Formula application holds the write lock for both the evaluation and the
//! store, so readers never see a formula without its computed value.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::calculation::CalculationStats;
use crate::{CellValue, Result, Snapshot, Spreadsheet};

/// Cloneable, lock-protected [`Spreadsheet`]
#[derive(Debug, Clone, Default)]
pub struct SharedSpreadsheet {
    inner: Arc<RwLock<Spreadsheet>>,
}

impl SharedSpreadsheet {
    /// Wrap a spreadsheet
    pub fn new(sheet: Spreadsheet) -> Self {
        Self {
            inner: Arc::new(RwLock::new(sheet)),
        }
    }

    /// Acquire a read guard
    ///
    /// Poisoning is ignored; every write is a single cell replace.
    pub fn read(&self) -> RwLockReadGuard<'_, Spreadsheet> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Acquire a write guard
    pub fn write(&self) -> RwLockWriteGuard<'_, Spreadsheet> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// See [`Spreadsheet::apply_formula`]
    pub fn apply_formula(&self, address: &str, formula: &str) -> Result<CellValue> {
        self.write().apply_formula(address, formula)
    }

    /// See [`Spreadsheet::set_input`]
    pub fn set_input(&self, address: &str, input: &str) -> Result<CellValue> {
        self.write().set_input(address, input)
    }

    /// See [`Spreadsheet::value`]
    pub fn value(&self, address: &str) -> Result<CellValue> {
        self.read().value(address)
    }

    /// See [`Spreadsheet::recalculate`]
    pub fn recalculate(&self) -> CalculationStats {
        self.write().recalculate()
    }

    /// See [`Spreadsheet::snapshot`]
    pub fn snapshot(&self) -> Snapshot {
        self.read().snapshot()
    }
}

impl From<Spreadsheet> for SharedSpreadsheet {
    fn from(sheet: Spreadsheet) -> Self {
        Self::new(sheet)
    }
}
