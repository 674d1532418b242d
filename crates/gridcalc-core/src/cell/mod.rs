//! Cell-related types and utilities
//!
//! This module contains:
//! - [`CellAddress`] - A cell's location (e.g., "A1")
//! - [`CellRange`] - A rectangular range of cells (e.g., "A1:B10")
//! - [`CellId`] - The grid's internal key for an address
//! - [`CellValue`] - A raw or computed cell value
//! - [`Cell`] - The complete cell record

mod address;
mod value;

pub use address::{CellAddress, CellRange, CellRangeIterator};
pub use value::{format_number, parse_decimal, CellValue, ERROR_PREFIX};

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Canonical internal key of a cell, written `row:col` (zero-based)
///
/// Ordering is row-major, so ordered maps keyed by `CellId` iterate the
/// same way ranges do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId {
    row: u32,
    col: u32,
}

impl CellId {
    /// Create an id from zero-based indices
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Zero-based row
    pub fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column
    pub fn col(&self) -> u32 {
        self.col
    }

    /// The address this id was derived from
    pub fn address(&self) -> CellAddress {
        CellAddress::new(self.row, self.col)
    }
}

impl From<CellAddress> for CellId {
    fn from(addr: CellAddress) -> Self {
        Self::new(addr.row, addr.col)
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.col)
    }
}

impl FromStr for CellId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidCellId(s.to_string());
        let (row, col) = s.split_once(':').ok_or_else(invalid)?;
        let row = row.parse().map_err(|_| invalid())?;
        let col = col.parse().map_err(|_| invalid())?;
        Ok(Self::new(row, col))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for CellId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for CellId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Complete data for a single cell
///
/// A cell is always replaced as a whole: a formula and its computed value are
/// written together.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    /// Grid key
    pub id: CellId,
    /// Value as entered (never an error; `Empty` for formula cells)
    #[cfg_attr(feature = "serde", serde(rename = "rawValue"))]
    pub raw: CellValue,
    /// Formula text including the leading `=`
    #[cfg_attr(
        feature = "serde",
        serde(rename = "formulaText", default, skip_serializing_if = "Option::is_none")
    )]
    pub formula: Option<String>,
    /// Result of the last evaluation, or the raw value for plain cells
    #[cfg_attr(feature = "serde", serde(rename = "computedValue"))]
    pub computed: CellValue,
}

impl Cell {
    /// Create a plain (non-formula) cell
    pub fn with_value(id: CellId, raw: CellValue) -> Self {
        Self {
            id,
            computed: raw.clone(),
            raw,
            formula: None,
        }
    }

    /// Create a formula cell with its computed result
    pub fn with_formula<S: Into<String>>(id: CellId, formula: S, computed: CellValue) -> Self {
        Self {
            id,
            raw: CellValue::Empty,
            formula: Some(formula.into()),
            computed,
        }
    }

    /// Address of the cell
    pub fn address(&self) -> CellAddress {
        self.id.address()
    }

    /// Check if the cell holds a formula
    pub fn is_formula(&self) -> bool {
        self.formula.is_some()
    }

    /// The value other cells see when they reference this one
    pub fn value(&self) -> &CellValue {
        &self.computed
    }

    /// Same cell contents under a different key (used when rows/columns shift)
    pub(crate) fn moved_to(mut self, id: CellId) -> Self {
        self.id = id;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_id_text_form() {
        let id = CellAddress::parse("C5").unwrap().id();
        assert_eq!(id.to_string(), "4:2");
        assert_eq!("4:2".parse::<CellId>().unwrap(), id);
        assert_eq!(id.address().to_string(), "C5");

        assert!("4".parse::<CellId>().is_err());
        assert!("a:b".parse::<CellId>().is_err());
        assert!("-1:0".parse::<CellId>().is_err());
    }

    #[test]
    fn test_cell_id_order_is_row_major() {
        let mut ids = vec![CellId::new(1, 0), CellId::new(0, 1), CellId::new(0, 0)];
        ids.sort();
        assert_eq!(
            ids,
            vec![CellId::new(0, 0), CellId::new(0, 1), CellId::new(1, 0)]
        );
    }

    #[test]
    fn test_cell_constructors() {
        let id = CellId::new(0, 0);
        let plain = Cell::with_value(id, CellValue::Number(3.0));
        assert_eq!(plain.value(), &CellValue::Number(3.0));
        assert!(!plain.is_formula());

        let formula = Cell::with_formula(id, "=SUM(B1:B2)", CellValue::Number(9.0));
        assert!(formula.is_formula());
        assert_eq!(formula.raw, CellValue::Empty);
        assert_eq!(formula.value(), &CellValue::Number(9.0));
    }
}
