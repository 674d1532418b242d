//! Snapshot export shape
//!
//! `{ cells: CellId -> Cell, rowCount, columnCount }`, consumed by whatever
//! save feature sits on top of the engine. With the `serde` feature enabled it
//! serializes with camelCase field names and `row:col` map keys.

use std::collections::BTreeMap;

use crate::cell::{Cell, CellId};

/// Copy of a grid's cells and extent
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Snapshot {
    /// All stored cells, row-major
    pub cells: BTreeMap<CellId, Cell>,
    /// Number of rows
    pub row_count: u32,
    /// Number of columns
    pub column_count: u32,
}
