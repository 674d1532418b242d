//! Cell address and range types

use super::CellId;
use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// A cell address (e.g., "A1", "AB12")
///
/// Column letters are bijective base-26 (no zero digit), rows are 1-based in
/// text and 0-based internally. Every address has exactly one textual form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellAddress {
    /// Row index (0-based internally, 1-based in display)
    pub row: u32,
    /// Column index (0-based, A=0, B=1, ..., AA=26)
    pub col: u32,
}

impl CellAddress {
    /// Create a new cell address
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Parse a cell address from A1-style notation
    ///
    /// The text must match `[A-Z]+[0-9]+` exactly. Row `0` and row numbers
    /// with leading zeros have no address and are rejected.
    ///
    /// # Examples
    /// ```
    /// use gridcalc_core::CellAddress;
    ///
    /// let addr = CellAddress::parse("A1").unwrap();
    /// assert_eq!(addr.row, 0);
    /// assert_eq!(addr.col, 0);
    ///
    /// let addr = CellAddress::parse("AA10").unwrap();
    /// assert_eq!(addr.row, 9);
    /// assert_eq!(addr.col, 26);
    ///
    /// assert!(CellAddress::parse("a1").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(Error::InvalidAddress("empty address".into()));
        }

        let split = s
            .bytes()
            .position(|b| !b.is_ascii_uppercase())
            .unwrap_or(s.len());

        if split == 0 {
            return Err(Error::InvalidAddress(format!(
                "no column letters in '{}'",
                s
            )));
        }

        let (letters, digits) = s.split_at(split);

        if digits.is_empty() {
            return Err(Error::InvalidAddress(format!("no row number in '{}'", s)));
        }

        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidAddress(format!(
                "invalid row number in '{}'",
                s
            )));
        }

        if digits.starts_with('0') {
            return Err(Error::InvalidAddress(format!(
                "row number must be >= 1 without leading zeros in '{}'",
                s
            )));
        }

        let row: u64 = digits
            .parse()
            .map_err(|_| Error::InvalidAddress(format!("row number too large in '{}'", s)))?;
        let row = u32::try_from(row - 1)
            .map_err(|_| Error::InvalidAddress(format!("row number too large in '{}'", s)))?;

        let col = Self::letters_to_column(letters)?;

        Ok(Self { row, col })
    }

    /// Convert column index to letters (0 = A, 25 = Z, 26 = AA, etc.)
    pub fn column_to_letters(col: u32) -> String {
        let mut result = String::new();
        let mut n = col as u64 + 1; // 1-based for calculation

        while n > 0 {
            n -= 1;
            let c = ((n % 26) as u8 + b'A') as char;
            result.insert(0, c);
            n /= 26;
        }

        result
    }

    /// Convert column letters to index (A = 0, Z = 25, AA = 26, etc.)
    ///
    /// Only uppercase ASCII letters are accepted.
    pub fn letters_to_column(letters: &str) -> Result<u32> {
        if letters.is_empty() {
            return Err(Error::InvalidAddress("empty column letters".into()));
        }

        let mut col: u64 = 0;
        for c in letters.bytes() {
            if !c.is_ascii_uppercase() {
                return Err(Error::InvalidAddress(format!(
                    "invalid column letter '{}'",
                    c as char
                )));
            }
            col = col
                .checked_mul(26)
                .and_then(|v| v.checked_add((c - b'A') as u64 + 1))
                .filter(|v| *v <= u32::MAX as u64 + 1)
                .ok_or_else(|| Error::InvalidAddress(format!("column too large: {}", letters)))?;
        }

        // Convert to 0-based
        Ok((col - 1) as u32)
    }

    /// Format as A1-style string
    pub fn to_a1_string(&self) -> String {
        format!(
            "{}{}",
            Self::column_to_letters(self.col),
            self.row as u64 + 1
        )
    }

    /// The grid key for this address
    pub fn id(&self) -> CellId {
        CellId::from(*self)
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

impl FromStr for CellAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A range of cells (e.g., "A1:B10")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRange {
    /// Start address (top-left)
    pub start: CellAddress,
    /// End address (bottom-right)
    pub end: CellAddress,
}

impl CellRange {
    /// Create a new cell range
    pub fn new(start: CellAddress, end: CellAddress) -> Self {
        // Normalize so start is top-left and end is bottom-right
        Self {
            start: CellAddress::new(start.row.min(end.row), start.col.min(end.col)),
            end: CellAddress::new(start.row.max(end.row), start.col.max(end.col)),
        }
    }

    /// Create a range from row/column indices
    pub fn from_indices(start_row: u32, start_col: u32, end_row: u32, end_col: u32) -> Self {
        Self::new(
            CellAddress::new(start_row, start_col),
            CellAddress::new(end_row, end_col),
        )
    }

    /// Create a single-cell range
    pub fn single(addr: CellAddress) -> Self {
        Self {
            start: addr,
            end: addr,
        }
    }

    /// Parse a range from A1:B10 notation
    pub fn parse(s: &str) -> Result<Self> {
        if let Some((start, end)) = s.split_once(':') {
            if end.contains(':') {
                return Err(Error::InvalidRange(s.to_string()));
            }
            let start = CellAddress::parse(start.trim())?;
            let end = CellAddress::parse(end.trim())?;
            Ok(Self::new(start, end))
        } else {
            // Single cell range
            let addr = CellAddress::parse(s.trim())?;
            Ok(Self::single(addr))
        }
    }

    /// Check if a cell is within this range
    pub fn contains(&self, addr: &CellAddress) -> bool {
        addr.row >= self.start.row
            && addr.row <= self.end.row
            && addr.col >= self.start.col
            && addr.col <= self.end.col
    }

    /// Get the number of rows in the range
    pub fn row_count(&self) -> u64 {
        (self.end.row - self.start.row) as u64 + 1
    }

    /// Get the number of columns in the range
    pub fn col_count(&self) -> u64 {
        (self.end.col - self.start.col) as u64 + 1
    }

    /// Get the total number of cells in the range
    pub fn cell_count(&self) -> u64 {
        self.row_count().saturating_mul(self.col_count())
    }

    /// Iterate over all cell addresses in the range (row by row)
    pub fn cells(&self) -> CellRangeIterator {
        CellRangeIterator {
            range: *self,
            next: Some(self.start),
        }
    }

    /// Format as A1:B10 string
    pub fn to_a1_string(&self) -> String {
        if self.start == self.end {
            self.start.to_a1_string()
        } else {
            format!("{}:{}", self.start.to_a1_string(), self.end.to_a1_string())
        }
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

impl FromStr for CellRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Iterator over cells in a range, row-major
pub struct CellRangeIterator {
    range: CellRange,
    next: Option<CellAddress>,
}

impl Iterator for CellRangeIterator {
    type Item = CellAddress;

    fn next(&mut self) -> Option<Self::Item> {
        let addr = self.next?;

        // Move to next cell
        self.next = if addr.col < self.range.end.col {
            Some(CellAddress::new(addr.row, addr.col + 1))
        } else if addr.row < self.range.end.row {
            Some(CellAddress::new(addr.row + 1, self.range.start.col))
        } else {
            None
        };

        Some(addr)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.next {
            None => 0,
            Some(addr) => {
                let full_rows = (self.range.end.row - addr.row) as u64;
                let in_row = (self.range.end.col - addr.col) as u64 + 1;
                full_rows
                    .saturating_mul(self.range.col_count())
                    .saturating_add(in_row)
            }
        };
        let remaining = usize::try_from(remaining).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CellRangeIterator {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_column_to_letters() {
        assert_eq!(CellAddress::column_to_letters(0), "A");
        assert_eq!(CellAddress::column_to_letters(1), "B");
        assert_eq!(CellAddress::column_to_letters(25), "Z");
        assert_eq!(CellAddress::column_to_letters(26), "AA");
        assert_eq!(CellAddress::column_to_letters(27), "AB");
        assert_eq!(CellAddress::column_to_letters(701), "ZZ");
        assert_eq!(CellAddress::column_to_letters(702), "AAA");
        assert_eq!(CellAddress::column_to_letters(16383), "XFD");
    }

    #[test]
    fn test_letters_to_column() {
        assert_eq!(CellAddress::letters_to_column("A").unwrap(), 0);
        assert_eq!(CellAddress::letters_to_column("Z").unwrap(), 25);
        assert_eq!(CellAddress::letters_to_column("AA").unwrap(), 26);
        assert_eq!(CellAddress::letters_to_column("ZZ").unwrap(), 701);
        assert_eq!(CellAddress::letters_to_column("AAA").unwrap(), 702);

        assert!(CellAddress::letters_to_column("a").is_err());
        assert!(CellAddress::letters_to_column("").is_err());
    }

    #[test]
    fn test_column_extremes() {
        let letters = CellAddress::column_to_letters(u32::MAX);
        assert_eq!(CellAddress::letters_to_column(&letters).unwrap(), u32::MAX);

        let too_wide = format!("{}A", letters);
        assert!(CellAddress::letters_to_column(&too_wide).is_err());
    }

    #[test]
    fn test_cell_address_parse() {
        assert_eq!(CellAddress::parse("A1").unwrap(), CellAddress::new(0, 0));
        assert_eq!(CellAddress::parse("B2").unwrap(), CellAddress::new(1, 1));
        assert_eq!(CellAddress::parse("C12").unwrap(), CellAddress::new(11, 2));
        assert_eq!(
            CellAddress::parse("XFD1048576").unwrap(),
            CellAddress::new(1048575, 16383)
        );
    }

    #[test]
    fn test_cell_address_parse_errors() {
        assert!(CellAddress::parse("").is_err());
        assert!(CellAddress::parse("A").is_err());
        assert!(CellAddress::parse("1").is_err());
        assert!(CellAddress::parse("A0").is_err());
        assert!(CellAddress::parse("A01").is_err());
        assert!(CellAddress::parse("a1").is_err());
        assert!(CellAddress::parse("$A$1").is_err());
        assert!(CellAddress::parse("A1B").is_err());
        assert!(CellAddress::parse(" A1").is_err());
        assert!(CellAddress::parse("A99999999999").is_err());
    }

    #[test]
    fn test_row_extremes() {
        let addr = CellAddress::new(u32::MAX, 0);
        assert_eq!(addr.to_string(), "A4294967296");
        assert_eq!(CellAddress::parse("A4294967296").unwrap(), addr);
        assert!(CellAddress::parse("A4294967297").is_err());
    }

    #[test]
    fn test_cell_address_display() {
        assert_eq!(CellAddress::new(0, 0).to_string(), "A1");
        assert_eq!(CellAddress::new(99, 2).to_string(), "C100");
        assert_eq!(CellAddress::new(0, 26).to_string(), "AA1");
    }

    #[test]
    fn test_round_trip_grid() {
        for row in 0..1000u32 {
            for col in 0..=700u32 {
                let addr = CellAddress::new(row, col);
                assert_eq!(CellAddress::parse(&addr.to_a1_string()).unwrap(), addr);
            }
        }
    }

    proptest! {
        #[test]
        fn address_round_trips(row in any::<u32>(), col in any::<u32>()) {
            let addr = CellAddress::new(row, col);
            prop_assert_eq!(CellAddress::parse(&addr.to_a1_string()).unwrap(), addr);
        }

        #[test]
        fn well_formed_text_round_trips(letters in "[A-Z]{1,4}", row in 1u32..=1_000_000) {
            let text = format!("{}{}", letters, row);
            let addr = CellAddress::parse(&text).unwrap();
            prop_assert_eq!(addr.to_a1_string(), text);
        }
    }

    #[test]
    fn test_cell_range_parse() {
        let range = CellRange::parse("A1:B2").unwrap();
        assert_eq!(range.start, CellAddress::new(0, 0));
        assert_eq!(range.end, CellAddress::new(1, 1));

        // Reversed corners normalize
        let range = CellRange::parse("B2:A1").unwrap();
        assert_eq!(range.start, CellAddress::new(0, 0));
        assert_eq!(range.end, CellAddress::new(1, 1));

        // Single cell
        let range = CellRange::parse("C3").unwrap();
        assert_eq!(range.start, CellAddress::new(2, 2));
        assert_eq!(range.end, CellAddress::new(2, 2));

        assert!(CellRange::parse("A1:B2:C3").is_err());
        assert!(CellRange::parse("A1:").is_err());
    }

    #[test]
    fn test_cell_range_contains() {
        let range = CellRange::parse("B2:D4").unwrap();

        assert!(range.contains(&CellAddress::new(1, 1))); // B2
        assert!(range.contains(&CellAddress::new(3, 3))); // D4
        assert!(!range.contains(&CellAddress::new(0, 0))); // A1
        assert!(!range.contains(&CellAddress::new(4, 1))); // B5
    }

    #[test]
    fn test_cell_range_iterator() {
        let range = CellRange::parse("A1:B2").unwrap();
        let cells: Vec<String> = range.cells().map(|a| a.to_string()).collect();

        assert_eq!(cells, vec!["A1", "B1", "A2", "B2"]);
        assert_eq!(range.cells().len(), 4);
    }

    #[test]
    fn test_cell_range_iterator_at_column_limit() {
        let range = CellRange::from_indices(0, u32::MAX - 1, 1, u32::MAX);
        let cells: Vec<_> = range.cells().collect();
        assert_eq!(cells.len(), 4);
        assert_eq!(cells[3], CellAddress::new(1, u32::MAX));
    }
}
