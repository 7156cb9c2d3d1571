//! A1-style cell coordinates

use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};
use std::fmt;

/// Zero-based location of one cell
///
/// `row` 0 is spreadsheet row 1 and `col` 0 is column `A`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellAddress {
    pub row: u32,
    pub col: u16,
}

impl CellAddress {
    pub fn new(row: u32, col: u16) -> Self {
        Self { row, col }
    }

    /// Read a reference such as `B7` or `$B$7`
    ///
    /// ```
    /// use sheetkit_core::CellAddress;
    ///
    /// assert_eq!(CellAddress::parse("b7").unwrap(), CellAddress::new(6, 1));
    /// assert_eq!(CellAddress::parse("$B$7").unwrap(), CellAddress::new(6, 1));
    /// ```
    pub fn parse(reference: &str) -> Result<Self> {
        let text = reference.trim();
        let invalid = |why: &str| Error::InvalidAddress(format!("{} in '{}'", why, text));

        let body = text.strip_prefix('$').unwrap_or(text);
        let split = body
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(body.len());
        let (letters, digits) = body.split_at(split);
        if letters.is_empty() {
            return Err(invalid("missing column"));
        }
        let digits = digits.strip_prefix('$').unwrap_or(digits);
        if digits.is_empty() {
            return Err(invalid("missing row"));
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("bad row number"));
        }

        let col = Self::letters_to_column(letters)?;
        let number: u64 = digits.parse().map_err(|_| invalid("bad row number"))?;
        match number.checked_sub(1) {
            None => Err(invalid("row 0")),
            Some(row) if row >= u64::from(MAX_ROWS) => {
                Err(Error::RowOutOfBounds(row.min(u64::from(u32::MAX)) as u32, MAX_ROWS - 1))
            }
            Some(row) => Ok(Self::new(row as u32, col)),
        }
    }

    /// Bijective base-26 name of a column index
    pub fn column_to_letters(col: u16) -> String {
        let mut reversed = Vec::with_capacity(3);
        let mut rest = u32::from(col) + 1;
        while rest > 0 {
            let digit = (rest - 1) % 26;
            reversed.push(b'A' + digit as u8);
            rest = (rest - 1) / 26;
        }
        reversed.iter().rev().map(|&b| b as char).collect()
    }

    /// Column index for letters, case-insensitive
    pub fn letters_to_column(letters: &str) -> Result<u16> {
        if letters.is_empty() {
            return Err(Error::InvalidAddress("empty column letters".into()));
        }
        let number = letters.chars().try_fold(0u32, |acc, c| {
            if !c.is_ascii_alphabetic() {
                return Err(Error::InvalidAddress(format!("'{}' is not a column letter", c)));
            }
            let next = acc * 26 + u32::from(c.to_ascii_uppercase() as u8 - b'A') + 1;
            if next > u32::from(MAX_COLS) {
                Err(Error::ColumnOutOfBounds(next - 1, MAX_COLS - 1))
            } else {
                Ok(next)
            }
        })?;
        Ok((number - 1) as u16)
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Self::column_to_letters(self.col))?;
        write!(f, "{}", u64::from(self.row) + 1)
    }
}

/// Inclusive rectangle of cells; `start` is always the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRange {
    pub start: CellAddress,
    pub end: CellAddress,
}

impl CellRange {
    /// Build a range from any two opposite corners
    pub fn new(a: CellAddress, b: CellAddress) -> Self {
        Self {
            start: CellAddress::new(a.row.min(b.row), a.col.min(b.col)),
            end: CellAddress::new(a.row.max(b.row), a.col.max(b.col)),
        }
    }

    pub fn from_indices(first_row: u32, first_col: u16, last_row: u32, last_col: u16) -> Self {
        Self::new(
            CellAddress::new(first_row, first_col),
            CellAddress::new(last_row, last_col),
        )
    }

    pub fn single(cell: CellAddress) -> Self {
        Self::new(cell, cell)
    }

    /// Read `A1:C9`, or a lone `B4` as a one-cell range
    pub fn parse(reference: &str) -> Result<Self> {
        let text = reference.trim();
        if text.is_empty() {
            return Err(Error::InvalidRange("empty range".into()));
        }
        match text.split_once(':') {
            Some((from, to)) => Ok(Self::new(CellAddress::parse(from)?, CellAddress::parse(to)?)),
            None => CellAddress::parse(text).map(Self::single),
        }
    }

    /// Bounding box of both ranges
    pub fn union(&self, other: &CellRange) -> CellRange {
        Self::new(
            CellAddress::new(
                self.start.row.min(other.start.row),
                self.start.col.min(other.start.col),
            ),
            CellAddress::new(
                self.end.row.max(other.end.row),
                self.end.col.max(other.end.col),
            ),
        )
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}:{}", self.start, self.end)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_names_both_ways() {
        for (index, name) in [(0, "A"), (25, "Z"), (26, "AA"), (51, "AZ"), (701, "ZZ"), (702, "AAA"), (16383, "XFD")] {
            assert_eq!(CellAddress::column_to_letters(index), name);
            assert_eq!(CellAddress::letters_to_column(name).unwrap(), index);
        }
        assert_eq!(CellAddress::letters_to_column("xfd").unwrap(), 16383);
    }

    #[test]
    fn test_column_letters_rejected() {
        assert!(matches!(
            CellAddress::letters_to_column("XFE"),
            Err(Error::ColumnOutOfBounds(16384, 16383))
        ));
        assert!(CellAddress::letters_to_column("").is_err());
        assert!(CellAddress::letters_to_column("A1").is_err());
    }

    #[test]
    fn test_parse_references() {
        assert_eq!(CellAddress::parse("A1").unwrap(), CellAddress::new(0, 0));
        assert_eq!(CellAddress::parse(" c10 ").unwrap(), CellAddress::new(9, 2));
        assert_eq!(CellAddress::parse("$D5").unwrap(), CellAddress::new(4, 3));
        assert_eq!(CellAddress::parse("D$5").unwrap(), CellAddress::new(4, 3));
        assert_eq!(
            CellAddress::parse("XFD1048576").unwrap().to_string(),
            "XFD1048576"
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", "$", "7", "Q", "B0", "B-1", "B1x", "B1048577", "XFE1", "B99999999999"] {
            assert!(CellAddress::parse(bad).is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn test_range_text() {
        let range = CellRange::parse("A2:C9").unwrap();
        assert_eq!((range.start, range.end), (CellAddress::new(1, 0), CellAddress::new(8, 2)));
        assert_eq!(range.to_string(), "A2:C9");

        assert_eq!(CellRange::parse("E5").unwrap().to_string(), "E5");
        assert_eq!(CellRange::parse("C9:A2").unwrap(), range);
        assert!(CellRange::parse(" ").is_err());
        assert!(CellRange::parse("A1:").is_err());
    }

    #[test]
    fn test_union_grows_to_cover_both() {
        let header = CellRange::parse("A1:D1").unwrap();
        let far = CellRange::single(CellAddress::new(11, 1));
        assert_eq!(header.union(&far).to_string(), "A1:D12");
        assert_eq!(far.union(&header), header.union(&far));
    }
}
