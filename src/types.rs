//! Core data model types.
//!
//! This crate reads workbook sheets into an in-memory [`Table`]: an ordered
//! header of unique column names plus row-major [`CellValue`] storage. The
//! header is discovered from the sheet itself rather than declared up front,
//! so cells stay dynamically typed.

use std::fmt;

use crate::error::{CleanseError, CleanseResult};

/// A single cell value in a [`Table`].
///
/// Workbook cells are loosely typed, so values are a tagged variant with no
/// implicit coercion between variants. Predicates and cleansing rules decide
/// per variant what to do.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Missing/blank cell.
    Empty,
    /// UTF-8 text.
    Text(String),
    /// 64-bit float (workbook numbers, including date serials).
    Number(f64),
    /// Boolean.
    Boolean(bool),
}

impl CellValue {
    /// Create a text cell.
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    /// Returns `true` for [`CellValue::Empty`] and for text that trims to
    /// nothing.
    ///
    /// This is the emptiness notion used by filtering and cleansing: a cell
    /// holding only whitespace counts as missing data.
    pub fn is_empty_like(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Borrow the text content, if this is a `Text` cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// The numeric content, if this is a `Number` cell.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    /// Renders the cell the way a workbook user would read it. Whole numbers
    /// drop the trailing `.0` so numeric codes keep their digit form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 9.0e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{n}")
                }
            }
            CellValue::Boolean(b) => write!(f, "{b}"),
        }
    }
}

/// In-memory tabular dataset.
///
/// The header fixes column order; every row is positionally aligned with it.
/// Column names are unique within a table (the reader enforces this at the
/// boundary). All operations are pure: they return new tables and leave the
/// input untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Ordered, unique column names.
    pub columns: Vec<String>,
    /// Row-major cell storage; each row has `columns.len()` cells.
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Create a table from a header and rows.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self { columns, rows }
    }

    /// A table with the given header and no rows.
    pub fn empty(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Number of rows in the table.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns in the header.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the index of a column by name, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Create a new table containing only rows that match `predicate`.
    ///
    /// The returned table preserves the original header and the relative
    /// order of surviving rows.
    pub fn filter_rows<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&[CellValue]) -> bool,
    {
        let rows = self
            .rows
            .iter()
            .filter(|row| predicate(row.as_slice()))
            .cloned()
            .collect();
        Self {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Create a new table by applying `f` to every cell of one column.
    ///
    /// All other cells are copied unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not a valid column index.
    pub fn map_column<F>(&self, index: usize, mut f: F) -> Self
    where
        F: FnMut(&CellValue) -> CellValue,
    {
        assert!(
            index < self.columns.len(),
            "column index {} out of bounds for {} columns",
            index,
            self.columns.len()
        );
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut out = row.clone();
                if let Some(cell) = out.get_mut(index) {
                    *cell = f(cell);
                }
                out
            })
            .collect();
        Self {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Create a new table holding this table's rows followed by `other`'s.
    ///
    /// Both tables must share the same header, in the same order.
    pub fn concat(&self, other: &Table) -> CleanseResult<Table> {
        if self.columns != other.columns {
            return Err(CleanseError::ColumnMismatch {
                message: format!(
                    "cannot concat tables with different headers: {:?} vs {:?}",
                    self.columns, other.columns
                ),
            });
        }
        let mut rows = self.rows.clone();
        rows.extend(other.rows.iter().cloned());
        Ok(Table {
            columns: self.columns.clone(),
            rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{CellValue, Table};

    #[test]
    fn empty_like_covers_blank_text() {
        assert!(CellValue::Empty.is_empty_like());
        assert!(CellValue::text("").is_empty_like());
        assert!(CellValue::text("   ").is_empty_like());
        assert!(!CellValue::text("x").is_empty_like());
        assert!(!CellValue::Number(0.0).is_empty_like());
        assert!(!CellValue::Boolean(false).is_empty_like());
    }

    #[test]
    fn accessors_are_variant_strict() {
        assert_eq!(CellValue::text("7").as_text(), Some("7"));
        assert_eq!(CellValue::Number(7.0).as_text(), None);
        assert_eq!(CellValue::Number(7.0).as_number(), Some(7.0));
        assert_eq!(CellValue::text("7").as_number(), None);
        assert_eq!(CellValue::Boolean(true).as_number(), None);
    }

    #[test]
    fn display_drops_trailing_zero_for_whole_numbers() {
        assert_eq!(CellValue::Number(5589338.0).to_string(), "5589338");
        assert_eq!(CellValue::Number(1.5).to_string(), "1.5");
        assert_eq!(CellValue::text("ab").to_string(), "ab");
        assert_eq!(CellValue::Empty.to_string(), "");
    }

    #[test]
    fn concat_requires_matching_headers() {
        let a = Table::new(vec!["x".into()], vec![vec![CellValue::Number(1.0)]]);
        let b = Table::new(vec!["y".into()], vec![vec![CellValue::Number(2.0)]]);
        assert!(a.concat(&b).is_err());

        let c = Table::new(vec!["x".into()], vec![vec![CellValue::Number(2.0)]]);
        let merged = a.concat(&c).unwrap();
        assert_eq!(merged.row_count(), 2);
        assert_eq!(merged.rows[1][0], CellValue::Number(2.0));
        // Inputs unchanged
        assert_eq!(a.row_count(), 1);
    }
}
