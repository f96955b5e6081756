//! Row filtering for [`crate::types::Table`].
//!
//! [`filter`] keeps the rows whose cell in one named column satisfies a
//! [`Predicate`], preserving header and row order. Ad-hoc predicates over
//! whole rows go through [`Table::filter_rows`] instead.

use crate::error::{CleanseError, CleanseResult};
use crate::types::{CellValue, Table};

/// Which rows to keep: a target column plus the predicate applied to that
/// column's cell in each row.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    /// Column the predicate is evaluated against.
    pub column: String,
    /// Boolean test applied to one cell value.
    pub predicate: Predicate,
}

impl FilterSpec {
    /// Create a new filter spec.
    pub fn new(column: impl Into<String>, predicate: Predicate) -> Self {
        Self {
            column: column.into(),
            predicate,
        }
    }
}

/// A boolean test applied to one cell value.
///
/// Evaluation is total and never coerces between variants: a numeric
/// comparison against a text cell is simply `false`, so heterogeneous
/// columns cannot make filtering fail. A blank cell (`CellValue::Empty`)
/// matches only `IsEmpty` and `Equals(CellValue::Empty)`; whitespace-only
/// text also counts as empty-like (see [`CellValue::is_empty_like`]).
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Structural equality with one value (no trimming, no coercion).
    Equals(CellValue),
    /// Structural equality with any of the listed values.
    OneOf(Vec<CellValue>),
    /// Substring match on text cells; `false` for any other variant.
    Contains(String),
    /// The cell holds data (not empty-like).
    NonEmpty,
    /// The cell is empty-like.
    IsEmpty,
    /// `cell > threshold` for number cells; `false` otherwise.
    GreaterThan(f64),
    /// `cell >= threshold` for number cells; `false` otherwise.
    AtLeast(f64),
    /// `cell < threshold` for number cells; `false` otherwise.
    LessThan(f64),
    /// `cell <= threshold` for number cells; `false` otherwise.
    AtMost(f64),
}

impl Predicate {
    /// Evaluate the predicate against one cell.
    pub fn matches(&self, cell: &CellValue) -> bool {
        match self {
            Predicate::Equals(expected) => cell == expected,
            Predicate::OneOf(values) => values.iter().any(|v| cell == v),
            Predicate::Contains(needle) => match cell {
                CellValue::Text(s) => s.contains(needle.as_str()),
                _ => false,
            },
            Predicate::NonEmpty => !cell.is_empty_like(),
            Predicate::IsEmpty => cell.is_empty_like(),
            Predicate::GreaterThan(t) => cell.as_number().is_some_and(|n| n > *t),
            Predicate::AtLeast(t) => cell.as_number().is_some_and(|n| n >= *t),
            Predicate::LessThan(t) => cell.as_number().is_some_and(|n| n < *t),
            Predicate::AtMost(t) => cell.as_number().is_some_and(|n| n <= *t),
        }
    }
}

/// Returns a new [`Table`] holding only the rows whose cell in `spec.column`
/// satisfies `spec.predicate`, in original order.
///
/// - Returns [`CleanseError::ColumnNotFound`] if the column is not part of
///   the table's header.
/// - An empty input table yields an empty output table, not an error.
/// - Rows shorter than the header (possible only for hand-built tables) are
///   treated as holding `Empty` in the missing cells.
pub fn filter(table: &Table, spec: &FilterSpec) -> CleanseResult<Table> {
    let idx = table
        .column_index(&spec.column)
        .ok_or_else(|| CleanseError::ColumnNotFound {
            column: spec.column.clone(),
        })?;

    Ok(table.filter_rows(|row| {
        spec.predicate
            .matches(row.get(idx).unwrap_or(&CellValue::Empty))
    }))
}
