//! Code-column cleansing for [`crate::types::Table`].
//!
//! Hand-maintained registries accumulate junk in their code column:
//! placeholder text, several codes packed into one cell, stray punctuation
//! inside a code. This module classifies rows by code validity, normalizes
//! codes down to their digits, and explodes multi-code cells into one row
//! per code. All operations are pure and order-preserving.

use crate::error::{CleanseError, CleanseResult};
use crate::types::{CellValue, Table};

/// Returns `true` when a code cell is not usable as-is.
///
/// A cell is invalid when it is empty-like, or when its text contains any of
/// the configured `markers` as a substring, holds a comma, or holds more than
/// one whitespace-separated token. `Number` and `Boolean` cells are always
/// valid.
pub fn is_invalid_code(cell: &CellValue, markers: &[String]) -> bool {
    if cell.is_empty_like() {
        return true;
    }
    match cell.as_text() {
        Some(s) => {
            markers.iter().any(|m| s.contains(m.as_str()))
                || s.contains(',')
                || s.split_whitespace().count() > 1
        }
        None => false,
    }
}

/// Normalize one code cell: text keeps only its ASCII digits, every other
/// variant passes through unchanged.
///
/// Text without any digit collapses to empty text, which later stages treat
/// as missing data.
pub fn cleanse_code(cell: &CellValue) -> CellValue {
    match cell.as_text() {
        Some(s) => CellValue::Text(s.chars().filter(char::is_ascii_digit).collect()),
        None => cell.clone(),
    }
}

/// Split a table into `(valid, invalid)` on the validity of `column`'s cells.
///
/// Both outputs keep the input header and the relative order of their rows.
pub fn partition_by_validity(
    table: &Table,
    column: &str,
    markers: &[String],
) -> CleanseResult<(Table, Table)> {
    let idx = column_index_or_err(table, column)?;

    let valid = table.filter_rows(|row| {
        !is_invalid_code(row.get(idx).unwrap_or(&CellValue::Empty), markers)
    });
    let invalid = table.filter_rows(|row| {
        is_invalid_code(row.get(idx).unwrap_or(&CellValue::Empty), markers)
    });
    Ok((valid, invalid))
}

/// Normalize every code in `column` down to its digits (see [`cleanse_code`]).
pub fn cleanse_column(table: &Table, column: &str) -> CleanseResult<Table> {
    let idx = column_index_or_err(table, column)?;
    Ok(table.map_column(idx, cleanse_code))
}

/// One output row per code: a text cell holding several tokens becomes
/// several rows, each carrying one token in `column` and copies of every
/// other cell.
///
/// Tokens are separated by commas and/or whitespace and are kept raw (no
/// digit normalization). Empty-like cells produce no rows; `Number` and
/// `Boolean` cells pass through as single rows.
pub fn explode_column(table: &Table, column: &str) -> CleanseResult<Table> {
    let idx = column_index_or_err(table, column)?;

    let mut rows: Vec<Vec<CellValue>> = Vec::new();
    for row in &table.rows {
        match row.get(idx).unwrap_or(&CellValue::Empty) {
            CellValue::Text(s) => {
                for token in tokenize(s) {
                    let mut out = row.clone();
                    out[idx] = CellValue::text(token);
                    rows.push(out);
                }
            }
            CellValue::Empty => {}
            _ => rows.push(row.clone()),
        }
    }
    Ok(Table::new(table.columns.clone(), rows))
}

fn column_index_or_err(table: &Table, column: &str) -> CleanseResult<usize> {
    table
        .column_index(column)
        .ok_or_else(|| CleanseError::ColumnNotFound {
            column: column.to_string(),
        })
}

/// Tokens of a multi-code cell: split on commas and whitespace, dropping
/// empty pieces.
fn tokenize(s: &str) -> impl Iterator<Item = &str> {
    s.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
}
