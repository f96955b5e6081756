//! Code comparison reports for [`crate::types::Table`].
//!
//! After a registry has been cleaned, its surviving codes form a reference
//! set. This module extracts that set from one or more tables and checks an
//! original table against it, producing one report row per extracted code.

use std::collections::HashSet;

use crate::error::{CleanseError, CleanseResult};
use crate::types::{CellValue, Table};

/// Report column names, in output order.
pub const REPORT_COLUMNS: [&str; 4] = [
    "Original Entry",
    "Extracted Code",
    "Cleaned Code",
    "Match Status",
];

/// Match verdict for one extracted code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStatus {
    /// The canonical code is in the reference set.
    Found,
    /// No canonical code, or it is absent from the reference set.
    Missing,
}

impl MatchStatus {
    /// Text form used in report cells.
    pub fn as_str(self) -> &'static str {
        match self {
            MatchStatus::Found => "Found",
            MatchStatus::Missing => "Missing",
        }
    }
}

/// Canonical numeric form of one code cell.
///
/// Text keeps its ASCII digits (prefixes and punctuation dropped) and parses
/// them as an integer; whole numbers are taken directly, without a text
/// round-trip that would glue formatting artifacts onto the digits. Returns
/// `None` when the cell has no digits or they overflow `i64`.
pub fn code_digits(cell: &CellValue) -> Option<i64> {
    match cell {
        CellValue::Text(s) => digits_to_i64(s),
        CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 9.0e15 => Some(*n as i64),
        _ => None,
    }
}

fn digits_to_i64(s: &str) -> Option<i64> {
    let digits: String = s.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<i64>().ok()
}

/// Union of canonical codes over every table that has `column`.
///
/// Tables lacking the column are skipped rather than rejected, so a whole
/// workbook (including unrelated summary sheets) can be fed in directly.
/// Cells without a canonical code contribute nothing.
pub fn collect_codes(tables: &[(String, Table)], column: &str) -> HashSet<i64> {
    let mut codes = HashSet::new();
    for (_, table) in tables {
        let Some(idx) = table.column_index(column) else {
            continue;
        };
        for row in &table.rows {
            if let Some(code) = code_digits(row.get(idx).unwrap_or(&CellValue::Empty)) {
                codes.insert(code);
            }
        }
    }
    codes
}

/// Check every code token of `column` against a reference set.
///
/// Each token of each cell yields one report row holding the original cell
/// text, the raw token, its canonical numeric form (an empty cell when it
/// has none), and a [`MatchStatus`] verdict. Empty-like cells yield no rows.
/// `Number` cells are canonicalized whole through [`code_digits`], the same
/// rule [`collect_codes`] applies, so a fractional number reports an empty
/// cleaned code rather than digits spliced across the decimal point.
/// The report carries the [`REPORT_COLUMNS`] header.
pub fn compare(table: &Table, column: &str, codes: &HashSet<i64>) -> CleanseResult<Table> {
    let idx = table
        .column_index(column)
        .ok_or_else(|| CleanseError::ColumnNotFound {
            column: column.to_string(),
        })?;

    let mut rows: Vec<Vec<CellValue>> = Vec::new();
    for row in &table.rows {
        let cell = row.get(idx).unwrap_or(&CellValue::Empty);
        if cell.is_empty_like() {
            continue;
        }
        let raw = cell.to_string();
        match cell {
            CellValue::Number(_) => rows.push(report_row(&raw, &raw, code_digits(cell), codes)),
            _ => {
                for token in split_code_tokens(&raw) {
                    rows.push(report_row(&raw, token, digits_to_i64(token), codes));
                }
            }
        }
    }

    Ok(Table::new(
        REPORT_COLUMNS.iter().map(|c| c.to_string()).collect(),
        rows,
    ))
}

fn report_row(
    raw: &str,
    token: &str,
    cleaned: Option<i64>,
    codes: &HashSet<i64>,
) -> Vec<CellValue> {
    let status = match cleaned {
        Some(code) if codes.contains(&code) => MatchStatus::Found,
        _ => MatchStatus::Missing,
    };
    vec![
        CellValue::text(raw),
        CellValue::text(token),
        cleaned.map(|c| CellValue::Number(c as f64)).unwrap_or(CellValue::Empty),
        CellValue::text(status.as_str()),
    ]
}

/// Tokens packed into one entry may be separated by whitespace, commas,
/// slashes, backslashes, or stars.
fn split_code_tokens(s: &str) -> impl Iterator<Item = &str> {
    s.split(|c: char| matches!(c, ',' | '/' | '\\' | '*') || c.is_whitespace())
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{code_digits, collect_codes, compare, MatchStatus, REPORT_COLUMNS};
    use crate::error::CleanseError;
    use crate::types::{CellValue, Table};

    fn codes_table(name: &str, values: &[CellValue]) -> (String, Table) {
        (
            name.to_string(),
            Table::new(
                vec!["code".to_string()],
                values.iter().map(|v| vec![v.clone()]).collect(),
            ),
        )
    }

    #[test]
    fn code_digits_normalizes_text_and_numbers() {
        assert_eq!(code_digits(&CellValue::text("AB-1234x")), Some(1234));
        assert_eq!(code_digits(&CellValue::text("007")), Some(7));
        assert_eq!(code_digits(&CellValue::text("no digits")), None);
        assert_eq!(code_digits(&CellValue::Number(5589338.0)), Some(5589338));
        assert_eq!(code_digits(&CellValue::Number(7.5)), None);
        assert_eq!(code_digits(&CellValue::Boolean(true)), None);
        assert_eq!(code_digits(&CellValue::Empty), None);
    }

    #[test]
    fn collect_codes_unions_tables_and_skips_missing_columns() {
        let with_codes = codes_table(
            "Correct Data",
            &[
                CellValue::text("1001"),
                CellValue::Number(1002.0),
                CellValue::text("x-1001"),
                CellValue::Empty,
            ],
        );
        let more_codes = codes_table("Result of Split", &[CellValue::text("1003")]);
        let unrelated = (
            "Summary".to_string(),
            Table::new(vec!["note".to_string()], vec![vec![CellValue::text("hi")]]),
        );

        let codes = collect_codes(&[with_codes, more_codes, unrelated], "code");
        assert_eq!(codes, HashSet::from([1001, 1002, 1003]));
    }

    #[test]
    fn compare_emits_one_row_per_token() {
        let table = Table::new(
            vec!["code".to_string(), "site".to_string()],
            vec![
                vec![CellValue::text("1001/1002"), CellValue::text("North")],
                vec![CellValue::text("scrap"), CellValue::text("South")],
                vec![CellValue::Empty, CellValue::text("South")],
                vec![CellValue::Number(1003.0), CellValue::text("North")],
            ],
        );
        let codes = HashSet::from([1001, 1003]);

        let report = compare(&table, "code", &codes).unwrap();
        assert_eq!(report.columns, REPORT_COLUMNS.map(String::from).to_vec());
        assert_eq!(
            report.rows,
            vec![
                vec![
                    CellValue::text("1001/1002"),
                    CellValue::text("1001"),
                    CellValue::Number(1001.0),
                    CellValue::text(MatchStatus::Found.as_str()),
                ],
                vec![
                    CellValue::text("1001/1002"),
                    CellValue::text("1002"),
                    CellValue::Number(1002.0),
                    CellValue::text(MatchStatus::Missing.as_str()),
                ],
                vec![
                    CellValue::text("scrap"),
                    CellValue::text("scrap"),
                    CellValue::Empty,
                    CellValue::text(MatchStatus::Missing.as_str()),
                ],
                vec![
                    CellValue::text("1003"),
                    CellValue::text("1003"),
                    CellValue::Number(1003.0),
                    CellValue::text(MatchStatus::Found.as_str()),
                ],
            ]
        );
    }

    #[test]
    fn fractional_numbers_report_no_cleaned_code() {
        let table = Table::new(vec!["code".to_string()], vec![vec![CellValue::Number(7.5)]]);

        // 75 is in the reference set, but 7.5 must not canonicalize to it.
        let report = compare(&table, "code", &HashSet::from([75])).unwrap();
        assert_eq!(
            report.rows,
            vec![vec![
                CellValue::text("7.5"),
                CellValue::text("7.5"),
                CellValue::Empty,
                CellValue::text(MatchStatus::Missing.as_str()),
            ]]
        );
    }

    #[test]
    fn compare_requires_the_code_column() {
        let table = Table::new(vec!["other".to_string()], vec![]);
        let err = compare(&table, "code", &HashSet::new()).unwrap_err();
        assert!(matches!(err, CleanseError::ColumnNotFound { .. }));
    }
}
