use std::path::Path;

use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};

use crate::error::{CleanseError, CleanseResult};
use crate::types::{CellValue, Table};

/// Write tables to an `.xlsx` workbook, one sheet per table.
///
/// Each sheet gets the table's column names as row 0 and the data rows below
/// it. Empty cells are left unwritten. Sheet names follow spreadsheet rules
/// (unique, non-empty, at most 31 characters) and are rejected by the writer
/// otherwise.
pub fn write_workbook(path: impl AsRef<Path>, sheets: &[(&str, &Table)]) -> CleanseResult<()> {
    let mut workbook = Workbook::new();
    for (name, table) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*name)?;
        write_table(worksheet, table)?;
    }
    workbook.save(path.as_ref())?;
    Ok(())
}

/// Write a single table to an `.xlsx` workbook.
pub fn write_table_to_path(
    path: impl AsRef<Path>,
    sheet: &str,
    table: &Table,
) -> CleanseResult<()> {
    write_workbook(path, &[(sheet, table)])
}

fn write_table(worksheet: &mut Worksheet, table: &Table) -> CleanseResult<()> {
    for (col, name) in table.columns.iter().enumerate() {
        worksheet.write_string(0, col_index(col)?, name)?;
    }

    for (idx, row) in table.rows.iter().enumerate() {
        let row_num = row_index(idx + 1)?;
        for (col, cell) in row.iter().enumerate() {
            let col_num = col_index(col)?;
            match cell {
                CellValue::Text(s) => {
                    worksheet.write_string(row_num, col_num, s)?;
                }
                CellValue::Number(n) => {
                    worksheet.write_number(row_num, col_num, *n)?;
                }
                CellValue::Boolean(b) => {
                    worksheet.write_boolean(row_num, col_num, *b)?;
                }
                CellValue::Empty => {}
            }
        }
    }
    Ok(())
}

fn row_index(idx: usize) -> CleanseResult<u32> {
    u32::try_from(idx).map_err(|_| CleanseError::Write(XlsxError::RowColumnLimitError))
}

fn col_index(idx: usize) -> CleanseResult<u16> {
    u16::try_from(idx).map_err(|_| CleanseError::Write(XlsxError::RowColumnLimitError))
}
