use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::error::{CleanseError, CleanseResult};
use crate::types::{CellValue, Table};

/// List the sheet names of a workbook in workbook order.
pub fn sheet_names(path: impl AsRef<Path>) -> CleanseResult<Vec<String>> {
    let workbook = open_workbook_auto(path)?;
    Ok(workbook.sheet_names().to_vec())
}

/// Read one sheet of a workbook (`.xlsx`, `.xls`, `.ods`, etc.) into a [`Table`].
///
/// Behavior:
/// - Picks `sheet` if provided; otherwise uses the first sheet in the workbook
/// - Detects the first non-empty row as the header row; its cells become the
///   column names (trimmed, trailing empty header cells dropped)
/// - Reads the remaining rows, padded or truncated to the header width
pub fn read_sheet(path: impl AsRef<Path>, sheet: Option<&str>) -> CleanseResult<Table> {
    let mut workbook = open_workbook_auto(path)?;
    let available = workbook.sheet_names().to_vec();

    let sheet = match sheet {
        Some(name) => {
            if !available.iter().any(|s| s == name) {
                return Err(CleanseError::SheetNotFound {
                    sheet: name.to_string(),
                    available,
                });
            }
            name.to_string()
        }
        None => available.first().ok_or(CleanseError::EmptyWorkbook)?.clone(),
    };

    let range = workbook.worksheet_range(&sheet)?;
    read_sheet_range(&sheet, &range)
}

/// Read multiple sheets of a workbook into `(sheet name, Table)` pairs.
///
/// - If `sheets` is `None`, reads **all sheets** in workbook order.
/// - If `sheets` is `Some(&[...])`, reads only those sheets (in the provided
///   order), failing fast if any of them is absent.
///
/// Sheets are read independently; their headers do not have to agree.
pub fn read_workbook(
    path: impl AsRef<Path>,
    sheets: Option<&[&str]>,
) -> CleanseResult<Vec<(String, Table)>> {
    let mut workbook = open_workbook_auto(path)?;
    let available = workbook.sheet_names().to_vec();

    let selected: Vec<String> = match sheets {
        Some(names) => {
            for name in names {
                if !available.iter().any(|s| s == name) {
                    return Err(CleanseError::SheetNotFound {
                        sheet: name.to_string(),
                        available,
                    });
                }
            }
            names.iter().map(|s| s.to_string()).collect()
        }
        None => available,
    };
    if selected.is_empty() {
        return Err(CleanseError::EmptyWorkbook);
    }

    let mut tables: Vec<(String, Table)> = Vec::with_capacity(selected.len());
    for sheet in selected {
        let range = workbook.worksheet_range(&sheet)?;
        let table = read_sheet_range(&sheet, &range)?;
        tables.push((sheet, table));
    }
    Ok(tables)
}

fn read_sheet_range(sheet: &str, range: &calamine::Range<Data>) -> CleanseResult<Table> {
    let (header_row_idx, columns) = detect_header(sheet, range)?;
    let width = columns.len();

    let mut rows: Vec<Vec<CellValue>> = Vec::new();
    for (idx0, row) in range.rows().enumerate() {
        if idx0 <= header_row_idx {
            continue;
        }

        let mut out_row: Vec<CellValue> = Vec::with_capacity(width);
        for col_idx in 0..width {
            let cell = row.get(col_idx).unwrap_or(&Data::Empty);
            out_row.push(cell_to_value(cell));
        }
        rows.push(out_row);
    }

    Ok(Table::new(columns, rows))
}

/// Find the first non-empty row and turn it into the column list.
///
/// Trailing empty header cells are dropped so that a sheet whose used range
/// is wider than its header does not grow nameless columns. Interior empty
/// header cells are kept as `""` and exempt from the duplicate check.
fn detect_header(sheet: &str, range: &calamine::Range<Data>) -> CleanseResult<(usize, Vec<String>)> {
    let mut header: Option<(usize, Vec<String>)> = None;

    for (idx0, row) in range.rows().enumerate() {
        let non_empty = row.iter().any(|c| !matches!(c, Data::Empty));
        if non_empty {
            let mut cells: Vec<String> =
                row.iter().map(|c| header_text(c).trim().to_string()).collect();
            while cells.last().is_some_and(String::is_empty) {
                cells.pop();
            }
            header = Some((idx0, cells));
            break;
        }
    }

    let (header_row_idx, columns) = header.ok_or_else(|| CleanseError::EmptySheet {
        sheet: sheet.to_string(),
    })?;

    for (idx, name) in columns.iter().enumerate() {
        if !name.is_empty() && columns[..idx].contains(name) {
            return Err(CleanseError::DuplicateColumn {
                sheet: sheet.to_string(),
                column: name.clone(),
            });
        }
    }

    Ok((header_row_idx, columns))
}

fn header_text(c: &Data) -> String {
    match c {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("{e:?}"),
        Data::Empty => "".to_string(),
    }
}

/// Convert one cell into a [`CellValue`] without losing data.
///
/// Numbers stay numbers (spreadsheet stores datetimes as serial numbers, so
/// those come through as numbers too), ISO datetime strings stay text, and
/// cell-level errors read as empty.
fn cell_to_value(c: &Data) -> CellValue {
    match c {
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Boolean(*b),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) => CellValue::Text(s.clone()),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(_) => CellValue::Empty,
        Data::Empty => CellValue::Empty,
    }
}
