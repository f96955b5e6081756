use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use rust_xlsxwriter::Workbook;

use workbook_cleanse::types::{CellValue, Table};
use workbook_cleanse::workbook::{read_sheet, read_workbook, sheet_names, write_workbook};
use workbook_cleanse::CleanseError;

fn tmp_file(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("workbook-cleanse-{name}-{nanos}.xlsx"))
}

fn write_registry_xlsx(path: &PathBuf) {
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    ws.set_name("Registry").unwrap();

    ws.write_string(0, 0, "Asset Code").unwrap();
    ws.write_string(0, 1, "Site").unwrap();
    ws.write_string(0, 2, "Audited").unwrap();

    ws.write_string(1, 0, "5589001").unwrap();
    ws.write_string(1, 1, "North Plant").unwrap();
    ws.write_boolean(1, 2, true).unwrap();

    ws.write_number(2, 0, 5589002.0).unwrap();
    ws.write_string(2, 1, "South Plant").unwrap();
    // Audited left blank.

    let ws2 = wb.add_worksheet();
    ws2.set_name("Second").unwrap();
    ws2.write_string(0, 0, "Asset Code").unwrap();
    ws2.write_string(1, 0, "5589003").unwrap();

    wb.save(path).unwrap();
}

#[test]
fn read_sheet_defaults_to_first_sheet() {
    let path = tmp_file("read-first");
    write_registry_xlsx(&path);

    let table = read_sheet(&path, None).unwrap();
    assert_eq!(table.columns, vec!["Asset Code", "Site", "Audited"]);
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.rows[0][0], CellValue::text("5589001"));
    assert_eq!(table.rows[0][2], CellValue::Boolean(true));
    assert_eq!(table.rows[1][0], CellValue::Number(5589002.0));
    assert_eq!(table.rows[1][2], CellValue::Empty);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn read_sheet_picks_named_sheet() {
    let path = tmp_file("read-named");
    write_registry_xlsx(&path);

    let table = read_sheet(&path, Some("Second")).unwrap();
    assert_eq!(table.columns, vec!["Asset Code"]);
    assert_eq!(table.row_count(), 1);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn read_sheet_errors_on_unknown_sheet() {
    let path = tmp_file("read-unknown");
    write_registry_xlsx(&path);

    let err = read_sheet(&path, Some("Nope")).unwrap_err();
    assert!(matches!(err, CleanseError::SheetNotFound { .. }));
    assert!(err.to_string().contains("'Nope'"));
    assert!(err.to_string().contains("Registry"));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn read_sheet_finds_offset_header() {
    let path = tmp_file("offset-header");
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    ws.set_name("Data").unwrap();
    // Header starts at row 2; rows 0-1 are never written.
    ws.write_string(2, 0, "Code").unwrap();
    ws.write_string(2, 1, "Site").unwrap();
    ws.write_string(3, 0, "5589001").unwrap();
    ws.write_string(3, 1, "North Plant").unwrap();
    wb.save(&path).unwrap();

    let table = read_sheet(&path, None).unwrap();
    assert_eq!(table.columns, vec!["Code", "Site"]);
    assert_eq!(table.row_count(), 1);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn read_sheet_keeps_interior_blank_rows() {
    let path = tmp_file("blank-row");
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    ws.set_name("Data").unwrap();
    ws.write_string(0, 0, "Code").unwrap();
    ws.write_string(1, 0, "5589001").unwrap();
    // Row 2 left blank on purpose.
    ws.write_string(3, 0, "5589002").unwrap();
    wb.save(&path).unwrap();

    let table = read_sheet(&path, None).unwrap();
    assert_eq!(table.row_count(), 3);
    assert_eq!(table.rows[1][0], CellValue::Empty);
    assert_eq!(table.rows[2][0], CellValue::text("5589002"));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn read_sheet_trims_header_names() {
    let path = tmp_file("padded-header");
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    ws.set_name("Data").unwrap();
    ws.write_string(0, 0, "  Code ").unwrap();
    ws.write_string(1, 0, "5589001").unwrap();
    wb.save(&path).unwrap();

    let table = read_sheet(&path, None).unwrap();
    assert_eq!(table.columns, vec!["Code"]);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn read_sheet_errors_on_duplicate_header() {
    let path = tmp_file("dup-header");
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    ws.set_name("Data").unwrap();
    ws.write_string(0, 0, "Code").unwrap();
    ws.write_string(0, 1, "Code").unwrap();
    wb.save(&path).unwrap();

    let err = read_sheet(&path, None).unwrap_err();
    assert!(matches!(err, CleanseError::DuplicateColumn { .. }));
    assert!(err.to_string().contains("duplicate column 'Code'"));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn read_sheet_errors_when_sheet_is_blank() {
    let path = tmp_file("blank-sheet");
    let mut wb = Workbook::new();
    wb.add_worksheet().set_name("Empty").unwrap();
    wb.save(&path).unwrap();

    let err = read_sheet(&path, None).unwrap_err();
    assert!(matches!(err, CleanseError::EmptySheet { .. }));
    assert!(err.to_string().contains("no non-empty rows"));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn sheet_names_lists_workbook_order() {
    let path = tmp_file("names");
    write_registry_xlsx(&path);

    assert_eq!(sheet_names(&path).unwrap(), vec!["Registry", "Second"]);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn read_workbook_reads_all_sheets_in_order() {
    let path = tmp_file("all-sheets");
    write_registry_xlsx(&path);

    let tables = read_workbook(&path, None).unwrap();
    assert_eq!(tables.len(), 2);
    assert_eq!(tables[0].0, "Registry");
    assert_eq!(tables[1].0, "Second");
    assert_eq!(tables[1].1.row_count(), 1);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn read_workbook_selected_sheets_only() {
    let path = tmp_file("selected-sheets");
    write_registry_xlsx(&path);

    let tables = read_workbook(&path, Some(&["Second"])).unwrap();
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].0, "Second");

    let err = read_workbook(&path, Some(&["Second", "Nope"])).unwrap_err();
    assert!(matches!(err, CleanseError::SheetNotFound { .. }));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn write_then_read_preserves_tables() {
    let path = tmp_file("roundtrip");

    let inventory = Table::new(
        vec!["name".to_string(), "qty".to_string(), "active".to_string()],
        vec![
            vec![
                CellValue::text("A"),
                CellValue::Number(5.0),
                CellValue::Boolean(true),
            ],
            vec![
                CellValue::text("B"),
                CellValue::Empty,
                CellValue::Boolean(false),
            ],
        ],
    );
    let header_only = Table::empty(vec!["x".to_string(), "y".to_string()]);

    write_workbook(&path, &[("Inventory", &inventory), ("Blank", &header_only)]).unwrap();

    let tables = read_workbook(&path, None).unwrap();
    assert_eq!(tables.len(), 2);
    assert_eq!(tables[0].0, "Inventory");
    assert_eq!(tables[0].1, inventory);
    assert_eq!(tables[1].0, "Blank");
    assert_eq!(tables[1].1, header_only);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn write_workbook_rejects_overlong_sheet_name() {
    let path = tmp_file("overlong-name");
    let table = Table::new(vec!["Code".to_string()], vec![vec![CellValue::text("5589001")]]);

    // 32 characters; the format caps sheet names at 31.
    let name = "X".repeat(32);
    let err = write_workbook(&path, &[(name.as_str(), &table)]).unwrap_err();
    assert!(matches!(err, CleanseError::Write(_)));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn write_workbook_rejects_duplicate_sheet_names() {
    let path = tmp_file("dup-sheet-name");
    let table = Table::new(vec!["Code".to_string()], vec![vec![CellValue::text("5589001")]]);

    let err = write_workbook(&path, &[("Data", &table), ("Data", &table)]).unwrap_err();
    assert!(matches!(err, CleanseError::Write(_)));

    let _ = std::fs::remove_file(&path);
}
