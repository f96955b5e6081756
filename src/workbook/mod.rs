//! Workbook I/O: reading sheets into [`Table`](crate::types::Table)s and
//! writing tables back out as `.xlsx` sheets.
//!
//! Reading goes through `calamine` and accepts whatever it can open
//! (`.xlsx`, `.xls`, `.ods`, ...); writing goes through `rust_xlsxwriter`
//! and always produces `.xlsx`.

mod reader;
mod writer;

pub use reader::{read_sheet, read_workbook, sheet_names};
pub use writer::{write_table_to_path, write_workbook};
