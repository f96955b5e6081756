//! In-memory table transformations.
//!
//! The processing layer operates on [`crate::types::Table`] values produced
//! by the workbook reader. Everything here is pure, synchronous, and
//! order-preserving.
//!
//! - [`filter()`]: row filtering by a (column, predicate) spec
//! - [`cleanse`]: code-column validity classification, digit normalization,
//!   and multi-code explosion
//! - [`compare`]: match reports against a reference code set
//!
//! ## Example: partition → cleanse → explode → merge → filter
//!
//! ```rust
//! use workbook_cleanse::processing::cleanse::{
//!     cleanse_column, explode_column, partition_by_validity,
//! };
//! use workbook_cleanse::processing::{filter, FilterSpec, Predicate};
//! use workbook_cleanse::types::{CellValue, Table};
//!
//! let table = Table::new(
//!     vec!["code".to_string(), "site".to_string()],
//!     vec![
//!         vec![CellValue::text("A-1001"), CellValue::text("North")],
//!         vec![CellValue::text("2001, 2002"), CellValue::text("South")],
//!         vec![CellValue::Empty, CellValue::text("North")],
//!     ],
//! );
//!
//! // Rows whose code cell is unusable as-is go to a separate table.
//! let markers = vec!["none".to_string()];
//! let (valid, invalid) = partition_by_validity(&table, "code", &markers).unwrap();
//!
//! // Valid codes lose their punctuation; packed codes become one row each.
//! let valid = cleanse_column(&valid, "code").unwrap();
//! let merged = valid
//!     .concat(&explode_column(&invalid, "code").unwrap())
//!     .unwrap();
//!
//! let kept = filter(
//!     &merged,
//!     &FilterSpec::new("site", Predicate::OneOf(vec![CellValue::text("South")])),
//! )
//! .unwrap();
//! assert_eq!(kept.row_count(), 2);
//! ```

pub mod cleanse;
pub mod compare;
pub mod filter;

pub use cleanse::{
    cleanse_code, cleanse_column, explode_column, is_invalid_code, partition_by_validity,
};
pub use compare::{code_digits, collect_codes, compare, MatchStatus, REPORT_COLUMNS};
pub use filter::{filter, FilterSpec, Predicate};
