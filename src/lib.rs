//! `workbook-cleanse` is a small library for cleaning up code registries kept
//! as spreadsheet workbooks: equipment lists, asset indexes, and similar
//! sheets where one column should hold exactly one numeric code per row but
//! years of hand editing have left it holding placeholders, notes, and
//! comma-separated bundles of codes.
//!
//! The primary entrypoints are [`pipeline::cleanse_to_path`] (clean one sheet
//! into a multi-sheet output workbook) and [`pipeline::compare_to_path`]
//! (audit raw entries against an already-cleaned workbook). Everything they
//! do is also available piecewise on in-memory [`types::Table`]s.
//!
//! ## What a cleanse run does
//!
//! 1. Reads one sheet into a [`types::Table`] of [`types::CellValue`]s
//!    (text, number, boolean, or empty; the header row names the columns)
//! 2. Partitions rows by whether their code cell is usable as-is
//!    ([`processing::is_invalid_code`])
//! 3. Normalizes valid code cells down to their digits
//!    ([`processing::cleanse_column`])
//! 4. Explodes each invalid row into one row per embedded code token
//!    ([`processing::explode_column`])
//! 5. Merges the cleansed and exploded rows back together
//! 6. Keeps merged rows matching a configured column filter
//!    ([`processing::filter`])
//!
//! All five result tables are saved as separate sheets of the output
//! workbook, so a reviewer can audit every step.
//!
//! ## Quick example: filter an in-memory table
//!
//! ```rust
//! use workbook_cleanse::processing::{filter, FilterSpec, Predicate};
//! use workbook_cleanse::types::{CellValue, Table};
//!
//! let table = Table::new(
//!     vec!["name".to_string(), "qty".to_string()],
//!     vec![
//!         vec![CellValue::text("A"), CellValue::Number(5.0)],
//!         vec![CellValue::text("B"), CellValue::Number(0.0)],
//!         vec![CellValue::text("C"), CellValue::Number(3.0)],
//!     ],
//! );
//!
//! let in_stock = filter(&table, &FilterSpec::new("qty", Predicate::GreaterThan(0.0))).unwrap();
//! assert_eq!(in_stock.row_count(), 2);
//! assert_eq!(in_stock.rows[0][0], CellValue::text("A"));
//! assert_eq!(in_stock.rows[1][0], CellValue::text("C"));
//! ```
//!
//! ## Quick example: cleanse a workbook
//!
//! ```no_run
//! use workbook_cleanse::config::CleanseConfig;
//! use workbook_cleanse::pipeline::{cleanse_to_path, PipelineOptions};
//!
//! # fn main() -> Result<(), workbook_cleanse::CleanseError> {
//! let mut config = CleanseConfig::new("Asset Code", "Site");
//! config.invalid_markers = vec!["not found".to_string()];
//! config.keep_values = vec!["North Plant".to_string()];
//!
//! let outcome = cleanse_to_path(
//!     "registry.xlsx",
//!     "cleansed.xlsx",
//!     &config,
//!     &PipelineOptions::default(),
//! )?;
//! println!(
//!     "{} valid, {} invalid, kept {}",
//!     outcome.valid.row_count(),
//!     outcome.invalid.row_count(),
//!     outcome.filtered.row_count(),
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`pipeline`]: cleanse/compare entrypoints, observers for logging and alerts
//! - [`processing`]: in-memory table transformations (filter/cleanse/compare)
//! - [`workbook`]: reading sheets into tables and writing tables to `.xlsx`
//! - [`types`]: the [`types::Table`] and [`types::CellValue`] model
//! - [`config`]: cleanse/compare settings, loadable from JSON
//! - [`error`]: the error type shared across the crate

pub mod config;
pub mod error;
pub mod pipeline;
pub mod processing;
pub mod types;
pub mod workbook;

pub use error::{CleanseError, CleanseResult};
