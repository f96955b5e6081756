//! Configuration for the cleanse and compare pipelines.
//!
//! Column names, invalid-code markers, and output sheet names travel as
//! explicit structs rather than ambient constants, so one build can serve
//! many registries. Both configs derive serde traits and can be loaded from
//! JSON files.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CleanseResult;

/// Settings for one cleanse run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanseConfig {
    /// Sheet to read; `None` picks the first sheet in the workbook.
    #[serde(default)]
    pub sheet: Option<String>,
    /// Column holding the codes to validate and normalize.
    pub code_column: String,
    /// Substrings that mark a code cell as unusable (placeholder text,
    /// header echoes, free-form notes).
    #[serde(default)]
    pub invalid_markers: Vec<String>,
    /// Column the final keep-filter is applied to.
    pub keep_column: String,
    /// Values of `keep_column` whose rows survive the final filter.
    #[serde(default)]
    pub keep_values: Vec<String>,
    /// Sheet names used for the output workbook.
    #[serde(default)]
    pub output_sheets: OutputSheets,
}

impl CleanseConfig {
    /// Create a config for the given columns, with defaults everywhere else.
    pub fn new(code_column: impl Into<String>, keep_column: impl Into<String>) -> Self {
        Self {
            sheet: None,
            code_column: code_column.into(),
            invalid_markers: Vec::new(),
            keep_column: keep_column.into(),
            keep_values: Vec::new(),
            output_sheets: OutputSheets::default(),
        }
    }

    /// Load a config from a JSON file.
    pub fn from_json_path(path: impl AsRef<Path>) -> CleanseResult<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

/// Sheet names of the cleanse output workbook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSheets {
    /// Rows whose code cell was valid (written with normalized codes).
    pub valid: String,
    /// Rows whose code cell was unusable as-is.
    pub invalid: String,
    /// Invalid rows exploded into one row per code token.
    pub exploded: String,
    /// Cleansed valid rows followed by the exploded rows.
    pub merged: String,
    /// Merged rows that passed the keep-filter.
    pub filtered: String,
}

impl Default for OutputSheets {
    fn default() -> Self {
        Self {
            valid: "Correct Data".to_string(),
            invalid: "Incorrect Data".to_string(),
            exploded: "Result of Split".to_string(),
            merged: "Merged Data".to_string(),
            filtered: "Filtered Data".to_string(),
        }
    }
}

/// Settings for one comparison run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareConfig {
    /// Sheet of the original workbook to read; `None` picks the first sheet.
    #[serde(default)]
    pub sheet: Option<String>,
    /// Column holding the codes on both sides of the comparison.
    pub code_column: String,
    /// Sheets of the cleaned workbook to collect reference codes from;
    /// `None` uses every sheet.
    #[serde(default)]
    pub sheets: Option<Vec<String>>,
    /// Sheet name for the report workbook.
    #[serde(default = "default_report_sheet")]
    pub report_sheet: String,
}

impl CompareConfig {
    /// Create a config for the given code column, with defaults elsewhere.
    pub fn new(code_column: impl Into<String>) -> Self {
        Self {
            sheet: None,
            code_column: code_column.into(),
            sheets: None,
            report_sheet: default_report_sheet(),
        }
    }

    /// Load a config from a JSON file.
    pub fn from_json_path(path: impl AsRef<Path>) -> CleanseResult<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

fn default_report_sheet() -> String {
    "Comparison".to_string()
}
