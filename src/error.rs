use thiserror::Error;

/// Convenience result type for workbook-cleanse operations.
pub type CleanseResult<T> = Result<T, CleanseError>;

/// Error type shared across workbook reading, table processing, and writing.
///
/// Per-cell problems are never fatal: predicates evaluate to `false` on
/// mismatched variants and cleansing passes unrecognized values through, so
/// these variants cover structural failures only.
#[derive(Debug, Error)]
pub enum CleanseError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Workbook could not be opened or a sheet could not be read.
    #[error("workbook read error: {0}")]
    Read(#[from] calamine::Error),

    /// Output workbook could not be built or saved.
    #[error("workbook write error: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),

    /// Configuration JSON could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    /// A requested column is absent from the table's header.
    #[error("column '{column}' not found")]
    ColumnNotFound { column: String },

    /// A requested sheet is absent from the workbook.
    #[error("sheet '{sheet}' not found. available={available:?}")]
    SheetNotFound { sheet: String, available: Vec<String> },

    /// The workbook contains no sheets at all.
    #[error("workbook has no sheets")]
    EmptyWorkbook,

    /// A sheet has no non-empty rows, so no header row could be detected.
    #[error("sheet '{sheet}' has no non-empty rows (no header row found)")]
    EmptySheet { sheet: String },

    /// Two header cells of one sheet resolve to the same column name.
    #[error("sheet '{sheet}' has duplicate column '{column}'")]
    DuplicateColumn { sheet: String, column: String },

    /// Tables with different headers were combined.
    #[error("column mismatch: {message}")]
    ColumnMismatch { message: String },
}
