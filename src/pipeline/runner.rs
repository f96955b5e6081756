//! Pipeline entrypoints.
//!
//! Most callers should use [`cleanse_to_path`] or [`compare_to_path`], which
//! read an input workbook, run every stage, and save the result as an
//! `.xlsx` workbook. The `run_*` variants return the produced tables without
//! writing anything, for callers that post-process in memory.
//!
//! If a [`super::observability::PipelineObserver`] is provided, per-stage
//! progress and the final success/failure/alert are reported to it.

use std::error::Error as StdError;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::{CleanseConfig, CompareConfig};
use crate::error::{CleanseError, CleanseResult};
use crate::processing::{
    cleanse_column, collect_codes, compare, explode_column, filter, partition_by_validity,
    FilterSpec, Predicate,
};
use crate::types::{CellValue, Table};
use crate::workbook;

use super::observability::{
    PipelineContext, PipelineObserver, PipelineOperation, PipelineSeverity, PipelineStage,
    StageStats,
};

/// Options controlling pipeline observation.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct PipelineOptions {
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn PipelineObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: PipelineSeverity,
}

impl std::fmt::Debug for PipelineOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineOptions")
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            observer: None,
            alert_at_or_above: PipelineSeverity::Critical,
        }
    }
}

/// Every table produced by one cleanse run, in stage order.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanseOutcome {
    /// Rows whose code cell was valid, with codes normalized.
    pub valid: Table,
    /// Rows whose code cell was unusable as-is, unchanged.
    pub invalid: Table,
    /// Invalid rows exploded into one row per code token.
    pub exploded: Table,
    /// Cleansed valid rows followed by the exploded rows.
    pub merged: Table,
    /// Merged rows that passed the keep-filter.
    pub filtered: Table,
}

/// Run the cleanse pipeline and return every intermediate table.
///
/// Stages, in order:
///
/// 1. Read `config.sheet` (or the first sheet) of `input` into a table
/// 2. Partition rows by the validity of their `config.code_column` cell
/// 3. Normalize the code cells of the valid rows
/// 4. Explode each invalid row into one row per code token
/// 5. Concatenate the cleansed and exploded rows
/// 6. Keep merged rows whose `config.keep_column` matches a `keep_values` entry
///
/// Nothing is written to disk; see [`cleanse_to_path`] for that.
pub fn run_cleanse(
    input: impl AsRef<Path>,
    config: &CleanseConfig,
    options: &PipelineOptions,
) -> CleanseResult<CleanseOutcome> {
    let input = input.as_ref();
    let ctx = PipelineContext {
        input: input.to_path_buf(),
        operation: PipelineOperation::Cleanse,
    };

    let result = cleanse_stages(input, config, options, &ctx);
    report(options, &ctx, &result, |outcome| outcome.filtered.row_count());
    result
}

/// Run the cleanse pipeline and save all five stage tables to `output`,
/// one sheet per table, named by `config.output_sheets`.
///
/// # Examples
///
/// ```no_run
/// use workbook_cleanse::config::CleanseConfig;
/// use workbook_cleanse::pipeline::{cleanse_to_path, PipelineOptions};
///
/// # fn main() -> Result<(), workbook_cleanse::CleanseError> {
/// let mut config = CleanseConfig::new("Asset Code", "Site");
/// config.invalid_markers = vec!["not found".to_string()];
/// config.keep_values = vec!["North Plant".to_string()];
///
/// let outcome = cleanse_to_path(
///     "registry.xlsx",
///     "cleansed.xlsx",
///     &config,
///     &PipelineOptions::default(),
/// )?;
/// println!("kept {} rows", outcome.filtered.row_count());
/// # Ok(())
/// # }
/// ```
///
/// ## Observability (stderr logging + alert threshold)
///
/// ```no_run
/// use std::sync::Arc;
///
/// use workbook_cleanse::config::CleanseConfig;
/// use workbook_cleanse::pipeline::{
///     cleanse_to_path, PipelineOptions, PipelineSeverity, StdErrObserver,
/// };
///
/// let options = PipelineOptions {
///     observer: Some(Arc::new(StdErrObserver::default())),
///     alert_at_or_above: PipelineSeverity::Critical,
/// };
///
/// // Missing inputs are treated as Critical and will trigger `on_alert`.
/// let config = CleanseConfig::new("Asset Code", "Site");
/// let _err = cleanse_to_path("missing.xlsx", "out.xlsx", &config, &options).unwrap_err();
/// ```
pub fn cleanse_to_path(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &CleanseConfig,
    options: &PipelineOptions,
) -> CleanseResult<CleanseOutcome> {
    let input = input.as_ref();
    let ctx = PipelineContext {
        input: input.to_path_buf(),
        operation: PipelineOperation::Cleanse,
    };

    let result = cleanse_stages_to_path(input, output.as_ref(), config, options, &ctx);
    report(options, &ctx, &result, |outcome| outcome.filtered.row_count());
    result
}

/// Run the compare pipeline and return the report table.
///
/// Reads `config.sheet` (or the first sheet) of `original`, collects the
/// reference codes from `config.sheets` (or all sheets) of `cleaned`, and
/// reports every code token of the original entries as found or missing.
pub fn run_compare(
    original: impl AsRef<Path>,
    cleaned: impl AsRef<Path>,
    config: &CompareConfig,
    options: &PipelineOptions,
) -> CleanseResult<Table> {
    let original = original.as_ref();
    let ctx = PipelineContext {
        input: original.to_path_buf(),
        operation: PipelineOperation::Compare,
    };

    let result = compare_stages(original, cleaned.as_ref(), config, options, &ctx);
    report(options, &ctx, &result, Table::row_count);
    result
}

/// Run the compare pipeline and save the report to `output` under
/// `config.report_sheet`.
///
/// # Examples
///
/// ```no_run
/// use workbook_cleanse::config::CompareConfig;
/// use workbook_cleanse::pipeline::{compare_to_path, PipelineOptions};
///
/// # fn main() -> Result<(), workbook_cleanse::CleanseError> {
/// let report = compare_to_path(
///     "registry.xlsx",
///     "cleansed.xlsx",
///     "report.xlsx",
///     &CompareConfig::new("Asset Code"),
///     &PipelineOptions::default(),
/// )?;
/// println!("report rows: {}", report.row_count());
/// # Ok(())
/// # }
/// ```
pub fn compare_to_path(
    original: impl AsRef<Path>,
    cleaned: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &CompareConfig,
    options: &PipelineOptions,
) -> CleanseResult<Table> {
    let original = original.as_ref();
    let ctx = PipelineContext {
        input: original.to_path_buf(),
        operation: PipelineOperation::Compare,
    };

    let result =
        compare_stages_to_path(original, cleaned.as_ref(), output.as_ref(), config, options, &ctx);
    report(options, &ctx, &result, Table::row_count);
    result
}

fn cleanse_stages(
    input: &Path,
    config: &CleanseConfig,
    options: &PipelineOptions,
    ctx: &PipelineContext,
) -> CleanseResult<CleanseOutcome> {
    let table = workbook::read_sheet(input, config.sheet.as_deref())?;
    observe_stage(options, ctx, PipelineStage::Read, table.row_count());

    let (valid, invalid) =
        partition_by_validity(&table, &config.code_column, &config.invalid_markers)?;
    observe_stage(
        options,
        ctx,
        PipelineStage::Partition,
        valid.row_count() + invalid.row_count(),
    );

    let valid = cleanse_column(&valid, &config.code_column)?;
    let exploded = explode_column(&invalid, &config.code_column)?;
    observe_stage(options, ctx, PipelineStage::Explode, exploded.row_count());

    let merged = valid.concat(&exploded)?;
    observe_stage(options, ctx, PipelineStage::Merge, merged.row_count());

    let keep = FilterSpec::new(
        &config.keep_column,
        Predicate::OneOf(
            config
                .keep_values
                .iter()
                .map(|v| CellValue::text(v.as_str()))
                .collect(),
        ),
    );
    let filtered = filter(&merged, &keep)?;
    observe_stage(options, ctx, PipelineStage::Filter, filtered.row_count());

    Ok(CleanseOutcome {
        valid,
        invalid,
        exploded,
        merged,
        filtered,
    })
}

fn cleanse_stages_to_path(
    input: &Path,
    output: &Path,
    config: &CleanseConfig,
    options: &PipelineOptions,
    ctx: &PipelineContext,
) -> CleanseResult<CleanseOutcome> {
    let outcome = cleanse_stages(input, config, options, ctx)?;

    let sheets = &config.output_sheets;
    workbook::write_workbook(
        output,
        &[
            (sheets.valid.as_str(), &outcome.valid),
            (sheets.invalid.as_str(), &outcome.invalid),
            (sheets.exploded.as_str(), &outcome.exploded),
            (sheets.merged.as_str(), &outcome.merged),
            (sheets.filtered.as_str(), &outcome.filtered),
        ],
    )?;
    let written = outcome.valid.row_count()
        + outcome.invalid.row_count()
        + outcome.exploded.row_count()
        + outcome.merged.row_count()
        + outcome.filtered.row_count();
    observe_stage(options, ctx, PipelineStage::Write, written);

    Ok(outcome)
}

fn compare_stages(
    original: &Path,
    cleaned: &Path,
    config: &CompareConfig,
    options: &PipelineOptions,
    ctx: &PipelineContext,
) -> CleanseResult<Table> {
    let raw = workbook::read_sheet(original, config.sheet.as_deref())?;
    observe_stage(options, ctx, PipelineStage::Read, raw.row_count());

    let sheet_refs: Option<Vec<&str>> = config
        .sheets
        .as_ref()
        .map(|names| names.iter().map(String::as_str).collect());
    let tables = workbook::read_workbook(cleaned, sheet_refs.as_deref())?;
    let codes = collect_codes(&tables, &config.code_column);
    observe_stage(options, ctx, PipelineStage::CollectCodes, codes.len());

    let report = compare(&raw, &config.code_column, &codes)?;
    observe_stage(options, ctx, PipelineStage::Compare, report.row_count());

    Ok(report)
}

fn compare_stages_to_path(
    original: &Path,
    cleaned: &Path,
    output: &Path,
    config: &CompareConfig,
    options: &PipelineOptions,
    ctx: &PipelineContext,
) -> CleanseResult<Table> {
    let report = compare_stages(original, cleaned, config, options, ctx)?;

    workbook::write_table_to_path(output, &config.report_sheet, &report)?;
    observe_stage(options, ctx, PipelineStage::Write, report.row_count());

    Ok(report)
}

fn observe_stage(
    options: &PipelineOptions,
    ctx: &PipelineContext,
    stage: PipelineStage,
    rows: usize,
) {
    if let Some(obs) = options.observer.as_ref() {
        obs.on_stage(ctx, stage, StageStats { rows });
    }
}

fn report<T>(
    options: &PipelineOptions,
    ctx: &PipelineContext,
    result: &CleanseResult<T>,
    rows: impl Fn(&T) -> usize,
) {
    let Some(obs) = options.observer.as_ref() else {
        return;
    };
    match result {
        Ok(value) => obs.on_complete(ctx, StageStats { rows: rows(value) }),
        Err(e) => {
            let sev = severity_for_error(e);
            obs.on_failure(ctx, sev, e);
            if sev >= options.alert_at_or_above {
                obs.on_alert(ctx, sev, e);
            }
        }
    }
}

fn severity_for_error(e: &CleanseError) -> PipelineSeverity {
    match e {
        CleanseError::Io(_) => PipelineSeverity::Critical,
        CleanseError::Read(err) => {
            // Reader errors wrap the underlying IO failure when the file
            // itself is the problem. If we can detect IO in the source
            // chain, treat it as Critical.
            if error_chain_contains_io(err) {
                PipelineSeverity::Critical
            } else {
                PipelineSeverity::Error
            }
        }
        CleanseError::Write(err) => {
            if error_chain_contains_io(err) {
                PipelineSeverity::Critical
            } else {
                PipelineSeverity::Error
            }
        }
        CleanseError::Config(_) => PipelineSeverity::Error,
        CleanseError::ColumnNotFound { .. } => PipelineSeverity::Error,
        CleanseError::SheetNotFound { .. } => PipelineSeverity::Error,
        CleanseError::EmptyWorkbook => PipelineSeverity::Error,
        CleanseError::EmptySheet { .. } => PipelineSeverity::Error,
        CleanseError::DuplicateColumn { .. } => PipelineSeverity::Error,
        CleanseError::ColumnMismatch { .. } => PipelineSeverity::Error,
    }
}

fn error_chain_contains_io(e: &(dyn StdError + 'static)) -> bool {
    let mut cur: Option<&(dyn StdError + 'static)> = Some(e);
    while let Some(err) = cur {
        if err.is::<std::io::Error>() {
            return true;
        }
        cur = err.source();
    }
    false
}

/// Owned request bundling everything needed for one cleanse run.
///
/// Useful for handing work to a job queue or a worker thread.
#[derive(Debug, Clone)]
pub struct CleanseRequest {
    /// Path to the input workbook.
    pub input: PathBuf,
    /// Path the output workbook is saved to.
    pub output: PathBuf,
    /// Cleanse settings.
    pub config: CleanseConfig,
    /// Options controlling observation.
    pub options: PipelineOptions,
}

impl CleanseRequest {
    /// Execute the request by calling [`cleanse_to_path`].
    pub fn run(&self) -> CleanseResult<CleanseOutcome> {
        cleanse_to_path(&self.input, &self.output, &self.config, &self.options)
    }
}

/// Owned request bundling everything needed for one compare run.
#[derive(Debug, Clone)]
pub struct CompareRequest {
    /// Path to the original workbook.
    pub original: PathBuf,
    /// Path to the cleaned reference workbook.
    pub cleaned: PathBuf,
    /// Path the report workbook is saved to.
    pub output: PathBuf,
    /// Compare settings.
    pub config: CompareConfig,
    /// Options controlling observation.
    pub options: PipelineOptions,
}

impl CompareRequest {
    /// Execute the request by calling [`compare_to_path`].
    pub fn run(&self) -> CleanseResult<Table> {
        compare_to_path(
            &self.original,
            &self.cleaned,
            &self.output,
            &self.config,
            &self.options,
        )
    }
}
