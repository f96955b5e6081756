use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::CleanseError;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PipelineSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (operation failed).
    Error,
    /// Critical error (typically I/O or other infrastructure failures).
    Critical,
}

/// Which pipeline a run belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineOperation {
    /// Partition, cleanse, explode, merge, and filter a registry sheet.
    Cleanse,
    /// Compare raw entries against a cleaned reference workbook.
    Compare,
}

/// Context about a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineContext {
    /// The input workbook path.
    pub input: PathBuf,
    /// Which pipeline is running.
    pub operation: PipelineOperation,
}

/// One completed phase of a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    /// Input sheet(s) read into tables.
    Read,
    /// Rows split into valid and invalid by their code cell.
    Partition,
    /// Invalid rows exploded into one row per code token.
    Explode,
    /// Cleansed and exploded rows concatenated.
    Merge,
    /// Keep-filter applied to the merged rows.
    Filter,
    /// Reference codes collected from the cleaned workbook.
    CollectCodes,
    /// Report rows produced from the raw entries.
    Compare,
    /// Output workbook saved.
    Write,
}

/// Row count reported for a completed stage or run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageStats {
    /// Number of rows the stage produced.
    pub rows: usize,
}

/// Observer interface for pipeline progress and outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait PipelineObserver: Send + Sync {
    /// Called after each stage of a run completes.
    fn on_stage(&self, _ctx: &PipelineContext, _stage: PipelineStage, _stats: StageStats) {}

    /// Called when a run completes.
    fn on_complete(&self, _ctx: &PipelineContext, _stats: StageStats) {}

    /// Called when a run fails.
    fn on_failure(&self, _ctx: &PipelineContext, _severity: PipelineSeverity, _error: &CleanseError) {}

    /// Called when a failure meets an alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &PipelineContext, severity: PipelineSeverity, error: &CleanseError) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn PipelineObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn PipelineObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl PipelineObserver for CompositeObserver {
    fn on_stage(&self, ctx: &PipelineContext, stage: PipelineStage, stats: StageStats) {
        for o in &self.observers {
            o.on_stage(ctx, stage, stats);
        }
    }

    fn on_complete(&self, ctx: &PipelineContext, stats: StageStats) {
        for o in &self.observers {
            o.on_complete(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &PipelineContext, severity: PipelineSeverity, error: &CleanseError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &PipelineContext, severity: PipelineSeverity, error: &CleanseError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Logs pipeline events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl PipelineObserver for StdErrObserver {
    fn on_stage(&self, ctx: &PipelineContext, stage: PipelineStage, stats: StageStats) {
        eprintln!(
            "[pipeline][stage] op={:?} input={} stage={:?} rows={}",
            ctx.operation,
            ctx.input.display(),
            stage,
            stats.rows
        );
    }

    fn on_complete(&self, ctx: &PipelineContext, stats: StageStats) {
        eprintln!(
            "[pipeline][ok] op={:?} input={} rows={}",
            ctx.operation,
            ctx.input.display(),
            stats.rows
        );
    }

    fn on_failure(&self, ctx: &PipelineContext, severity: PipelineSeverity, error: &CleanseError) {
        eprintln!(
            "[pipeline][{:?}] op={:?} input={} err={}",
            severity,
            ctx.operation,
            ctx.input.display(),
            error
        );
    }

    fn on_alert(&self, ctx: &PipelineContext, severity: PipelineSeverity, error: &CleanseError) {
        eprintln!(
            "[ALERT][pipeline][{:?}] op={:?} input={} err={}",
            severity,
            ctx.operation,
            ctx.input.display(),
            error
        );
    }
}

/// Appends pipeline events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl PipelineObserver for FileObserver {
    fn on_stage(&self, ctx: &PipelineContext, stage: PipelineStage, stats: StageStats) {
        self.append_line(&format!(
            "{} stage op={:?} input={} stage={:?} rows={}",
            unix_ts(),
            ctx.operation,
            ctx.input.display(),
            stage,
            stats.rows
        ));
    }

    fn on_complete(&self, ctx: &PipelineContext, stats: StageStats) {
        self.append_line(&format!(
            "{} ok op={:?} input={} rows={}",
            unix_ts(),
            ctx.operation,
            ctx.input.display(),
            stats.rows
        ));
    }

    fn on_failure(&self, ctx: &PipelineContext, severity: PipelineSeverity, error: &CleanseError) {
        self.append_line(&format!(
            "{} fail severity={:?} op={:?} input={} err={}",
            unix_ts(),
            severity,
            ctx.operation,
            ctx.input.display(),
            error
        ));
    }

    fn on_alert(&self, ctx: &PipelineContext, severity: PipelineSeverity, error: &CleanseError) {
        self.append_line(&format!(
            "{} ALERT severity={:?} op={:?} input={} err={}",
            unix_ts(),
            severity,
            ctx.operation,
            ctx.input.display(),
            error
        ));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
