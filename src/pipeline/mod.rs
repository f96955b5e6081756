//! Pipeline orchestration and observability.
//!
//! Most callers should use [`cleanse_to_path`] or [`compare_to_path`] (from
//! [`runner`]) which:
//!
//! - read the input workbook and run every stage in order
//! - save the produced tables as sheets of an `.xlsx` output workbook
//! - optionally report per-stage progress and success/failure/alerts to a
//!   [`PipelineObserver`]
//!
//! The in-memory variants [`run_cleanse`] and [`run_compare`] skip the final
//! write.

pub mod observability;
pub mod runner;

pub use observability::{
    CompositeObserver, FileObserver, PipelineContext, PipelineObserver, PipelineOperation,
    PipelineSeverity, PipelineStage, StageStats, StdErrObserver,
};
pub use runner::{
    cleanse_to_path, compare_to_path, run_cleanse, run_compare, CleanseOutcome, CleanseRequest,
    CompareRequest, PipelineOptions,
};
