//! Run orchestrator: discovers source files and drives one conversion run.
//!
//! A run is strictly sequential:
//! - **Preconditions**: input root must be a directory, tool must resolve
//! - **Discovery**: recursive, case-sensitive extension match, sorted by path
//! - **Conversion**: one file at a time through [`crate::converter::convert_file`]
//! - **Reporting**: history append and snapshot overwrite via [`crate::report`]

mod pipeline;
mod runner;
mod types;

pub use pipeline::{run_pipeline, run_with_transcoder};
pub use runner::{discover_sources, ensure_input_dir, BatchRunner};
pub use types::{
    PipelineError, RunOutcome, RunRecord, RunStatus, RunTotals, EXIT_PRECONDITION_FAILED,
};
