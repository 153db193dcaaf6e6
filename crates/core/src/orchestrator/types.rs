//! Types for the run orchestrator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::converter::{ConversionOutcome, ConversionStatus, ToolLocator};
use crate::report::ReportError;

/// Exit status for a run that never started.
pub const EXIT_PRECONDITION_FAILED: i32 = 1;

/// Errors that stop a run before any file is converted, or that prevent
/// its reports from being persisted.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input root does not exist.
    #[error("Input directory does not exist: {}", .0.display())]
    InputDirMissing(PathBuf),

    /// Input root exists but is not a directory.
    #[error("Input path is not a directory: {}", .0.display())]
    InputNotADirectory(PathBuf),

    /// No usable transcoding executable.
    #[error(
        "{program} not found. Install with Homebrew (`brew install {program}`) or set \
         {override_env} to the full {program} path."
    )]
    ToolNotFound {
        program: String,
        override_env: String,
    },

    /// Reports could not be written.
    #[error("Failed to write reports: {0}")]
    Report(#[from] ReportError),
}

impl PipelineError {
    pub fn tool_not_found(locator: &ToolLocator) -> Self {
        Self::ToolNotFound {
            program: locator.program().to_string(),
            override_env: locator.override_env().to_string(),
        }
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        EXIT_PRECONDITION_FAILED
    }
}

/// Per-run counters. `found == converted + skipped + failed` always holds
/// for totals built with [`RunTotals::from_outcomes`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunTotals {
    /// Number of discovered source files.
    #[serde(rename = "found_m4a")]
    pub found: usize,
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl RunTotals {
    pub fn from_outcomes(outcomes: &[ConversionOutcome]) -> Self {
        let mut totals = Self::default();
        for outcome in outcomes {
            totals.record(&outcome.status);
        }
        totals
    }

    fn record(&mut self, status: &ConversionStatus) {
        self.found += 1;
        match status {
            ConversionStatus::Converted => self.converted += 1,
            ConversionStatus::Skipped(_) => self.skipped += 1,
            ConversionStatus::Failed(_) => self.failed += 1,
        }
    }

    /// Whether the three outcome counts partition `found`.
    pub fn is_partition(&self) -> bool {
        self.found == self.converted + self.skipped + self.failed
    }
}

/// How a completed run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Every file was converted or skipped.
    Clean,
    /// At least one file failed; all files were still attempted.
    PartialFailure,
}

impl RunStatus {
    /// Process exit status for a completed run.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Clean => 0,
            Self::PartialFailure => 2,
        }
    }
}

/// One pipeline invocation, as appended to the run history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRecord {
    /// Run start time.
    pub timestamp_utc: DateTime<Utc>,
    /// Input root as configured.
    pub input_dir: String,
    pub totals: RunTotals,
    /// Outcomes in discovery order.
    pub results: Vec<ConversionOutcome>,
}

impl RunRecord {
    pub fn new(
        timestamp_utc: DateTime<Utc>,
        input_dir: String,
        results: Vec<ConversionOutcome>,
    ) -> Self {
        Self {
            timestamp_utc,
            input_dir,
            totals: RunTotals::from_outcomes(&results),
            results,
        }
    }

    pub fn status(&self) -> RunStatus {
        if self.totals.failed == 0 {
            RunStatus::Clean
        } else {
            RunStatus::PartialFailure
        }
    }
}

/// A completed run together with where its reports went.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub record: RunRecord,
    /// Executable used, when resolved through the locator.
    pub tool_path: Option<PathBuf>,
    pub history_path: PathBuf,
    pub snapshot_path: PathBuf,
}

impl RunOutcome {
    pub fn exit_code(&self) -> i32 {
        self.record.status().exit_code()
    }
}
