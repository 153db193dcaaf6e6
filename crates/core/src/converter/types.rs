//! Types for the converter module.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Why a conversion was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The target file was already present before the run touched it.
    TargetExists,
}

impl SkipReason {
    /// Detail string persisted in the reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TargetExists => "target_exists",
        }
    }
}

/// Classification of a single source file within a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionStatus {
    /// The tool ran and exited successfully.
    Converted,
    /// The tool was not invoked.
    Skipped(SkipReason),
    /// The tool could not be started or exited unsuccessfully.
    Failed(String),
}

impl ConversionStatus {
    /// Status label persisted in the reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Converted => "converted",
            Self::Skipped(_) => "skipped",
            Self::Failed(_) => "failed",
        }
    }

    /// Error detail; empty for converted files.
    pub fn detail(&self) -> &str {
        match self {
            Self::Converted => "",
            Self::Skipped(reason) => reason.as_str(),
            Self::Failed(error) => error,
        }
    }

    /// Rebuilds a status from its persisted label and detail.
    pub fn from_parts(label: &str, detail: &str) -> Option<Self> {
        match label {
            "converted" => Some(Self::Converted),
            "skipped" if detail == SkipReason::TargetExists.as_str() => {
                Some(Self::Skipped(SkipReason::TargetExists))
            }
            "failed" => Some(Self::Failed(detail.to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for ConversionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of one source file in one run. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "OutcomeRow", into = "OutcomeRow")]
pub struct ConversionOutcome {
    pub source: String,
    pub target: String,
    pub status: ConversionStatus,
}

impl ConversionOutcome {
    pub fn new(source: &Path, target: &Path, status: ConversionStatus) -> Self {
        Self {
            source: source.to_string_lossy().into_owned(),
            target: target.to_string_lossy().into_owned(),
            status,
        }
    }

    pub fn is_converted(&self) -> bool {
        matches!(self.status, ConversionStatus::Converted)
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self.status, ConversionStatus::Skipped(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, ConversionStatus::Failed(_))
    }

    /// Error detail as persisted (empty for converted files).
    pub fn error(&self) -> &str {
        self.status.detail()
    }
}

/// Flat persisted form shared by the JSON history and the CSV snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutcomeRow {
    pub source: String,
    pub target: String,
    pub status: String,
    #[serde(default)]
    pub error: String,
}

impl From<ConversionOutcome> for OutcomeRow {
    fn from(outcome: ConversionOutcome) -> Self {
        Self {
            status: outcome.status.label().to_string(),
            error: outcome.status.detail().to_string(),
            source: outcome.source,
            target: outcome.target,
        }
    }
}

impl TryFrom<OutcomeRow> for ConversionOutcome {
    type Error = String;

    fn try_from(row: OutcomeRow) -> Result<Self, Self::Error> {
        let status = ConversionStatus::from_parts(&row.status, &row.error)
            .ok_or_else(|| format!("unknown conversion status: {:?}", row.status))?;
        Ok(Self {
            source: row.source,
            target: row.target,
            status,
        })
    }
}

/// Captured result of one external tool invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// Exit code, `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Derives the target path: same location and stem, target extension.
pub fn target_path_for(source: &Path, target_extension: &str) -> PathBuf {
    source.with_extension(target_extension)
}
