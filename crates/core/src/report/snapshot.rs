//! CSV snapshot of the latest run.

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::converter::ConversionOutcome;

use super::error::ReportError;
use super::ensure_parent_dir;

/// Fixed snapshot columns.
pub const SNAPSHOT_COLUMNS: [&str; 4] = ["source", "target", "status", "error"];

/// Overwrites a CSV file with the outcomes of a single run.
#[derive(Debug, Clone)]
pub struct SnapshotWriter {
    path: PathBuf,
}

impl SnapshotWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces the snapshot with `outcomes`, in the given order. The header
    /// row is written even when there are no outcomes.
    pub fn write(&self, outcomes: &[ConversionOutcome]) -> Result<(), ReportError> {
        ensure_parent_dir(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.path)?;
        writer.write_record(SNAPSHOT_COLUMNS)?;
        for outcome in outcomes {
            writer.serialize(outcome)?;
        }
        writer
            .flush()
            .map_err(|e| ReportError::io(&self.path, e))?;

        debug!("Wrote {} rows to {}", outcomes.len(), self.path.display());
        Ok(())
    }

    /// Reads the snapshot back.
    pub fn load(&self) -> Result<Vec<ConversionOutcome>, ReportError> {
        let mut reader = csv::Reader::from_path(&self.path)?;
        reader
            .deserialize()
            .collect::<Result<Vec<ConversionOutcome>, _>>()
            .map_err(ReportError::from)
    }
}
