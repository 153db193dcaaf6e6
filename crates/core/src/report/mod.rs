//! Report writer: persists each run as an append-only JSON history entry and
//! as a CSV snapshot of the latest run.
//!
//! The two files are written independently and are not transactional with
//! each other; either can be re-derived by rerunning.

mod error;
mod history;
mod snapshot;

pub use error::ReportError;
pub use history::HistoryStore;
pub use snapshot::{SnapshotWriter, SNAPSHOT_COLUMNS};

use std::path::Path;

use crate::orchestrator::RunRecord;

/// Writes both report views for a finished run.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    history: HistoryStore,
    snapshot: SnapshotWriter,
}

impl ReportWriter {
    pub fn new(history_path: &Path, snapshot_path: &Path) -> Self {
        Self {
            history: HistoryStore::new(history_path),
            snapshot: SnapshotWriter::new(snapshot_path),
        }
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn snapshot(&self) -> &SnapshotWriter {
        &self.snapshot
    }

    pub fn history_path(&self) -> &Path {
        self.history.path()
    }

    pub fn snapshot_path(&self) -> &Path {
        self.snapshot.path()
    }

    /// Appends `record` to the history, then overwrites the snapshot.
    ///
    /// Both writes are attempted even if the first fails; the first error
    /// is returned.
    pub fn write(&self, record: &RunRecord) -> Result<(), ReportError> {
        let history = self.history.append(record);
        let snapshot = self.snapshot.write(&record.results);
        let runs = history?;
        snapshot?;
        tracing::info!(
            "Reports written: {} (run {}), {}",
            self.history.path().display(),
            runs,
            self.snapshot.path().display()
        );
        Ok(())
    }
}

/// Creates the parent directory of `path` if it has one.
fn ensure_parent_dir(path: &Path) -> Result<(), ReportError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(|e| ReportError::io(parent, e))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::{ConversionOutcome, ConversionStatus};
    use chrono::Utc;
    use tempfile::TempDir;

    #[test]
    fn test_write_both_views() {
        let dir = TempDir::new().unwrap();
        let writer = ReportWriter::new(
            &dir.path().join("json/history.json"),
            &dir.path().join("csv/last.csv"),
        );
        let record = RunRecord::new(
            Utc::now(),
            "in".into(),
            vec![ConversionOutcome::new(
                Path::new("in/a.m4a"),
                Path::new("in/a.mp3"),
                ConversionStatus::Converted,
            )],
        );

        writer.write(&record).unwrap();
        writer.write(&record).unwrap();

        assert_eq!(writer.history().load_runs().unwrap().len(), 2);
        assert_eq!(writer.snapshot().load().unwrap().len(), 1);
    }

    #[test]
    fn test_snapshot_written_when_history_fails() {
        let dir = TempDir::new().unwrap();
        let history_path = dir.path().join("history.json");
        std::fs::create_dir_all(&history_path).unwrap();
        let writer = ReportWriter::new(&history_path, &dir.path().join("last.csv"));
        let record = RunRecord::new(
            Utc::now(),
            "in".into(),
            vec![ConversionOutcome::new(
                Path::new("in/a.m4a"),
                Path::new("in/a.mp3"),
                ConversionStatus::Converted,
            )],
        );

        let err = writer.write(&record).unwrap_err();
        assert!(matches!(err, ReportError::Io { .. }));

        let rows = writer.snapshot().load().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].source, "in/a.m4a");
    }

    #[test]
    fn test_ensure_parent_dir_bare_file_name() {
        assert!(ensure_parent_dir(Path::new("report.json")).is_ok());
    }
}
