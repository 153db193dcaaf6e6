//! Append-only JSON run history.

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::orchestrator::RunRecord;

use super::error::ReportError;
use super::ensure_parent_dir;

const RUNS_KEY: &str = "runs";

/// JSON document `{"runs": [RunRecord, ...]}` in chronological order.
///
/// Appending is a load-append-store cycle with a single writer assumed.
/// Existing entries are carried through as raw JSON and never rewritten.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `record` and rewrites the file. Returns the number of runs now stored.
    ///
    /// An unreadable or malformed existing file is replaced by a fresh
    /// history containing only `record`.
    pub fn append(&self, record: &RunRecord) -> Result<usize, ReportError> {
        ensure_parent_dir(&self.path)?;

        let (mut document, mut runs) = self.read_document();
        runs.push(serde_json::to_value(record)?);
        let count = runs.len();
        document.insert(RUNS_KEY.to_string(), Value::Array(runs));

        let json = serde_json::to_string_pretty(&Value::Object(document))?;
        std::fs::write(&self.path, json).map_err(|e| ReportError::io(&self.path, e))?;
        debug!("Appended run #{} to {}", count, self.path.display());
        Ok(count)
    }

    /// Reads all stored runs. A missing file is an empty history.
    pub fn load_runs(&self) -> Result<Vec<RunRecord>, ReportError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(ReportError::io(&self.path, e)),
        };

        #[derive(serde::Deserialize)]
        struct HistoryFile {
            #[serde(default)]
            runs: Vec<RunRecord>,
        }

        let file: HistoryFile = serde_json::from_str(&contents)?;
        Ok(file.runs)
    }

    /// Loads the existing document split into its other fields and its runs,
    /// recovering to an empty history on any failure.
    fn read_document(&self) -> (Map<String, Value>, Vec<Value>) {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Default::default(),
            Err(e) => {
                warn!(
                    "Could not read run history {}, starting a new one: {}",
                    self.path.display(),
                    e
                );
                return Default::default();
            }
        };

        match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Object(mut document)) => match document.remove(RUNS_KEY) {
                Some(Value::Array(runs)) => (document, runs),
                None => (document, Vec::new()),
                Some(_) => {
                    warn!(
                        "Run history {} has a non-array \"runs\" field, discarding it",
                        self.path.display()
                    );
                    Default::default()
                }
            },
            Ok(_) => {
                warn!(
                    "Run history {} is not a JSON object, discarding it",
                    self.path.display()
                );
                Default::default()
            }
            Err(e) => {
                warn!(
                    "Run history {} is corrupt, discarding it: {}",
                    self.path.display(),
                    e
                );
                Default::default()
            }
        }
    }
}
