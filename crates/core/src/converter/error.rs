//! Error types for the converter module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a transcoder before it has any exit status to report.
///
/// A tool that runs and exits non-zero is not an error; see `ToolOutput`.
#[derive(Debug, Error)]
pub enum TranscoderError {
    /// The child process could not be started.
    #[error("Failed to start {}: {source}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Waiting on the child process or reading its output failed.
    #[error("I/O error while running transcoder: {0}")]
    Io(#[from] std::io::Error),
}

impl TranscoderError {
    /// Creates a spawn error for the given program.
    pub fn spawn(program: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Spawn {
            program: program.into(),
            source,
        }
    }
}
