//! Testing utilities and mock implementations.
//!
//! This module provides a mock of the external transcoding tool so the
//! conversion pipeline can be exercised without a real ffmpeg binary.
//!
//! # Example
//!
//! ```rust,ignore
//! use recast_core::testing::{fixtures, MockTranscoder, ScriptedResult};
//!
//! let dir = tempfile::TempDir::new().unwrap();
//! let sources = fixtures::touch_all(dir.path(), &["a.m4a", "b.m4a"]);
//! let transcoder = MockTranscoder::new();
//! transcoder.script("b.m4a", ScriptedResult::exit(1, "unsupported codec")).await;
//! ```

mod mock_transcoder;

pub use mock_transcoder::{MockTranscoder, RecordedInvocation, ScriptedResult};

/// Test fixtures and helper functions.
pub mod fixtures {
    use std::path::{Path, PathBuf};

    use crate::config::Config;

    /// Create empty files at the given paths relative to `root`, creating
    /// intermediate directories.
    pub fn touch_all(root: &Path, relative_paths: &[&str]) -> Vec<PathBuf> {
        relative_paths
            .iter()
            .map(|rel| {
                let path = root.join(rel);
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent).expect("create fixture directory");
                }
                std::fs::write(&path, b"").expect("write fixture file");
                path
            })
            .collect()
    }

    /// Default configuration pointed at `input_dir`, with reports under `report_dir`.
    pub fn config_for(input_dir: &Path, report_dir: &Path) -> Config {
        let mut config = Config::default();
        config.paths.input_dir = input_dir.to_path_buf();
        config.paths.history_json = report_dir.join("conversion_report.json");
        config.paths.snapshot_csv = report_dir.join("last_conversion_report.csv");
        config
    }
}
