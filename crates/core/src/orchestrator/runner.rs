//! Batch runner implementation.
//!
//! Files are discovered once, sorted, and converted strictly one at a time
//! in that order. A failure on one file never stops the batch.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::ConversionConfig;
use crate::converter::{convert_file, target_path_for, Transcoder};

use super::types::{PipelineError, RunRecord};

/// Fails unless `input_dir` exists and is a directory.
pub fn ensure_input_dir(input_dir: &Path) -> Result<(), PipelineError> {
    if !input_dir.exists() {
        return Err(PipelineError::InputDirMissing(input_dir.to_path_buf()));
    }
    if !input_dir.is_dir() {
        return Err(PipelineError::InputNotADirectory(input_dir.to_path_buf()));
    }
    Ok(())
}

/// Recursively collects files whose extension is exactly `extension`
/// (case-sensitive), sorted by path.
pub fn discover_sources(
    input_dir: &Path,
    extension: &str,
) -> Result<Vec<PathBuf>, PipelineError> {
    ensure_input_dir(input_dir)?;

    let wanted = OsStr::new(extension);
    let mut sources = Vec::new();

    for entry in WalkDir::new(input_dir).follow_links(false) {
        match entry {
            Ok(entry) => {
                let path = entry.path();
                // Symlinks to regular files count; symlinked directories are not descended
                if path.extension() == Some(wanted) && path.is_file() {
                    sources.push(path.to_path_buf());
                }
            }
            Err(e) => {
                warn!("Error accessing entry under {}: {}", input_dir.display(), e);
            }
        }
    }

    sources.sort();
    debug!(
        "Discovered {} .{} files under {}",
        sources.len(),
        extension,
        input_dir.display()
    );
    Ok(sources)
}

/// Drives the conversion unit over every source file under an input root.
pub struct BatchRunner<T: Transcoder> {
    transcoder: T,
    source_extension: String,
    target_extension: String,
}

impl<T: Transcoder> BatchRunner<T> {
    /// Creates a runner for the configured source/target formats.
    pub fn new(transcoder: T, conversion: &ConversionConfig) -> Self {
        Self {
            transcoder,
            source_extension: conversion.source_extension.clone(),
            target_extension: conversion.target_extension.clone(),
        }
    }

    /// Runs one batch and returns its record. Only a bad input root is an
    /// error; per-file failures are part of the record.
    pub async fn run(&self, input_dir: &Path) -> Result<RunRecord, PipelineError> {
        let started_at = Utc::now();
        let sources = discover_sources(input_dir, &self.source_extension)?;
        info!(
            "Starting run over {} ({} .{} files)",
            input_dir.display(),
            sources.len(),
            self.source_extension
        );

        let mut results = Vec::with_capacity(sources.len());
        for (index, source) in sources.iter().enumerate() {
            let target = target_path_for(source, &self.target_extension);
            debug!("[{}/{}] {}", index + 1, sources.len(), source.display());
            results.push(convert_file(&self.transcoder, source, &target).await);
        }

        let record = RunRecord::new(
            started_at,
            input_dir.to_string_lossy().into_owned(),
            results,
        );
        info!(
            found = record.totals.found,
            converted = record.totals.converted,
            skipped = record.totals.skipped,
            failed = record.totals.failed,
            "Run finished"
        );
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::ConversionStatus;
    use crate::testing::{fixtures, MockTranscoder, ScriptedResult};
    use tempfile::TempDir;

    fn runner(transcoder: MockTranscoder) -> BatchRunner<MockTranscoder> {
        BatchRunner::new(transcoder, &ConversionConfig::default())
    }

    #[test]
    fn test_discover_is_recursive_and_sorted() {
        let dir = TempDir::new().unwrap();
        fixtures::touch_all(
            dir.path(),
            &["b.m4a", "a.m4a", "sub/z.m4a", "sub/deeper/c.m4a", "notes.txt"],
        );

        let found = discover_sources(dir.path(), "m4a").unwrap();
        let relative: Vec<_> = found
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();

        assert_eq!(
            relative,
            vec![
                PathBuf::from("a.m4a"),
                PathBuf::from("b.m4a"),
                PathBuf::from("sub/deeper/c.m4a"),
                PathBuf::from("sub/z.m4a"),
            ]
        );
    }

    #[test]
    fn test_discover_is_case_sensitive() {
        let dir = TempDir::new().unwrap();
        fixtures::touch_all(dir.path(), &["lower.m4a", "upper.M4A", "mixed.M4a"]);

        let found = discover_sources(dir.path(), "m4a").unwrap();
        assert_eq!(found, vec![dir.path().join("lower.m4a")]);
    }

    #[test]
    fn test_discover_ignores_directories_named_like_sources() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("album.m4a")).unwrap();
        fixtures::touch_all(dir.path(), &["album.m4a/track.m4a"]);

        let found = discover_sources(dir.path(), "m4a").unwrap();
        assert_eq!(found, vec![dir.path().join("album.m4a/track.m4a")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_includes_symlinked_files() {
        let dir = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        let real = fixtures::touch_all(outside.path(), &["real.m4a"]).remove(0);
        std::os::unix::fs::symlink(&real, dir.path().join("linked.m4a")).unwrap();
        fixtures::touch_all(dir.path(), &["plain.m4a"]);

        let found = discover_sources(dir.path(), "m4a").unwrap();
        assert_eq!(
            found,
            vec![dir.path().join("linked.m4a"), dir.path().join("plain.m4a")]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_does_not_descend_symlinked_dirs() {
        let dir = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        fixtures::touch_all(outside.path(), &["elsewhere.m4a"]);
        std::os::unix::fs::symlink(outside.path(), dir.path().join("shortcut")).unwrap();
        fixtures::touch_all(dir.path(), &["here.m4a"]);

        let found = discover_sources(dir.path(), "m4a").unwrap();
        assert_eq!(found, vec![dir.path().join("here.m4a")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_skips_unreadable_dirs() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        fixtures::touch_all(dir.path(), &["a.m4a", "locked/hidden.m4a", "open/b.m4a"]);
        let locked = dir.path().join("locked");
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits do not stop root; nothing to check there
        if std::fs::read_dir(&locked).is_ok() {
            std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let found = discover_sources(dir.path(), "m4a");
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(
            found.unwrap(),
            vec![dir.path().join("a.m4a"), dir.path().join("open/b.m4a")]
        );
    }

    #[test]
    fn test_missing_input_dir() {
        let err = discover_sources(Path::new("/nonexistent/input"), "m4a").unwrap_err();
        assert!(matches!(err, PipelineError::InputDirMissing(_)));
    }

    #[test]
    fn test_input_is_a_file() {
        let dir = TempDir::new().unwrap();
        let file = fixtures::touch_all(dir.path(), &["file.m4a"]).remove(0);
        let err = ensure_input_dir(&file).unwrap_err();
        assert!(matches!(err, PipelineError::InputNotADirectory(_)));
    }

    #[tokio::test]
    async fn test_run_converts_in_discovery_order() {
        let dir = TempDir::new().unwrap();
        fixtures::touch_all(dir.path(), &["b.m4a", "a.m4a"]);
        let transcoder = MockTranscoder::new();

        let record = runner(transcoder.clone()).run(dir.path()).await.unwrap();

        let invoked: Vec<_> = transcoder
            .recorded_invocations()
            .await
            .into_iter()
            .map(|inv| inv.input)
            .collect();
        assert_eq!(
            invoked,
            vec![dir.path().join("a.m4a"), dir.path().join("b.m4a")]
        );
        assert_eq!(record.totals.converted, 2);
        assert_eq!(
            record.results[0].target,
            dir.path().join("a.mp3").to_string_lossy()
        );
    }

    #[tokio::test]
    async fn test_run_continues_after_failure() {
        let dir = TempDir::new().unwrap();
        fixtures::touch_all(dir.path(), &["a.m4a", "b.m4a", "c.m4a"]);
        let transcoder = MockTranscoder::new();
        transcoder
            .script("a.m4a", ScriptedResult::spawn_error("vanished"))
            .await;
        transcoder.script("b.m4a", ScriptedResult::Signal).await;

        let record = runner(transcoder.clone()).run(dir.path()).await.unwrap();

        assert_eq!(transcoder.invocation_count().await, 3);
        assert_eq!(record.totals.failed, 2);
        assert_eq!(record.totals.converted, 1);
        assert!(record.totals.is_partition());
        assert_eq!(
            record.results[1].status,
            ConversionStatus::Failed("mock terminated by signal".to_string())
        );
    }

    #[tokio::test]
    async fn test_run_records_input_dir_and_start_time() {
        let dir = TempDir::new().unwrap();
        let before = Utc::now();

        let record = runner(MockTranscoder::new()).run(dir.path()).await.unwrap();

        assert_eq!(record.input_dir, dir.path().to_string_lossy());
        assert!(record.timestamp_utc >= before);
        assert!(record.results.is_empty());
    }
}
