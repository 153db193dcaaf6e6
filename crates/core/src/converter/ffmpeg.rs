//! FFmpeg-based transcoder implementation.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

use crate::config::ConversionConfig;

use super::error::TranscoderError;
use super::traits::Transcoder;
use super::types::ToolOutput;

/// Runs a resolved ffmpeg executable with a fixed audio-only argument template.
#[derive(Debug, Clone)]
pub struct FfmpegTranscoder {
    binary: PathBuf,
    audio_codec: String,
    quality: String,
}

impl FfmpegTranscoder {
    /// Creates a transcoder for the given executable and codec settings.
    pub fn new(binary: PathBuf, conversion: &ConversionConfig) -> Self {
        Self {
            binary,
            audio_codec: conversion.audio_codec.clone(),
            quality: conversion.quality.clone(),
        }
    }

    /// Builds the ffmpeg argument list.
    ///
    /// Flag order and spelling are part of ffmpeg's CLI contract.
    fn build_args(&self, input_path: &Path, output_path: &Path) -> Vec<String> {
        vec![
            "-y".to_string(), // Overwrite output
            "-i".to_string(),
            input_path.to_string_lossy().to_string(),
            "-vn".to_string(), // Drop video / cover art streams
            "-codec:a".to_string(),
            self.audio_codec.clone(),
            "-q:a".to_string(),
            self.quality.clone(),
            output_path.to_string_lossy().to_string(),
        ]
    }
}

#[async_trait]
impl Transcoder for FfmpegTranscoder {
    fn name(&self) -> &str {
        "ffmpeg"
    }

    async fn transcode(&self, input: &Path, output: &Path) -> Result<ToolOutput, TranscoderError> {
        let args = self.build_args(input, output);
        tracing::debug!(binary = %self.binary.display(), ?args, "Running ffmpeg");

        let output = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| TranscoderError::spawn(&self.binary, e))?;

        Ok(ToolOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transcoder(binary: impl Into<PathBuf>) -> FfmpegTranscoder {
        FfmpegTranscoder::new(binary.into(), &ConversionConfig::default())
    }

    #[test]
    fn test_build_args_default_template() {
        let args = transcoder("ffmpeg").build_args(
            Path::new("/data/clip.m4a"),
            Path::new("/data/clip.mp3"),
        );

        assert_eq!(
            args,
            vec![
                "-y",
                "-i",
                "/data/clip.m4a",
                "-vn",
                "-codec:a",
                "libmp3lame",
                "-q:a",
                "2",
                "/data/clip.mp3",
            ]
        );
    }

    #[test]
    fn test_build_args_custom_codec() {
        let conversion = ConversionConfig {
            audio_codec: "libvorbis".to_string(),
            quality: "6".to_string(),
            ..Default::default()
        };
        let transcoder = FfmpegTranscoder::new(PathBuf::from("ffmpeg"), &conversion);
        let args = transcoder.build_args(Path::new("a.m4a"), Path::new("a.ogg"));

        assert_eq!(args[4], "-codec:a");
        assert_eq!(args[5], "libvorbis");
        assert_eq!(args[6], "-q:a");
        assert_eq!(args[7], "6");
        assert_eq!(args.last().map(String::as_str), Some("a.ogg"));
    }

    #[tokio::test]
    async fn test_transcode_missing_binary_is_spawn_error() {
        let transcoder = transcoder("/nonexistent/bin/ffmpeg");
        let err = transcoder
            .transcode(Path::new("a.m4a"), Path::new("a.mp3"))
            .await
            .unwrap_err();
        assert!(matches!(err, TranscoderError::Spawn { .. }));
        assert!(err.to_string().contains("/nonexistent/bin/ffmpeg"));
    }

    #[cfg(unix)]
    mod fake_tool {
        use super::*;
        use std::os::unix::fs::PermissionsExt;
        use tempfile::TempDir;

        fn write_script(dir: &TempDir, body: &str) -> PathBuf {
            let path = dir.path().join("fake-ffmpeg");
            std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        #[tokio::test]
        async fn test_transcode_captures_stderr_and_exit_code() {
            let dir = TempDir::new().unwrap();
            let script = write_script(&dir, "echo 'unsupported codec' >&2\nexit 1");

            let out = transcoder(script)
                .transcode(Path::new("b.m4a"), Path::new("b.mp3"))
                .await
                .unwrap();

            assert_eq!(out.exit_code, Some(1));
            assert_eq!(out.stderr.trim(), "unsupported codec");
            assert!(!out.success());
        }

        #[tokio::test]
        async fn test_transcode_passes_output_path_last() {
            let dir = TempDir::new().unwrap();
            // Create whatever file is named by the final argument
            let script = write_script(&dir, "for last; do :; done\necho converted > \"$last\"");
            let target = dir.path().join("out.mp3");

            let out = transcoder(script)
                .transcode(&dir.path().join("in.m4a"), &target)
                .await
                .unwrap();

            assert!(out.success());
            assert!(target.exists());
        }
    }
}
