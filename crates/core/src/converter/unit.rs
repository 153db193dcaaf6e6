//! Per-file skip-or-convert decision.

use std::path::Path;

use super::traits::Transcoder;
use super::types::{ConversionOutcome, ConversionStatus, SkipReason, ToolOutput};

/// Converts one source file unless its target already exists.
///
/// Never returns an error: spawn failures and non-zero exits are classified
/// as `Failed`. The tool is invoked at most once.
pub async fn convert_file<T: Transcoder + ?Sized>(
    transcoder: &T,
    source: &Path,
    target: &Path,
) -> ConversionOutcome {
    if target.exists() {
        tracing::debug!(target = %target.display(), "Target exists, skipping");
        return ConversionOutcome::new(
            source,
            target,
            ConversionStatus::Skipped(SkipReason::TargetExists),
        );
    }

    let status = match transcoder.transcode(source, target).await {
        Ok(output) => classify(transcoder.name(), &output),
        Err(e) => {
            tracing::warn!(source = %source.display(), error = %e, "Transcoder did not start");
            ConversionStatus::Failed(e.to_string())
        }
    };

    match &status {
        ConversionStatus::Converted => {
            tracing::debug!(source = %source.display(), target = %target.display(), "Converted")
        }
        ConversionStatus::Failed(error) => {
            tracing::warn!(source = %source.display(), %error, "Conversion failed")
        }
        ConversionStatus::Skipped(_) => {}
    }

    ConversionOutcome::new(source, target, status)
}

/// Maps a finished tool run to an outcome status.
fn classify(tool: &str, output: &ToolOutput) -> ConversionStatus {
    if output.success() {
        return ConversionStatus::Converted;
    }

    let stderr = output.stderr.trim();
    if !stderr.is_empty() {
        return ConversionStatus::Failed(stderr.to_string());
    }

    match output.exit_code {
        Some(code) => ConversionStatus::Failed(format!("{tool} exited with code {code}")),
        None => ConversionStatus::Failed(format!("{tool} terminated by signal")),
    }
}
