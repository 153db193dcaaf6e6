//! End-to-end run: preconditions, conversion, report persistence.

use tracing::info;

use crate::config::Config;
use crate::converter::{FfmpegTranscoder, ToolLocator, Transcoder};
use crate::report::ReportWriter;

use super::runner::{ensure_input_dir, BatchRunner};
use super::types::{PipelineError, RunOutcome};

/// Runs the whole pipeline once with the real ffmpeg transcoder.
///
/// The input root is checked first, then the tool is resolved; either
/// failing returns before any file is touched or any report is written.
pub async fn run_pipeline(config: &Config) -> Result<RunOutcome, PipelineError> {
    ensure_input_dir(&config.paths.input_dir)?;

    let locator = ToolLocator::new(&config.tool);
    let tool = locator
        .locate()
        .ok_or_else(|| PipelineError::tool_not_found(&locator))?;
    info!("Using {} at {} ({:?})", locator.program(), tool.path.display(), tool.source);

    let transcoder = FfmpegTranscoder::new(tool.path.clone(), &config.conversion);
    let mut outcome = run_with_transcoder(config, transcoder).await?;
    outcome.tool_path = Some(tool.path);
    Ok(outcome)
}

/// Runs the pipeline with an already-resolved transcoder.
pub async fn run_with_transcoder<T: Transcoder>(
    config: &Config,
    transcoder: T,
) -> Result<RunOutcome, PipelineError> {
    let runner = BatchRunner::new(transcoder, &config.conversion);
    let record = runner.run(&config.paths.input_dir).await?;

    let writer = ReportWriter::new(&config.paths.history_json, &config.paths.snapshot_csv);
    writer.write(&record)?;

    Ok(RunOutcome {
        record,
        tool_path: None,
        history_path: writer.history_path().to_path_buf(),
        snapshot_path: writer.snapshot_path().to_path_buf(),
    })
}
