//! Trait definitions for the converter module.

use async_trait::async_trait;
use std::path::Path;

use super::error::TranscoderError;
use super::types::ToolOutput;

/// The external transcoding capability: one input path, one output path.
///
/// Implementations must capture the tool's output instead of inheriting the
/// caller's terminal, and must report a non-zero exit through `ToolOutput`
/// rather than an error.
#[async_trait]
pub trait Transcoder: Send + Sync {
    /// Short tool name used in synthesized failure messages.
    fn name(&self) -> &str;

    /// Runs the tool once for `input` -> `output`, blocking until it exits.
    async fn transcode(&self, input: &Path, output: &Path) -> Result<ToolOutput, TranscoderError>;
}
