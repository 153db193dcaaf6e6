//! Mock transcoder for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::converter::{ToolOutput, Transcoder, TranscoderError};

/// A recorded transcoder invocation for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedInvocation {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Canned behavior for one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedResult {
    /// The tool exits with this code and stderr.
    Exit { code: i32, stderr: String },
    /// The tool is killed without an exit code.
    Signal,
    /// The tool cannot be started at all.
    SpawnError(String),
}

impl ScriptedResult {
    pub fn exit(code: i32, stderr: impl Into<String>) -> Self {
        Self::Exit {
            code,
            stderr: stderr.into(),
        }
    }

    pub fn spawn_error(message: impl Into<String>) -> Self {
        Self::SpawnError(message.into())
    }
}

/// Mock implementation of the Transcoder trait.
///
/// Provides controllable behavior for testing:
/// - Track invocations for assertions
/// - Script exit codes, stderr and spawn failures per source file name
/// - Create the target file on success, like a real tool would
///
/// Files without a script exit 0.
///
/// # Example
///
/// ```rust,ignore
/// use recast_core::testing::{MockTranscoder, ScriptedResult};
///
/// let transcoder = MockTranscoder::new();
/// transcoder.script("b.m4a", ScriptedResult::exit(1, "unsupported codec")).await;
///
/// let outcome = convert_file(&transcoder, &source, &target).await;
/// assert_eq!(transcoder.invocation_count().await, 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockTranscoder {
    /// Recorded invocations, in call order.
    invocations: Arc<RwLock<Vec<RecordedInvocation>>>,
    /// Scripted results keyed by source file name.
    scripts: Arc<RwLock<HashMap<String, ScriptedResult>>>,
    /// Whether a successful run writes the target file.
    create_targets: Arc<RwLock<bool>>,
}

impl Default for MockTranscoder {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTranscoder {
    /// Create a new mock transcoder where every file converts successfully.
    pub fn new() -> Self {
        Self {
            invocations: Arc::new(RwLock::new(Vec::new())),
            scripts: Arc::new(RwLock::new(HashMap::new())),
            create_targets: Arc::new(RwLock::new(true)),
        }
    }

    /// Script the result for every source whose file name is `file_name`.
    pub async fn script(&self, file_name: impl Into<String>, result: ScriptedResult) {
        self.scripts.write().await.insert(file_name.into(), result);
    }

    /// Remove all scripted results.
    pub async fn clear_scripts(&self) {
        self.scripts.write().await.clear();
    }

    /// Enable or disable writing the target file on success.
    pub async fn set_create_targets(&self, create: bool) {
        *self.create_targets.write().await = create;
    }

    /// Get all recorded invocations.
    pub async fn recorded_invocations(&self) -> Vec<RecordedInvocation> {
        self.invocations.read().await.clone()
    }

    /// Get the number of invocations performed.
    pub async fn invocation_count(&self) -> usize {
        self.invocations.read().await.len()
    }
}

#[async_trait]
impl Transcoder for MockTranscoder {
    fn name(&self) -> &str {
        "mock"
    }

    async fn transcode(&self, input: &Path, output: &Path) -> Result<ToolOutput, TranscoderError> {
        self.invocations.write().await.push(RecordedInvocation {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
        });

        let file_name = input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let scripted = self.scripts.read().await.get(&file_name).cloned();

        match scripted {
            None => {
                if *self.create_targets.read().await {
                    tokio::fs::write(output, b"mock transcode output").await?;
                }
                Ok(ToolOutput {
                    exit_code: Some(0),
                    ..Default::default()
                })
            }
            Some(ScriptedResult::Exit { code, stderr }) => {
                if code == 0 && *self.create_targets.read().await {
                    tokio::fs::write(output, b"mock transcode output").await?;
                }
                Ok(ToolOutput {
                    exit_code: Some(code),
                    stdout: String::new(),
                    stderr,
                })
            }
            Some(ScriptedResult::Signal) => Ok(ToolOutput::default()),
            Some(ScriptedResult::SpawnError(message)) => Err(TranscoderError::spawn(
                "mock",
                std::io::Error::new(std::io::ErrorKind::NotFound, message),
            )),
        }
    }
}
