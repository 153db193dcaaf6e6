pub mod config;
pub mod converter;
pub mod orchestrator;
pub mod report;
pub mod testing;

pub use config::{
    load_config, load_config_from_env, load_config_from_str, validate_config, Config,
    ConfigError,
};
pub use converter::{
    convert_file, target_path_for, ConversionOutcome, ConversionStatus, FfmpegTranscoder,
    ResolvedTool, SkipReason, ToolLocator, ToolOutput, ToolSource, Transcoder, TranscoderError,
};
pub use orchestrator::{
    run_pipeline, run_with_transcoder, BatchRunner, PipelineError, RunOutcome, RunRecord,
    RunStatus, RunTotals, EXIT_PRECONDITION_FAILED,
};
pub use report::{HistoryStore, ReportError, ReportWriter, SnapshotWriter};
