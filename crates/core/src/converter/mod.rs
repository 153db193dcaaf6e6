//! Converter module: locating the transcoding tool and converting single files.
//!
//! The external tool sits behind the [`Transcoder`] trait so the per-file
//! decision logic in [`convert_file`] can run against a test double.
//!
//! # Example
//!
//! ```ignore
//! use recast_core::config::Config;
//! use recast_core::converter::{convert_file, target_path_for, FfmpegTranscoder, ToolLocator};
//!
//! let config = Config::default();
//! let tool = ToolLocator::new(&config.tool).locate().expect("ffmpeg installed");
//! let transcoder = FfmpegTranscoder::new(tool.path, &config.conversion);
//!
//! let source = Path::new("data/train/clip.m4a");
//! let target = target_path_for(source, "mp3");
//! let outcome = convert_file(&transcoder, source, &target).await;
//! println!("{}: {}", outcome.source, outcome.status);
//! ```

mod error;
mod ffmpeg;
mod locator;
mod traits;
mod types;
mod unit;

pub use error::TranscoderError;
pub use ffmpeg::FfmpegTranscoder;
pub use locator::{ResolvedTool, ToolLocator, ToolSource};
pub use traits::Transcoder;
pub use types::{
    target_path_for, ConversionOutcome, ConversionStatus, OutcomeRow, SkipReason, ToolOutput,
};
pub use unit::convert_file;
