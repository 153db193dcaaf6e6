use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub conversion: ConversionConfig,
    #[serde(default)]
    pub tool: ToolConfig,
}

/// Input root and report locations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PathsConfig {
    /// Directory searched recursively for source files
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,
    /// Append-only JSON run history
    #[serde(default = "default_history_json")]
    pub history_json: PathBuf,
    /// CSV snapshot of the latest run
    #[serde(default = "default_snapshot_csv")]
    pub snapshot_csv: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            history_json: default_history_json(),
            snapshot_csv: default_snapshot_csv(),
        }
    }
}

fn default_input_dir() -> PathBuf {
    PathBuf::from("data/train")
}

fn default_history_json() -> PathBuf {
    PathBuf::from("data/train/conversion_report.json")
}

fn default_snapshot_csv() -> PathBuf {
    PathBuf::from("data/train/last_conversion_report.csv")
}

/// Source/target formats and the values plugged into the ffmpeg argument template
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConversionConfig {
    /// Extension of the files to discover, without the leading dot
    #[serde(default = "default_source_extension")]
    pub source_extension: String,
    /// Extension of the produced files, without the leading dot
    #[serde(default = "default_target_extension")]
    pub target_extension: String,
    /// Value passed to `-codec:a`
    #[serde(default = "default_audio_codec")]
    pub audio_codec: String,
    /// Value passed to `-q:a`; numbers are accepted and kept as text
    #[serde(default = "default_quality", deserialize_with = "string_or_number")]
    pub quality: String,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            source_extension: default_source_extension(),
            target_extension: default_target_extension(),
            audio_codec: default_audio_codec(),
            quality: default_quality(),
        }
    }
}

fn default_source_extension() -> String {
    "m4a".to_string()
}

fn default_target_extension() -> String {
    "mp3".to_string()
}

fn default_audio_codec() -> String {
    "libmp3lame".to_string()
}

fn default_quality() -> String {
    "2".to_string()
}

/// Env values like `4` and unquoted TOML numbers arrive as numbers
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Int(i64),
        Float(f64),
    }

    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => s,
        StringOrNumber::Int(n) => n.to_string(),
        StringOrNumber::Float(n) => n.to_string(),
    })
}

/// Where to look for the transcoding executable
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToolConfig {
    /// Environment variable holding an explicit path to the executable
    #[serde(default = "default_override_env")]
    pub override_env: String,
    /// Executable name looked up on `PATH`
    #[serde(default = "default_program")]
    pub program: String,
    /// Checked in order when neither the override nor `PATH` resolves
    #[serde(default = "default_fallback_paths")]
    pub fallback_paths: Vec<PathBuf>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            override_env: default_override_env(),
            program: default_program(),
            fallback_paths: default_fallback_paths(),
        }
    }
}

fn default_override_env() -> String {
    "FFMPEG_BINARY".to_string()
}

fn default_program() -> String {
    "ffmpeg".to_string()
}

fn default_fallback_paths() -> Vec<PathBuf> {
    vec![
        PathBuf::from("/opt/homebrew/bin/ffmpeg"),
        PathBuf::from("/usr/local/bin/ffmpeg"),
    ]
}
