use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Source and target extensions are non-empty, dot-less and distinct
/// - Codec, quality and tool program are non-empty
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let conversion = &config.conversion;

    for (key, ext) in [
        ("conversion.source_extension", &conversion.source_extension),
        ("conversion.target_extension", &conversion.target_extension),
    ] {
        if ext.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "{key} cannot be empty"
            )));
        }
        if ext.starts_with('.') {
            return Err(ConfigError::ValidationError(format!(
                "{key} must not start with '.' (got {ext:?})"
            )));
        }
    }

    if conversion.source_extension == conversion.target_extension {
        return Err(ConfigError::ValidationError(
            "conversion.source_extension and conversion.target_extension must differ".to_string(),
        ));
    }

    if conversion.audio_codec.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "conversion.audio_codec cannot be empty".to_string(),
        ));
    }

    if conversion.quality.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "conversion.quality cannot be empty".to_string(),
        ));
    }

    if config.tool.program.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "tool.program cannot be empty".to_string(),
        ));
    }

    Ok(())
}
