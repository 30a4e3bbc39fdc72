use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - At least one conversion may run
/// - Encoder timeout is not 0
/// - Output directory name is a single, non-empty path component
/// - The preferred backend is not also disabled
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.conversion.max_parallel_conversions == 0 {
        return Err(ConfigError::ValidationError(
            "conversion.max_parallel_conversions cannot be 0".to_string(),
        ));
    }

    if config.encoder.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "encoder.timeout_secs cannot be 0".to_string(),
        ));
    }

    let name = config.conversion.output_dir_name.as_str();
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(ConfigError::ValidationError(format!(
            "conversion.output_dir_name must be a plain directory name, got {:?}",
            name
        )));
    }

    if let Some(preferred) = config.encoder.preferred {
        if config.encoder.disabled.contains(&preferred) {
            return Err(ConfigError::ValidationError(format!(
                "encoder.preferred ({}) is also listed in encoder.disabled",
                preferred
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::EncoderBackend;

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_zero_parallel_fails() {
        let mut config = Config::default();
        config.conversion.max_parallel_conversions = 0;
        let result = validate_config(&config);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_validate_zero_timeout_fails() {
        let mut config = Config::default();
        config.encoder.timeout_secs = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_output_dir_name() {
        for bad in ["", ".", "..", "a/b", "a\\b"] {
            let mut config = Config::default();
            config.conversion.output_dir_name = bad.to_string();
            assert!(validate_config(&config).is_err(), "{bad:?} should be rejected");
        }

        let mut config = Config::default();
        config.conversion.output_dir_name = "webp-out".to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_preferred_disabled_conflict() {
        let mut config = Config::default();
        config.encoder.preferred = Some(EncoderBackend::Ffmpeg);
        config.encoder.disabled = vec![EncoderBackend::Ffmpeg];

        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("ffmpeg"));
    }
}
