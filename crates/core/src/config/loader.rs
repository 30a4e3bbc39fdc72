use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Prefix of environment variables that override configuration values.
///
/// Nested keys are separated by a double underscore, e.g.
/// `WEBPBATCH_ENCODER__FFMPEG_PATH=/opt/ffmpeg/bin/ffmpeg`.
pub const ENV_PREFIX: &str = "WEBPBATCH_";

/// Load configuration from defaults, an optional TOML file, and environment
/// variable overrides, in that order.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    if let Some(path) = path {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }
        figment = figment.merge(Toml::file(path));
    }

    let config: Config = figment
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::EncoderBackend;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_from_str_valid() {
        let toml = r#"
[conversion]
max_parallel_conversions = 4
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.conversion.max_parallel_conversions, 4);
    }

    #[test]
    fn test_load_config_from_str_wrong_type() {
        let toml = r#"
[conversion]
max_parallel_conversions = "many"
"#;
        let result = load_config_from_str(toml);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Some(Path::new("/nonexistent/webpbatch.toml")));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[encoder]
magick_path = "/opt/im/bin/magick"
disabled = ["sips"]

[conversion]
output_dir_name = "webp"
"#
        )
        .unwrap();

        let config = load_config(Some(temp_file.path())).unwrap();
        assert_eq!(
            config.encoder.magick_path,
            PathBuf::from("/opt/im/bin/magick")
        );
        assert_eq!(config.encoder.disabled, vec![EncoderBackend::Sips]);
        assert_eq!(config.conversion.output_dir_name, "webp");
        // Untouched sections keep their defaults.
        assert_eq!(config.encoder.timeout_secs, 300);
        assert_eq!(config.conversion.max_parallel_conversions, 1);
    }
}
