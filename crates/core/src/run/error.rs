//! Errors that stop a run before any file is converted.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;

/// Fatal setup errors. Per-file problems never end up here.
#[derive(Debug, Error)]
pub enum RunError {
    /// No input directory was given.
    #[error("No input directory given")]
    MissingInput,

    /// Input path does not exist or cannot be inspected.
    #[error("Input directory not found: {path}")]
    InputNotFound { path: PathBuf },

    /// Input path exists but is not a directory.
    #[error("Input path must be a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// None of the encoder backends is installed.
    #[error("No encoder available (tried: {tried})")]
    NoEncoderAvailable { tried: String },

    /// Output directory could not be created.
    #[error("Failed to create output directory {path}: {source}")]
    OutputDirectoryFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(RunError::MissingInput.to_string(), "No input directory given");
        assert_eq!(
            RunError::NotADirectory {
                path: PathBuf::from("/a/file.png")
            }
            .to_string(),
            "Input path must be a directory: /a/file.png"
        );
        assert_eq!(
            RunError::NoEncoderAvailable {
                tried: "sips, ffmpeg".to_string()
            }
            .to_string(),
            "No encoder available (tried: sips, ffmpeg)"
        );
    }

    #[test]
    fn test_config_error_is_transparent() {
        let err: RunError = ConfigError::ValidationError("bad".to_string()).into();
        assert_eq!(err.to_string(), "Configuration validation failed: bad");
    }
}
