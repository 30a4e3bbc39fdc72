//! Error types for the encoder module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while converting a single file.
#[derive(Debug, Error)]
pub enum EncoderError {
    /// Encoder binary could not be spawned because it does not exist.
    #[error("Encoder not found at path: {path}")]
    EncoderNotFound { path: PathBuf },

    /// Destination directory does not exist and could not be created.
    #[error("Failed to create output directory {path}: {source}")]
    OutputDirectoryFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source file is not below the input root.
    #[error("Source {path} is outside the input directory")]
    OutsideInputRoot { path: PathBuf },

    /// Encoder process exited unsuccessfully.
    #[error("{}", describe_failure(.reason, .stderr))]
    EncodeFailed {
        reason: String,
        stderr: Option<String>,
    },

    /// Encoder process did not finish in time.
    #[error("Encoder timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// I/O error while running the encoder.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn describe_failure(reason: &str, stderr: &Option<String>) -> String {
    match stderr {
        Some(stderr) => format!("{}: {}", reason, stderr),
        None => reason.to_string(),
    }
}

impl EncoderError {
    /// Creates an encode failed error with captured stderr.
    pub fn failed(reason: impl Into<String>, stderr: Option<String>) -> Self {
        Self::EncodeFailed {
            reason: reason.into(),
            stderr,
        }
    }

    /// Whether the encoder was killed for exceeding its time budget.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_message_includes_stderr() {
        let err = EncoderError::failed("exited with code 1", Some("bad header".to_string()));
        assert_eq!(err.to_string(), "exited with code 1: bad header");
    }

    #[test]
    fn test_failed_message_without_stderr() {
        let err = EncoderError::failed("exited with code 1", None);
        assert_eq!(err.to_string(), "exited with code 1");
    }

    #[test]
    fn test_is_timeout() {
        assert!(EncoderError::Timeout { timeout_secs: 5 }.is_timeout());
        assert!(!EncoderError::failed("x", None).is_timeout());
    }
}
