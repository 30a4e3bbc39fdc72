//! Encoder implementation backed by an external process.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tokio::time::{timeout, Duration};
use tracing::debug;

use super::config::EncoderConfig;
use super::error::EncoderError;
use super::traits::Encoder;
use super::types::{EncodeJob, EncoderBackend};

/// Runs one of the supported encoder binaries per file.
#[derive(Debug, Clone)]
pub struct CommandEncoder {
    backend: EncoderBackend,
    binary: PathBuf,
    timeout_secs: u64,
}

impl CommandEncoder {
    /// Creates an encoder for `backend` using the binary path from `config`.
    pub fn new(backend: EncoderBackend, config: &EncoderConfig) -> Self {
        Self {
            backend,
            binary: config.binary_path(backend).to_path_buf(),
            timeout_secs: config.timeout_secs,
        }
    }

    /// Returns the backend this encoder drives.
    pub fn backend(&self) -> EncoderBackend {
        self.backend
    }

    /// Returns the binary this encoder spawns.
    pub fn binary(&self) -> &Path {
        &self.binary
    }
}

#[async_trait]
impl Encoder for CommandEncoder {
    fn name(&self) -> &str {
        self.backend.as_str()
    }

    async fn encode(&self, job: &EncodeJob) -> Result<(), EncoderError> {
        let args = self.backend.encode_args(&job.input_path, &job.output_path);
        debug!(binary = %self.binary.display(), ?args, "Spawning encoder");

        let child = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    EncoderError::EncoderNotFound {
                        path: self.binary.clone(),
                    }
                } else {
                    EncoderError::Io(e)
                }
            })?;

        // Dropping the pending future on timeout drops the child, which kills it.
        let output = timeout(
            Duration::from_secs(self.timeout_secs),
            child.wait_with_output(),
        )
        .await
        .map_err(|_| EncoderError::Timeout {
            timeout_secs: self.timeout_secs,
        })??;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let reason = match output.status.code() {
                Some(code) => format!("{} exited with code {}", self.backend, code),
                None => format!("{} was terminated by a signal", self.backend),
            };
            return Err(EncoderError::failed(
                reason,
                if stderr.is_empty() { None } else { Some(stderr) },
            ));
        }

        Ok(())
    }
}
