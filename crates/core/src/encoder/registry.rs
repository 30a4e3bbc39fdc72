//! Encoder backend detection.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

use super::config::EncoderConfig;
use super::types::EncoderBackend;

/// Availability of each encoder backend on this host.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EncoderCapabilities {
    /// Backends whose presence check succeeded, in probe order.
    pub available: Vec<EncoderBackend>,
}

impl EncoderCapabilities {
    /// Probes every enabled backend in probe order.
    pub async fn detect(config: &EncoderConfig) -> Self {
        let mut available = Vec::new();
        for backend in config.probe_order() {
            if probe(config.binary_path(backend), backend).await {
                available.push(backend);
            }
        }
        Self { available }
    }

    /// The highest-priority available backend.
    pub fn best(&self) -> Option<EncoderBackend> {
        self.available.first().copied()
    }

    /// Check if a backend is available.
    pub fn has(&self, backend: EncoderBackend) -> bool {
        self.available.contains(&backend)
    }
}

/// Picks the encoder for this run.
///
/// Backends are probed in priority order and probing stops at the first one
/// that is present. Returns `None` when no backend is available.
pub async fn resolve_encoder(config: &EncoderConfig) -> Option<EncoderBackend> {
    for backend in config.probe_order() {
        if probe(config.binary_path(backend), backend).await {
            info!(backend = %backend, "Selected encoder backend");
            return Some(backend);
        }
    }
    info!("No encoder backend available");
    None
}

/// Runs the presence check for one backend.
async fn probe(binary: &Path, backend: EncoderBackend) -> bool {
    let status = Command::new(binary)
        .args(backend.probe_args())
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .status()
        .await;

    match status {
        Ok(s) if s.success() => {
            debug!(backend = %backend, binary = %binary.display(), "Encoder probe succeeded");
            true
        }
        Ok(s) => {
            debug!(backend = %backend, binary = %binary.display(), code = ?s.code(), "Encoder probe failed");
            false
        }
        Err(e) => {
            debug!(backend = %backend, binary = %binary.display(), error = %e, "Encoder not runnable");
            false
        }
    }
}
