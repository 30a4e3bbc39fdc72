//! Configuration for the encoder module.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::types::EncoderBackend;

/// Where to find the encoder binaries and how long each one may run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EncoderConfig {
    /// Path to the sips binary.
    #[serde(default = "default_sips_path")]
    pub sips_path: PathBuf,

    /// Path to the ImageMagick binary.
    #[serde(default = "default_magick_path")]
    pub magick_path: PathBuf,

    /// Path to the ffmpeg binary.
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: PathBuf,

    /// Backends that are never probed.
    #[serde(default)]
    pub disabled: Vec<EncoderBackend>,

    /// Backend probed before all others.
    #[serde(default)]
    pub preferred: Option<EncoderBackend>,

    /// Timeout for a single encoder invocation in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_sips_path() -> PathBuf {
    PathBuf::from("sips")
}

fn default_magick_path() -> PathBuf {
    PathBuf::from("magick")
}

fn default_ffmpeg_path() -> PathBuf {
    PathBuf::from("ffmpeg")
}

fn default_timeout() -> u64 {
    300 // 5 minutes
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            sips_path: default_sips_path(),
            magick_path: default_magick_path(),
            ffmpeg_path: default_ffmpeg_path(),
            disabled: Vec::new(),
            preferred: None,
            timeout_secs: default_timeout(),
        }
    }
}

impl EncoderConfig {
    /// Returns the configured binary for a backend.
    pub fn binary_path(&self, backend: EncoderBackend) -> &Path {
        match backend {
            EncoderBackend::Sips => &self.sips_path,
            EncoderBackend::ImageMagick => &self.magick_path,
            EncoderBackend::Ffmpeg => &self.ffmpeg_path,
        }
    }

    /// Backends to probe, preferred first, disabled ones removed.
    pub fn probe_order(&self) -> Vec<EncoderBackend> {
        let mut order: Vec<EncoderBackend> = Vec::with_capacity(EncoderBackend::PRIORITY.len());
        if let Some(preferred) = self.preferred {
            order.push(preferred);
        }
        for backend in EncoderBackend::PRIORITY {
            if !order.contains(&backend) {
                order.push(backend);
            }
        }
        order.retain(|b| !self.disabled.contains(b));
        order
    }

    /// Sets the binary for a backend.
    pub fn with_binary(mut self, backend: EncoderBackend, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match backend {
            EncoderBackend::Sips => self.sips_path = path,
            EncoderBackend::ImageMagick => self.magick_path = path,
            EncoderBackend::Ffmpeg => self.ffmpeg_path = path,
        }
        self
    }

    /// Sets the timeout in seconds.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Disables a backend.
    pub fn with_disabled(mut self, backend: EncoderBackend) -> Self {
        if !self.disabled.contains(&backend) {
            self.disabled.push(backend);
        }
        self
    }

    /// Sets the preferred backend.
    pub fn with_preferred(mut self, backend: EncoderBackend) -> Self {
        self.preferred = Some(backend);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EncoderConfig::default();
        assert_eq!(config.sips_path, PathBuf::from("sips"));
        assert_eq!(config.magick_path, PathBuf::from("magick"));
        assert_eq!(config.ffmpeg_path, PathBuf::from("ffmpeg"));
        assert_eq!(config.timeout_secs, 300);
        assert!(config.disabled.is_empty());
        assert!(config.preferred.is_none());
    }

    #[test]
    fn test_default_probe_order() {
        let config = EncoderConfig::default();
        assert_eq!(config.probe_order(), EncoderBackend::PRIORITY.to_vec());
    }

    #[test]
    fn test_probe_order_with_preferred_and_disabled() {
        let config = EncoderConfig::default()
            .with_preferred(EncoderBackend::Ffmpeg)
            .with_disabled(EncoderBackend::Sips);
        assert_eq!(
            config.probe_order(),
            vec![EncoderBackend::Ffmpeg, EncoderBackend::ImageMagick]
        );
    }

    #[test]
    fn test_config_builder() {
        let config = EncoderConfig::default()
            .with_binary(EncoderBackend::Ffmpeg, "/opt/bin/ffmpeg")
            .with_timeout(30);

        assert_eq!(
            config.binary_path(EncoderBackend::Ffmpeg),
            Path::new("/opt/bin/ffmpeg")
        );
        assert_eq!(config.binary_path(EncoderBackend::Sips), Path::new("sips"));
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_config_serialization() {
        let config = EncoderConfig::default().with_disabled(EncoderBackend::ImageMagick);
        let json = serde_json::to_string(&config).unwrap();
        let parsed: EncoderConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
