//! Types for the encoder module.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Extension (without the dot) of every file the run produces.
pub const TARGET_EXTENSION: &str = "webp";

/// Quality passed to ImageMagick (0-100).
pub const MAGICK_QUALITY: u8 = 90;

/// Quality passed to ffmpeg's libwebp encoder (0-100).
pub const FFMPEG_QUALITY: u8 = 80;

/// External programs able to produce WebP output.
///
/// Variants are declared in probe priority order: the platform-native tool
/// first, then the generic ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncoderBackend {
    /// macOS scriptable image processing system.
    Sips,
    /// ImageMagick 7 (`magick`).
    #[serde(rename = "imagemagick")]
    ImageMagick,
    /// FFmpeg with libwebp.
    Ffmpeg,
}

impl EncoderBackend {
    /// All backends in probe priority order.
    pub const PRIORITY: [EncoderBackend; 3] = [
        EncoderBackend::Sips,
        EncoderBackend::ImageMagick,
        EncoderBackend::Ffmpeg,
    ];

    /// Stable identifier, used in logs, metrics labels and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            EncoderBackend::Sips => "sips",
            EncoderBackend::ImageMagick => "imagemagick",
            EncoderBackend::Ffmpeg => "ffmpeg",
        }
    }

    /// Arguments for the presence check. The probe must exit successfully.
    pub fn probe_args(&self) -> &'static [&'static str] {
        match self {
            EncoderBackend::Sips => &["--help"],
            EncoderBackend::ImageMagick => &["-version"],
            EncoderBackend::Ffmpeg => &["-version"],
        }
    }

    /// Builds the command-line arguments that convert `input` into `output`.
    pub fn encode_args(&self, input: &Path, output: &Path) -> Vec<String> {
        let input = input.to_string_lossy().to_string();
        let output = output.to_string_lossy().to_string();

        match self {
            EncoderBackend::Sips => vec![
                "-s".to_string(),
                "format".to_string(),
                TARGET_EXTENSION.to_string(),
                input,
                "--out".to_string(),
                output,
            ],
            EncoderBackend::ImageMagick => vec![
                input,
                "-quality".to_string(),
                MAGICK_QUALITY.to_string(),
                output,
            ],
            EncoderBackend::Ffmpeg => vec![
                "-y".to_string(), // Overwrite output without prompting
                "-hide_banner".to_string(),
                "-loglevel".to_string(),
                "error".to_string(),
                "-i".to_string(),
                input,
                "-quality".to_string(),
                FFMPEG_QUALITY.to_string(),
                output,
            ],
        }
    }
}

impl fmt::Display for EncoderBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single file conversion handed to an encoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodeJob {
    /// Source image.
    pub input_path: PathBuf,
    /// Destination file; its parent directory already exists.
    pub output_path: PathBuf,
}

impl EncodeJob {
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
        }
    }
}
