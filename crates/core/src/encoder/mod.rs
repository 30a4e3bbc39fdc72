//! Encoder module for turning source images into WebP files.
//!
//! Encoding itself is delegated to an external program. This module decides
//! which program to use and how to invoke it:
//!
//! - `sips` (macOS native tool, fixed target format, no quality setting)
//! - ImageMagick `magick` (quality 90)
//! - `ffmpeg` with libwebp (quality 80, forced overwrite)
//!
//! The backend is resolved once per run, in that priority order.
//!
//! # Example
//!
//! ```ignore
//! use webpbatch_core::encoder::{resolve_encoder, CommandEncoder, EncodeJob, Encoder, EncoderConfig};
//!
//! let config = EncoderConfig::default();
//! let backend = resolve_encoder(&config).await.expect("no encoder installed");
//! let encoder = CommandEncoder::new(backend, &config);
//!
//! encoder.encode(&EncodeJob::new("/photos/a.png", "/photos/webp_converties/a.webp")).await?;
//! ```

mod command;
mod config;
mod error;
mod registry;
mod traits;
mod types;

pub use command::CommandEncoder;
pub use config::EncoderConfig;
pub use error::EncoderError;
pub use registry::{resolve_encoder, EncoderCapabilities};
pub use traits::Encoder;
pub use types::{EncodeJob, EncoderBackend, FFMPEG_QUALITY, MAGICK_QUALITY, TARGET_EXTENSION};
