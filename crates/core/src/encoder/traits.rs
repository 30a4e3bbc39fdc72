//! Trait definitions for the encoder module.

use async_trait::async_trait;

use super::error::EncoderError;
use super::types::EncodeJob;

/// Something that turns one source image into one WebP file.
#[async_trait]
pub trait Encoder: Send + Sync {
    /// Returns the name of this encoder, used in logs, metrics and reports.
    fn name(&self) -> &str;

    /// Encodes `job.input_path` into `job.output_path`.
    ///
    /// The destination's parent directory exists when this is called.
    async fn encode(&self, job: &EncodeJob) -> Result<(), EncoderError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    struct NoopEncoder;

    #[async_trait]
    impl Encoder for NoopEncoder {
        fn name(&self) -> &str {
            "noop"
        }

        async fn encode(&self, _job: &EncodeJob) -> Result<(), EncoderError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_encoder_is_object_safe() {
        let encoder: Arc<dyn Encoder> = Arc::new(NoopEncoder);
        assert_eq!(encoder.name(), "noop");
        let job = EncodeJob::new("/in/a.png", "/out/a.webp");
        assert!(encoder.encode(&job).await.is_ok());
    }
}
