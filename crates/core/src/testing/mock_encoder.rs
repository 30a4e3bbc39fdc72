//! Mock encoder for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::encoder::{EncodeJob, Encoder, EncoderError};

/// Bytes written to every destination the mock "encodes".
pub const MOCK_OUTPUT: &[u8] = b"RIFF\0\0\0\0WEBPmock";

/// A recorded encode call for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedEncode {
    /// The job that was submitted.
    pub job: EncodeJob,
    /// Whether the encode succeeded.
    pub success: bool,
}

/// Mock implementation of the Encoder trait.
///
/// Provides controllable behavior for testing:
/// - Track encode jobs for assertions
/// - Fail for specific source paths
/// - Simulate slow encodes, globally or per path
/// - Report the peak number of concurrent encodes
///
/// Successful encodes write [`MOCK_OUTPUT`] to the destination, so tests can
/// assert on the output tree.
///
/// # Example
///
/// ```rust,ignore
/// use webpbatch_core::testing::MockEncoder;
///
/// let encoder = MockEncoder::new();
/// encoder.fail_for("/photos/broken.png", "not an image").await;
///
/// let report = convert_all(files, input, output, Arc::new(encoder.clone())).await;
/// assert_eq!(encoder.encode_count().await, files_len);
/// ```
#[derive(Debug, Clone)]
pub struct MockEncoder {
    /// Recorded encodes.
    encodes: Arc<RwLock<Vec<RecordedEncode>>>,
    /// Error messages by source path.
    failures: Arc<RwLock<HashMap<PathBuf, String>>>,
    /// Simulated encode duration for every file.
    delay: Arc<RwLock<Duration>>,
    /// Simulated encode duration overrides by source path.
    delays: Arc<RwLock<HashMap<PathBuf, Duration>>>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl Default for MockEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEncoder {
    /// Create a new mock encoder that succeeds for every file.
    pub fn new() -> Self {
        Self {
            encodes: Arc::new(RwLock::new(Vec::new())),
            failures: Arc::new(RwLock::new(HashMap::new())),
            delay: Arc::new(RwLock::new(Duration::ZERO)),
            delays: Arc::new(RwLock::new(HashMap::new())),
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Make encodes of `source` fail with `message`.
    pub async fn fail_for(&self, source: impl AsRef<Path>, message: &str) {
        self.failures
            .write()
            .await
            .insert(source.as_ref().to_path_buf(), message.to_string());
    }

    /// Set the simulated duration of every encode.
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = delay;
    }

    /// Set the simulated duration of encoding `source`.
    pub async fn set_delay_for(&self, source: impl AsRef<Path>, delay: Duration) {
        self.delays
            .write()
            .await
            .insert(source.as_ref().to_path_buf(), delay);
    }

    /// Get all recorded encodes, in call order.
    pub async fn recorded_encodes(&self) -> Vec<RecordedEncode> {
        self.encodes.read().await.clone()
    }

    /// Get the number of encodes performed.
    pub async fn encode_count(&self) -> usize {
        self.encodes.read().await.len()
    }

    /// Highest number of encodes that were running at the same time.
    pub async fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn delay_for(&self, source: &Path) -> Duration {
        match self.delays.read().await.get(source) {
            Some(delay) => *delay,
            None => *self.delay.read().await,
        }
    }

    async fn run(&self, job: &EncodeJob) -> Result<(), EncoderError> {
        let delay = self.delay_for(&job.input_path).await;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        if let Some(message) = self.failures.read().await.get(&job.input_path) {
            return Err(EncoderError::failed(
                "mock exited with code 1",
                Some(message.clone()),
            ));
        }

        tokio::fs::write(&job.output_path, MOCK_OUTPUT).await?;
        Ok(())
    }
}

#[async_trait]
impl Encoder for MockEncoder {
    fn name(&self) -> &str {
        "mock"
    }

    async fn encode(&self, job: &EncodeJob) -> Result<(), EncoderError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let result = self.run(job).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.encodes.write().await.push(RecordedEncode {
            job: job.clone(),
            success: result.is_ok(),
        });
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_success_writes_output() {
        let dir = TempDir::new().unwrap();
        let encoder = MockEncoder::new();
        let job = EncodeJob::new(dir.path().join("a.png"), dir.path().join("a.webp"));

        encoder.encode(&job).await.unwrap();

        assert_eq!(std::fs::read(dir.path().join("a.webp")).unwrap(), MOCK_OUTPUT);
        let recorded = encoder.recorded_encodes().await;
        assert_eq!(recorded.len(), 1);
        assert!(recorded[0].success);
        assert_eq!(recorded[0].job, job);
    }

    #[tokio::test]
    async fn test_fail_for_path() {
        let dir = TempDir::new().unwrap();
        let encoder = MockEncoder::new();
        encoder.fail_for(dir.path().join("bad.png"), "truncated file").await;

        let err = encoder
            .encode(&EncodeJob::new(
                dir.path().join("bad.png"),
                dir.path().join("bad.webp"),
            ))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("truncated file"));
        assert!(!dir.path().join("bad.webp").exists());
        assert!(!encoder.recorded_encodes().await[0].success);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let dir = TempDir::new().unwrap();
        let encoder = MockEncoder::new();
        let clone = encoder.clone();

        clone
            .encode(&EncodeJob::new(
                dir.path().join("a.png"),
                dir.path().join("a.webp"),
            ))
            .await
            .unwrap();

        assert_eq!(encoder.encode_count().await, 1);
        assert_eq!(encoder.max_in_flight().await, 1);
    }
}
