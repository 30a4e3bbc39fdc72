//! Per-file conversion with isolated failures.

use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

use crate::encoder::{EncodeJob, Encoder, EncoderError};
use crate::metrics::{CONVERSIONS_TOTAL, CONVERSION_DURATION};
use crate::report::{ConversionFailure, ConversionReport, FileOutcome};

use super::destination::destination_for;

/// Converts a set of files below `input_root` into `output_root`.
pub struct Dispatcher {
    encoder: Arc<dyn Encoder>,
    input_root: PathBuf,
    output_root: PathBuf,
    max_parallel: usize,
}

impl Dispatcher {
    /// Creates a sequential dispatcher.
    pub fn new(
        encoder: Arc<dyn Encoder>,
        input_root: impl Into<PathBuf>,
        output_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            encoder,
            input_root: input_root.into(),
            output_root: output_root.into(),
            max_parallel: 1,
        }
    }

    /// Sets how many encoder processes may run at once.
    pub fn with_max_parallel(mut self, max: usize) -> Self {
        self.max_parallel = max.max(1);
        self
    }

    pub fn max_parallel(&self) -> usize {
        self.max_parallel
    }

    /// Converts every file and aggregates the outcomes.
    ///
    /// Outcomes are recorded in the order of `files`, also when conversions
    /// run in parallel. A failing file never affects the others.
    pub async fn convert_all(&self, files: Vec<PathBuf>) -> ConversionReport {
        let outcomes: Vec<FileOutcome> = stream::iter(files)
            .map(|source| self.convert_one(source))
            .buffered(self.max_parallel)
            .collect()
            .await;

        ConversionReport::from_outcomes(outcomes)
    }

    /// Converts one file, turning any error into a failure record.
    pub async fn convert_one(&self, source: PathBuf) -> FileOutcome {
        match self.try_convert(&source).await {
            Ok(dest) => {
                debug!(source = %source.display(), dest = %dest.display(), "Converted");
                FileOutcome::Converted(dest)
            }
            Err(e) => {
                warn!(source = %source.display(), error = %e, "Conversion failed");
                FileOutcome::Failed(ConversionFailure {
                    source_path: source,
                    error: e.to_string(),
                })
            }
        }
    }

    async fn try_convert(&self, source: &Path) -> Result<PathBuf, EncoderError> {
        let dest = destination_for(&self.input_root, &self.output_root, source)?;

        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| EncoderError::OutputDirectoryFailed {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }

        let backend = self.encoder.name();
        let started = Instant::now();
        let result = self.encoder.encode(&EncodeJob::new(source, &dest)).await;
        CONVERSION_DURATION
            .with_label_values(&[backend])
            .observe(started.elapsed().as_secs_f64());

        let label = match &result {
            Ok(()) => "success",
            Err(e) if e.is_timeout() => "timeout",
            Err(_) => "failure",
        };
        CONVERSIONS_TOTAL.with_label_values(&[label, backend]).inc();

        result.map(|()| dest)
    }
}

/// Converts `files` one at a time with `encoder`.
pub async fn convert_all(
    files: Vec<PathBuf>,
    input_root: &Path,
    output_root: &Path,
    encoder: Arc<dyn Encoder>,
) -> ConversionReport {
    Dispatcher::new(encoder, input_root, output_root)
        .convert_all(files)
        .await
}
