//! Run driver: validation, encoder resolution, traversal, dispatch.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::config::Config;
use crate::dispatcher::Dispatcher;
use crate::encoder::{resolve_encoder, CommandEncoder, Encoder};
use crate::filter::is_convertible;
use crate::metrics::{FILES_CONVERTIBLE_TOTAL, FILES_DISCOVERED_TOTAL};
use crate::walker::walk;

use super::error::RunError;
use super::types::{RunRequest, RunResult};

/// Converts a directory tree according to a [`Config`].
pub struct Runner {
    config: Config,
}

impl Runner {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs a full conversion with the best available encoder.
    ///
    /// Fails before touching the output tree when the input is invalid or no
    /// encoder backend is installed.
    pub async fn run(&self, request: &RunRequest) -> Result<RunResult, RunError> {
        let input_dir = resolve_input(request.input.as_deref()).await?;

        let backend = resolve_encoder(&self.config.encoder).await.ok_or_else(|| {
            RunError::NoEncoderAvailable {
                tried: self
                    .config
                    .encoder
                    .probe_order()
                    .iter()
                    .map(|b| b.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            }
        })?;
        let encoder = Arc::new(CommandEncoder::new(backend, &self.config.encoder));

        self.execute(input_dir, request.output.as_deref(), encoder)
            .await
    }

    /// Runs a full conversion with a caller-supplied encoder.
    pub async fn run_with_encoder(
        &self,
        request: &RunRequest,
        encoder: Arc<dyn Encoder>,
    ) -> Result<RunResult, RunError> {
        let input_dir = resolve_input(request.input.as_deref()).await?;
        self.execute(input_dir, request.output.as_deref(), encoder)
            .await
    }

    async fn execute(
        &self,
        input_dir: PathBuf,
        output: Option<&Path>,
        encoder: Arc<dyn Encoder>,
    ) -> Result<RunResult, RunError> {
        let started = Instant::now();
        let output_dir = self.prepare_output(&input_dir, output).await?;
        info!(
            input = %input_dir.display(),
            output = %output_dir.display(),
            encoder = encoder.name(),
            "Starting conversion run"
        );

        let discovered = walk(&input_dir, Some(&output_dir)).await;
        let files_discovered = discovered.len();
        FILES_DISCOVERED_TOTAL.inc_by(files_discovered as u64);

        let convertible: Vec<PathBuf> = discovered
            .into_iter()
            .filter(|p| is_convertible(p))
            .collect();
        let files_convertible = convertible.len();
        FILES_CONVERTIBLE_TOTAL.inc_by(files_convertible as u64);
        info!(files_discovered, files_convertible, "Traversal finished");

        let encoder_name = encoder.name().to_string();
        let report = Dispatcher::new(encoder, &input_dir, &output_dir)
            .with_max_parallel(self.config.conversion.max_parallel_conversions)
            .convert_all(convertible)
            .await;

        info!(
            succeeded = report.success_count(),
            failed = report.failure_count(),
            "Conversion run finished"
        );

        Ok(RunResult {
            encoder: encoder_name,
            input_dir,
            output_dir,
            files_discovered,
            files_convertible,
            duration: started.elapsed(),
            report,
        })
    }

    /// Creates the output directory and returns its canonical path.
    async fn prepare_output(
        &self,
        input_dir: &Path,
        output: Option<&Path>,
    ) -> Result<PathBuf, RunError> {
        let requested = match output {
            Some(path) => absolute(path)?,
            None => input_dir.join(&self.config.conversion.output_dir_name),
        };

        let failed = |source| RunError::OutputDirectoryFailed {
            path: requested.clone(),
            source,
        };
        tokio::fs::create_dir_all(&requested).await.map_err(failed)?;
        // Canonical form so the walker's exclusion check compares like with like.
        tokio::fs::canonicalize(&requested).await.map_err(failed)
    }
}

/// Checks that the input exists and is a directory, returning its canonical path.
async fn resolve_input(input: Option<&Path>) -> Result<PathBuf, RunError> {
    let input = input.ok_or(RunError::MissingInput)?;
    let not_found = || RunError::InputNotFound {
        path: input.to_path_buf(),
    };

    let metadata = tokio::fs::metadata(input).await.map_err(|_| not_found())?;
    if !metadata.is_dir() {
        return Err(RunError::NotADirectory {
            path: input.to_path_buf(),
        });
    }

    tokio::fs::canonicalize(input).await.map_err(|_| not_found())
}

fn absolute(path: &Path) -> Result<PathBuf, RunError> {
    std::path::absolute(path).map_err(|source| RunError::OutputDirectoryFailed {
        path: path.to_path_buf(),
        source,
    })
}
