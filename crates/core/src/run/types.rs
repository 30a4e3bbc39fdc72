//! Types for the run module.

use std::path::PathBuf;
use std::time::Duration;

use crate::report::{ConversionReport, RunOutcome, RunSummary};

/// What to convert, as given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunRequest {
    /// Input directory. `None` is reported as a configuration error.
    pub input: Option<PathBuf>,
    /// Output directory. Defaults to a subdirectory of the input.
    pub output: Option<PathBuf>,
}

impl RunRequest {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: Some(input.into()),
            output: None,
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }
}

/// Everything a finished run produced.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// Name of the encoder that was used.
    pub encoder: String,
    /// Resolved input directory.
    pub input_dir: PathBuf,
    /// Resolved output directory.
    pub output_dir: PathBuf,
    /// Regular files found below the input directory.
    pub files_discovered: usize,
    /// Files that passed the extension filter.
    pub files_convertible: usize,
    /// Wall-clock time of the run.
    pub duration: Duration,
    pub report: ConversionReport,
}

impl RunResult {
    pub fn outcome(&self) -> RunOutcome {
        self.report.outcome()
    }

    /// Machine-readable form of this result.
    pub fn summary(&self) -> RunSummary {
        RunSummary::new(
            &self.encoder,
            &self.input_dir,
            &self.output_dir,
            self.files_discovered,
            self.duration.as_millis() as u64,
            self.report.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = RunRequest::new("/photos").with_output("/tmp/out");
        assert_eq!(request.input, Some(PathBuf::from("/photos")));
        assert_eq!(request.output, Some(PathBuf::from("/tmp/out")));
        assert_eq!(RunRequest::default().input, None);
    }

    #[test]
    fn test_summary_carries_result() {
        let result = RunResult {
            encoder: "ffmpeg".to_string(),
            input_dir: PathBuf::from("/in"),
            output_dir: PathBuf::from("/in/webp_converties"),
            files_discovered: 5,
            files_convertible: 3,
            duration: Duration::from_millis(1500),
            report: ConversionReport::summarize(vec![PathBuf::from("/in/webp_converties/a.webp")], vec![]),
        };

        let summary = result.summary();
        assert_eq!(summary.backend, "ffmpeg");
        assert_eq!(summary.files_discovered, 5);
        assert_eq!(summary.duration_ms, 1500);
        assert_eq!(summary.outcome, RunOutcome::Succeeded);
        assert_eq!(summary.report.success_count(), 1);
    }
}
