//! Result aggregation and final reporting.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// A file that could not be converted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionFailure {
    pub source_path: PathBuf,
    pub error: String,
}

/// Result of processing one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// The destination file was written.
    Converted(PathBuf),
    /// The file failed; the rest of the run is unaffected.
    Failed(ConversionFailure),
}

/// Overall outcome of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    Succeeded,
    /// At least one file failed, even if others succeeded.
    Failed,
}

impl RunOutcome {
    /// Process exit code for this outcome.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunOutcome::Succeeded => 0,
            RunOutcome::Failed => 1,
        }
    }
}

/// Successes and failures of a run, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionReport {
    pub successes: Vec<PathBuf>,
    pub failures: Vec<ConversionFailure>,
}

impl ConversionReport {
    /// Builds a report from already-ordered success and failure lists.
    pub fn summarize(successes: Vec<PathBuf>, failures: Vec<ConversionFailure>) -> Self {
        Self {
            successes,
            failures,
        }
    }

    /// Splits per-file outcomes into the two lists, keeping their order.
    pub fn from_outcomes(outcomes: impl IntoIterator<Item = FileOutcome>) -> Self {
        let mut report = Self::default();
        for outcome in outcomes {
            report.record(outcome);
        }
        report
    }

    /// Appends one outcome.
    pub fn record(&mut self, outcome: FileOutcome) {
        match outcome {
            FileOutcome::Converted(dest) => self.successes.push(dest),
            FileOutcome::Failed(failure) => self.failures.push(failure),
        }
    }

    pub fn success_count(&self) -> usize {
        self.successes.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// `Failed` iff any file failed.
    pub fn outcome(&self) -> RunOutcome {
        if self.failures.is_empty() {
            RunOutcome::Succeeded
        } else {
            RunOutcome::Failed
        }
    }

    /// The line printed on stdout.
    pub fn summary_line(&self) -> String {
        format!("{} conversion(s) succeeded.", self.success_count())
    }

    /// The block printed on stderr, or `None` when nothing failed.
    pub fn failure_block(&self) -> Option<String> {
        if self.failures.is_empty() {
            return None;
        }

        let mut block = format!("{} failure(s):", self.failure_count());
        for failure in &self.failures {
            let _ = write!(
                block,
                "\n- {}: {}",
                failure.source_path.display(),
                failure.error
            );
        }
        Some(block)
    }
}

/// Machine-readable record of a whole run, written with `--report`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub generated_at: DateTime<Utc>,
    pub backend: String,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub files_discovered: usize,
    pub duration_ms: u64,
    pub outcome: RunOutcome,
    #[serde(flatten)]
    pub report: ConversionReport,
}

impl RunSummary {
    pub fn new(
        backend: &str,
        input_dir: &Path,
        output_dir: &Path,
        files_discovered: usize,
        duration_ms: u64,
        report: ConversionReport,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            backend: backend.to_string(),
            input_dir: input_dir.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
            files_discovered,
            duration_ms,
            outcome: report.outcome(),
            report,
        }
    }

    /// Writes the summary as pretty-printed JSON.
    pub async fn write_json(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, json).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::EncoderBackend;

    fn failure(path: &str, error: &str) -> ConversionFailure {
        ConversionFailure {
            source_path: PathBuf::from(path),
            error: error.to_string(),
        }
    }

    #[test]
    fn test_empty_report_succeeds() {
        let report = ConversionReport::default();
        assert_eq!(report.outcome(), RunOutcome::Succeeded);
        assert_eq!(report.outcome().exit_code(), 0);
        assert_eq!(report.summary_line(), "0 conversion(s) succeeded.");
        assert!(report.failure_block().is_none());
    }

    #[test]
    fn test_partial_success_is_failed_run() {
        let report = ConversionReport::summarize(
            vec![PathBuf::from("/a/out/b/y.webp")],
            vec![failure("/a/x.png", "sips exited with code 1")],
        );
        assert_eq!(report.success_count(), 1);
        assert_eq!(report.failure_count(), 1);
        assert_eq!(report.outcome(), RunOutcome::Failed);
        assert_eq!(report.outcome().exit_code(), 1);
    }

    #[test]
    fn test_failure_block_format() {
        let report = ConversionReport::summarize(
            vec![],
            vec![
                failure("/a/x.png", "boom"),
                failure("/a/z.gif", "Encoder timed out after 5 seconds"),
            ],
        );
        assert_eq!(
            report.failure_block().unwrap(),
            "2 failure(s):\n- /a/x.png: boom\n- /a/z.gif: Encoder timed out after 5 seconds"
        );
    }

    #[test]
    fn test_from_outcomes_keeps_order() {
        let report = ConversionReport::from_outcomes(vec![
            FileOutcome::Failed(failure("/a/2.png", "e2")),
            FileOutcome::Converted(PathBuf::from("/o/1.webp")),
            FileOutcome::Failed(failure("/a/1.png", "e1")),
            FileOutcome::Converted(PathBuf::from("/o/3.webp")),
        ]);
        assert_eq!(
            report.successes,
            vec![PathBuf::from("/o/1.webp"), PathBuf::from("/o/3.webp")]
        );
        assert_eq!(
            report
                .failures
                .iter()
                .map(|f| f.source_path.clone())
                .collect::<Vec<_>>(),
            vec![PathBuf::from("/a/2.png"), PathBuf::from("/a/1.png")]
        );
    }

    #[test]
    fn test_run_summary_json_shape() {
        let report = ConversionReport::summarize(
            vec![PathBuf::from("/in/out/a.webp")],
            vec![failure("/in/b.png", "boom")],
        );
        let summary = RunSummary::new(
            EncoderBackend::Ffmpeg.as_str(),
            Path::new("/in"),
            Path::new("/in/out"),
            3,
            42,
            report,
        );

        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["backend"], "ffmpeg");
        assert_eq!(value["outcome"], "failed");
        assert_eq!(value["files_discovered"], 3);
        assert_eq!(value["successes"][0], "/in/out/a.webp");
        assert_eq!(value["failures"][0]["source_path"], "/in/b.png");
        assert_eq!(value["failures"][0]["error"], "boom");
        assert!(value["generated_at"].is_string());
    }

    #[tokio::test]
    async fn test_write_json() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("report.json");
        let summary = RunSummary::new(
            "mock",
            Path::new("/in"),
            Path::new("/out"),
            0,
            1,
            ConversionReport::default(),
        );

        summary.write_json(&path).await.unwrap();

        let parsed: RunSummary =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.outcome, RunOutcome::Succeeded);
        assert_eq!(parsed.report, ConversionReport::default());
    }
}
