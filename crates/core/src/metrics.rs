//! Prometheus metrics for a conversion run.
//!
//! A batch run has no scrape endpoint, so the registry is written once at the
//! end of the run in text exposition format (node_exporter textfile style)
//! when `[metrics].textfile` is configured.

use once_cell::sync::Lazy;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::path::Path;

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

/// Conversions by result ("success", "failure", "timeout") and backend.
pub static CONVERSIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("webpbatch_conversions_total", "Total file conversions"),
        &["result", "backend"],
    )
    .unwrap()
});

/// Time spent per encoder invocation.
pub static CONVERSION_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "webpbatch_conversion_duration_seconds",
            "Duration of a single encoder invocation",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]),
        &["backend"],
    )
    .unwrap()
});

/// Regular files found by the walker, before extension filtering.
pub static FILES_DISCOVERED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "webpbatch_files_discovered_total",
        "Files found while walking the input directory",
    )
    .unwrap()
});

/// Files that passed the extension filter.
pub static FILES_CONVERTIBLE_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "webpbatch_files_convertible_total",
        "Files with a supported image extension",
    )
    .unwrap()
});

fn register_metrics(registry: &Registry) {
    registry
        .register(Box::new(CONVERSIONS_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(CONVERSION_DURATION.clone()))
        .unwrap();
    registry
        .register(Box::new(FILES_DISCOVERED_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(FILES_CONVERTIBLE_TOTAL.clone()))
        .unwrap();
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> prometheus::Result<String> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}

/// Writes the current metrics to `path`.
///
/// The file is written next to its final name and renamed into place so a
/// collector never reads a half-written file.
pub async fn write_textfile(path: &Path) -> std::io::Result<()> {
    let body = encode_metrics().map_err(|e| std::io::Error::other(e.to_string()))?;
    let tmp = path.with_extension("prom.tmp");
    tokio::fs::write(&tmp, body).await?;
    tokio::fs::rename(&tmp, path).await
}
