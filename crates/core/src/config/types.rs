use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::encoder::EncoderConfig;

/// Name of the output directory created inside the input directory when no
/// explicit output directory is given.
pub const DEFAULT_OUTPUT_DIR_NAME: &str = "webp_converties";

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub encoder: EncoderConfig,
    #[serde(default)]
    pub conversion: ConversionConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Dispatch configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ConversionConfig {
    /// Encoder processes allowed to run at once. 1 converts files in order.
    #[serde(default = "default_max_parallel")]
    pub max_parallel_conversions: usize,
    /// Directory name used under the input directory when `--output` is absent.
    #[serde(default = "default_output_dir_name")]
    pub output_dir_name: String,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            max_parallel_conversions: default_max_parallel(),
            output_dir_name: default_output_dir_name(),
        }
    }
}

fn default_max_parallel() -> usize {
    1
}

fn default_output_dir_name() -> String {
    DEFAULT_OUTPUT_DIR_NAME.to_string()
}

/// Metrics configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct MetricsConfig {
    /// Write Prometheus text metrics here at the end of the run.
    #[serde(default)]
    pub textfile: Option<PathBuf>,
}
