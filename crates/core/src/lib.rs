pub mod config;
pub mod dispatcher;
pub mod encoder;
pub mod filter;
pub mod metrics;
pub mod report;
pub mod run;
pub mod testing;
pub mod walker;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, ConversionConfig,
    MetricsConfig, DEFAULT_OUTPUT_DIR_NAME,
};
pub use dispatcher::{convert_all, destination_for, Dispatcher};
pub use encoder::{
    resolve_encoder, CommandEncoder, EncodeJob, Encoder, EncoderBackend, EncoderCapabilities,
    EncoderConfig, EncoderError,
};
pub use filter::{is_convertible, SUPPORTED_EXTENSIONS};
pub use report::{ConversionFailure, ConversionReport, FileOutcome, RunOutcome, RunSummary};
pub use run::{RunError, RunRequest, RunResult, Runner};
pub use walker::walk;
