//! Run module: one end-to-end conversion of a directory tree.
//!
//! The flow is:
//! 1. Validate the input directory
//! 2. Resolve the encoder backend (once)
//! 3. Create the output directory
//! 4. Walk the input, skipping the output subtree
//! 5. Keep files with a supported extension
//! 6. Dispatch conversions and aggregate the report
//!
//! Setup problems are returned as [`RunError`]; conversion problems end up in
//! the report. Mapping either to an exit code is left to the caller.
//!
//! # Example
//!
//! ```ignore
//! use webpbatch_core::{Config, RunRequest, Runner};
//!
//! let runner = Runner::new(Config::default());
//! let result = runner.run(&RunRequest::new("/photos")).await?;
//! println!("{}", result.report.summary_line());
//! std::process::exit(result.outcome().exit_code());
//! ```

mod error;
mod runner;
mod types;

pub use error::RunError;
pub use runner::Runner;
pub use types::{RunRequest, RunResult};
