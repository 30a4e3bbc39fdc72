use std::path::PathBuf;

use clap::Parser;

/// Convert every image below a directory to WebP.
#[derive(Debug, Parser)]
#[command(name = "webp-convert", version, about)]
pub struct Args {
    /// Directory to convert, searched recursively
    pub input: Option<PathBuf>,

    /// Where to write the converted tree [default: <INPUT>/webp_converties]
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long, value_name = "FILE", env = "WEBPBATCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Number of encoder processes to run at once
    #[arg(short, long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    pub jobs: Option<u16>,

    /// Write a JSON report of the run to this file
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Log probe results and skipped directories
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the available encoder backends and exit
    #[arg(long)]
    pub list_encoders: bool,
}

impl Args {
    /// Filter used when `RUST_LOG` is not set.
    pub fn default_log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }
}
