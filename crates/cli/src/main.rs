mod args;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use webpbatch_core::{
    load_config, metrics, validate_config, Config, EncoderBackend, EncoderCapabilities,
    RunOutcome, RunRequest, Runner,
};

use args::Args;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Logs go to stderr; stdout only carries the summary line.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.default_log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let code = match run(args).await {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            RunOutcome::Failed.exit_code()
        }
    };
    std::process::exit(code);
}

async fn run(args: Args) -> Result<RunOutcome> {
    let mut config = load_config(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(jobs) = args.jobs {
        config.conversion.max_parallel_conversions = usize::from(jobs);
    }
    validate_config(&config).context("Invalid configuration")?;

    if args.list_encoders {
        return list_encoders(&config).await;
    }

    let request = RunRequest {
        input: args.input,
        output: args.output,
    };
    let runner = Runner::new(config);
    let result = runner.run(&request).await?;

    println!("{}", result.report.summary_line());
    if let Some(block) = result.report.failure_block() {
        eprintln!("{}", block);
    }

    if let Some(path) = &args.report {
        result
            .summary()
            .write_json(path)
            .await
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        info!(path = %path.display(), "Report written");
    }

    if let Some(path) = &runner.config().metrics.textfile {
        if let Err(e) = metrics::write_textfile(path).await {
            warn!(path = %path.display(), error = %e, "Failed to write metrics");
        }
    }

    Ok(result.outcome())
}

/// Prints one line per backend, in probe priority order.
async fn list_encoders(config: &Config) -> Result<RunOutcome> {
    let capabilities = EncoderCapabilities::detect(&config.encoder).await;

    for backend in EncoderBackend::PRIORITY {
        let status = if config.encoder.disabled.contains(&backend) {
            "disabled"
        } else if capabilities.has(backend) {
            "available"
        } else {
            "missing"
        };
        println!(
            "{:<12} {:<10} {}",
            backend.as_str(),
            status,
            config.encoder.binary_path(backend).display()
        );
    }

    Ok(match capabilities.best() {
        Some(_) => RunOutcome::Succeeded,
        None => RunOutcome::Failed,
    })
}
