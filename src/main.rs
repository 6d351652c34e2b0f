use anyhow::Result;
use clap::Parser;
use driftscan::{
    config::Config,
    model::Comparison,
    output::{format_results_to_string, print_plain_line, print_results, OutputFormat},
    scan::Scanner,
};
use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use std::process::ExitCode;
use std::str::FromStr;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Exit codes for CI integration
mod exit_codes {
    pub const SUCCESS: u8 = 0;
    pub const ERROR: u8 = 1;
    pub const DRIFT: u8 = 2;
}

#[derive(Parser)]
#[command(name = "driftscan")]
#[command(
    author,
    version,
    about = "Scan tracked components for version drift against their upstreams"
)]
struct Cli {
    /// Path to the configuration document
    #[arg(short, long, default_value = "versions.yaml")]
    config: String,

    /// Normalize versions before comparing (strip v/release- prefixes
    /// and -qualifiers)
    #[arg(short, long)]
    beautify: bool,

    /// Output format (plain, table, json)
    #[arg(short, long, default_value = "plain")]
    format: String,

    /// Write results as JSON to a file instead of stdout
    #[arg(short, long)]
    output: Option<String>,

    /// Log level filter when RUST_LOG is unset (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log: String,

    /// Exit with a non-zero code if any component drifted
    #[arg(long)]
    fail_on_drift: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_codes::ERROR)
        }
    }
}

async fn run() -> Result<u8> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log)),
        )
        .with_writer(std::io::stderr)
        .init();

    let format = OutputFormat::from_str(&cli.format).map_err(|e| anyhow::anyhow!(e))?;

    // The config document is the one thing that may abort the run;
    // everything after this point is component-local.
    let config = Config::load(&cli.config)?;

    let scanner = Scanner::new();
    let results = if format == OutputFormat::Plain && cli.output.is_none() {
        stream_results(&scanner, &config, cli.beautify).await
    } else {
        collect_results(&scanner, &config, cli.beautify).await
    };

    if let Some(path) = &cli.output {
        std::fs::write(path, format_results_to_string(&results)?)?;
        println!("Results written to: {}", path);
    } else if format != OutputFormat::Plain {
        print_results(&results, format)?;
    }

    let drifted = results.iter().any(|r| r.drifted);
    if cli.fail_on_drift && drifted {
        return Ok(exit_codes::DRIFT);
    }
    Ok(exit_codes::SUCCESS)
}

/// Plain mode: render each comparison as soon as its component finishes.
async fn stream_results(scanner: &Scanner, config: &Config, beautify: bool) -> Vec<Comparison> {
    let mut results = Vec::with_capacity(config.versions.len());
    let mut stream = std::pin::pin!(scanner.scan(&config.versions, beautify));

    while let Some(result) = stream.next().await {
        print_plain_line(&result);
        results.push(result);
    }

    results
}

/// Collected modes: show a progress bar while components are scanned.
async fn collect_results(scanner: &Scanner, config: &Config, beautify: bool) -> Vec<Comparison> {
    let progress = ProgressBar::new(config.versions.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    progress.enable_steady_tick(Duration::from_millis(100));

    let mut results = Vec::with_capacity(config.versions.len());
    let mut stream = std::pin::pin!(scanner.scan(&config.versions, beautify));

    while let Some(result) = stream.next().await {
        progress.set_message(result.name.clone());
        progress.inc(1);
        results.push(result);
    }

    progress.finish_and_clear();
    results
}
