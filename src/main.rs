//! Leadscout main entry point
//!
//! Command-line interface for the business-contact discovery pipeline.

use anyhow::{bail, Context, Result};
use clap::Parser;
use leadscout::config::{load_config, validate_config, Config};
use leadscout::output::save_results;
use leadscout::run_batch;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Leadscout: business-contact discovery for websites
///
/// Crawls each target site's priority pages (contact/about/legal),
/// extracts emails, phone numbers, social profiles, French company
/// identifiers and a technology fingerprint, and writes one merged
/// record per site as JSON and CSV.
#[derive(Parser, Debug)]
#[command(name = "leadscout")]
#[command(version = "1.0.0")]
#[command(about = "Business-contact discovery for websites", long_about = None)]
struct Cli {
    /// URLs of the sites to process
    #[arg(long, num_args = 1.., conflicts_with = "input")]
    urls: Vec<String>,

    /// File with one URL per line (blank lines skipped)
    #[arg(long, value_name = "FILE", conflicts_with = "urls")]
    input: Option<PathBuf>,

    /// Crawl priority pages; without this only the root page is analyzed
    #[arg(long)]
    crawl: bool,

    /// Output directory for json/ and csv/ result files
    #[arg(short, long, value_name = "DIR")]
    output: Option<String>,

    /// Path to TOML configuration file
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path).context("failed to load configuration")?
        }
        None => {
            let config = Config::default();
            validate_config(&config).context("invalid default configuration")?;
            config
        }
    };
    if let Some(output) = &cli.output {
        config.output.directory = output.clone();
    }

    let urls = gather_urls(&cli)?;
    if urls.is_empty() {
        bail!("no URLs to process; use --urls or --input");
    }

    let output_dir = PathBuf::from(&config.output.directory);
    let records = run_batch(config, &urls, cli.crawl).await?;
    tracing::info!(
        "Processed {} of {} sites successfully",
        records.len(),
        urls.len()
    );

    let (json_path, csv_path) = save_results(&records, &output_dir)?;
    println!("Results saved to:");
    println!("  JSON: {}", json_path.display());
    println!("  CSV:  {}", csv_path.display());

    Ok(())
}

fn gather_urls(cli: &Cli) -> Result<Vec<String>> {
    if let Some(path) = &cli.input {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read URL file {}", path.display()))?;
        let urls: Vec<String> = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        tracing::info!("Loaded {} URLs from {}", urls.len(), path.display());
        return Ok(urls);
    }
    Ok(cli.urls.clone())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("leadscout=info,warn"),
            1 => EnvFilter::new("leadscout=debug,info"),
            2 => EnvFilter::new("leadscout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
