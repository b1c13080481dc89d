//! Shop-Harvest main entry point
//!
//! This is the command-line interface for the Shop-Harvest storefront harvester.

use chrono::Utc;
use clap::Parser;
use shop_harvest::config::{load_config_with_hash, Config};
use shop_harvest::crawler::BatchRunner;
use shop_harvest::input::read_storefronts;
use shop_harvest::output::{print_statistics, write_report_to_path, BatchStatistics};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Shop-Harvest: a storefront metadata harvester
///
/// Reads storefront addresses from a CSV file, collects their contact links
/// and a sample of their products, and writes one CSV row per storefront
/// that could be harvested.
#[derive(Parser, Debug)]
#[command(name = "shop-harvest")]
#[command(version)]
#[command(about = "A storefront metadata harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// CSV file listing storefronts in a `url` column
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// CSV report to write
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show the effective configuration and storefront list without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = load_configuration(cli.config.as_deref())?;

    // Command-line paths take precedence over the config file
    if let Some(input) = &cli.input {
        config.io.input_path = input.display().to_string();
    }
    if let Some(output) = &cli.output {
        config.io.output_path = output.display().to_string();
    }

    tracing::info!("Reading storefronts from: {}", config.io.input_path);
    let storefronts = match read_storefronts(Path::new(&config.io.input_path)) {
        Ok(storefronts) => storefronts,
        Err(e) => {
            tracing::error!("Failed to read {}: {}", config.io.input_path, e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config, &storefronts);
    } else {
        handle_harvest(&config, storefronts, cli.quiet).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("shop_harvest=info,warn"),
            1 => EnvFilter::new("shop_harvest=debug,info"),
            2 => EnvFilter::new("shop_harvest=trace,debug"),
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

/// Loads the configuration file, or the defaults when none is given
fn load_configuration(path: Option<&Path>) -> Result<Config, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        tracing::info!("No configuration file given, using defaults");
        return Ok(Config::default());
    };

    tracing::info!("Loading configuration from: {}", path.display());
    match load_config_with_hash(path) {
        Ok((config, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            Ok(config)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            Err(e.into())
        }
    }
}

/// Handles the --dry-run mode: shows what would be harvested
fn handle_dry_run(config: &Config, storefronts: &[String]) {
    let harvester = &config.harvester;

    println!("=== Shop-Harvest Dry Run ===\n");

    println!("Harvester Configuration:");
    println!("  Contact paths: {:?}", harvester.contact_paths);
    println!("  Listing path: {}", harvester.listing_path);
    println!("  Product URL template: {}", harvester.product_url_template);
    println!("  Max products per storefront: {}", harvester.max_products);
    println!(
        "  Max concurrent storefronts: {}",
        describe_limit(harvester.max_concurrent_storefronts)
    );
    println!(
        "  Max concurrent products: {}",
        describe_limit(harvester.max_concurrent_products)
    );
    match harvester.request_timeout_secs {
        Some(secs) => println!("  Request timeout: {}s", secs),
        None => println!("  Request timeout: transport default"),
    }

    println!("\nUser Agent:");
    println!(
        "  {}/{}",
        config.user_agent.crawler_name, config.user_agent.crawler_version
    );

    println!("\nInput/Output:");
    println!("  Input: {}", config.io.input_path);
    println!("  Output: {}", config.io.output_path);
    println!("  Column policy: {:?}", config.io.column_policy);

    println!("\nStorefronts ({}):", storefronts.len());
    for storefront in storefronts {
        println!("  - {}", storefront);
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would harvest {} storefronts", storefronts.len());
}

fn describe_limit(limit: Option<usize>) -> String {
    limit
        .map(|l| l.to_string())
        .unwrap_or_else(|| "unbounded".to_string())
}

/// Handles the main harvest operation
async fn handle_harvest(
    config: &Config,
    storefronts: Vec<String>,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let runner = BatchRunner::new(config)?;

    let started_at = Utc::now();
    let outcome = runner.run(storefronts).await;
    let finished_at = Utc::now();

    let output_path = Path::new(&config.io.output_path);
    let summary = match write_report_to_path(output_path, &outcome, config.io.column_policy) {
        Ok(summary) => summary,
        Err(e) => {
            tracing::error!("Failed to write report: {}", e);
            return Err(e.into());
        }
    };

    if summary.rows == 0 {
        tracing::warn!(
            "No storefront was harvested; {} left empty",
            output_path.display()
        );
    } else {
        tracing::info!(
            "Wrote {} rows ({} columns) to {}",
            summary.rows,
            summary.columns.len(),
            output_path.display()
        );
    }

    if !quiet {
        let stats = BatchStatistics::from_outcome(&outcome, started_at, finished_at);
        println!();
        print_statistics(&stats);
    }

    Ok(())
}
