//! Command-line interface for pin-emulation
//!
//! # Usage Examples
//!
//! ## Print
//! ```bash
//! # Print records forever, one every 0-1 seconds
//! pin-emulation print --db-credentials db_creds_aws_emulation.yaml
//!
//! # Print ten records without pausing, sampling only existing rows
//! pin-emulation print --iterations 10 --max-delay 0 --dynamic-bound
//! ```
//!
//! ## Post
//! ```bash
//! # Post one record (pin, geo and user) to the Kafka REST proxy
//! pin-emulation post \
//!   --db-credentials db_creds_aws_emulation.yaml \
//!   --api-credentials db_creds_api.yaml
//!
//! # Post 100 records with a fixed seed
//! pin-emulation --seed 100 post --iterations 100
//! ```
//!
//! Logging is controlled with `RUST_LOG` (default `info`) and goes to stderr.

use anyhow::Context;
use clap::{Parser, Subcommand};
use kafka_rest_producer::KafkaRestClient;
use pin_emulation::config::{ApiCredentials, DatabaseCredentials};
use pin_emulation::console::{run_console, ConsoleOptions};
use pin_emulation::mysql::{self, MySqlRowSource};
use pin_emulation::publish::publish_samples;
use pin_emulation::EmulationOpts;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "pin-emulation")]
#[command(about = "Emulate user posts from the pin, geolocation and user tables")]
#[command(long_about = None)]
struct Cli {
    #[command(flatten)]
    opts: EmulationOpts,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample records and print them to standard output
    Print {
        /// Stop after this many records (default: run until interrupted)
        #[arg(long)]
        iterations: Option<u64>,
    },

    /// Sample records and post them to the Kafka REST proxy
    Post {
        /// YAML file with INVOKE_URL_BASE
        #[arg(
            long,
            default_value = "db_creds_api.yaml",
            env = "EMULATION_API_CREDENTIALS"
        )]
        api_credentials: PathBuf,

        /// Number of records to post
        #[arg(long, default_value_t = 1)]
        iterations: u64,

        /// HTTP request timeout
        #[arg(long, default_value = "30s", value_parser = pin_emulation::config::parse_duration)]
        timeout: Duration,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing; stdout is reserved for printed records
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let db_credentials = DatabaseCredentials::from_file(&cli.opts.db_credentials)
        .with_context(|| {
            format!(
                "Failed to load database credentials from {:?}",
                cli.opts.db_credentials
            )
        })?;

    // Read the API credentials before touching the database so a bad file fails fast
    let api_credentials = match &cli.command {
        Commands::Post {
            api_credentials, ..
        } => Some(ApiCredentials::from_file(api_credentials).with_context(|| {
            format!("Failed to load API credentials from {api_credentials:?}")
        })?),
        Commands::Print { .. } => None,
    };

    let pool = mysql::connect(&db_credentials).await.with_context(|| {
        format!(
            "Failed to connect to MySQL at {}:{}",
            db_credentials.host, db_credentials.port
        )
    })?;
    let source = MySqlRowSource::new(pool);
    let mut sampler = cli.opts.sampler();

    let result = match cli.command {
        Commands::Print { iterations } => {
            let options = ConsoleOptions {
                iterations,
                max_delay: cli.opts.max_delay,
            };
            let mut stdout = std::io::stdout();
            run_console(&mut sampler, &source, &mut stdout, &options)
                .await
                .map(|_| ())
                .context("Console emulation failed")
        }
        Commands::Post {
            iterations,
            timeout,
            ..
        } => {
            let api = api_credentials.context("API credentials not loaded")?;
            let client = KafkaRestClient::new(api.invoke_url_base, timeout)
                .context("Failed to create Kafka REST client")?;
            post(&mut sampler, &source, &client, iterations, cli.opts.max_delay).await
        }
    };

    if let Err(e) = source.disconnect().await {
        warn!("Failed to close MySQL connections: {e}");
    }
    result
}

async fn post(
    sampler: &mut pin_emulation::Sampler,
    source: &MySqlRowSource,
    client: &KafkaRestClient,
    iterations: u64,
    max_delay: Duration,
) -> anyhow::Result<()> {
    let reports = publish_samples(sampler, source, client, iterations, max_delay)
        .await
        .context("Publishing emulated data failed")?;

    let total: usize = reports.iter().map(|r| r.outcomes.len()).sum();
    let failed: Vec<_> = reports.iter().flat_map(|r| r.failures()).collect();
    info!(
        "Posted {} of {total} parts successfully",
        total - failed.len()
    );

    if !failed.is_empty() {
        for outcome in &failed {
            if let Err(e) = &outcome.result {
                warn!("{} -> {}: {e}", outcome.part, outcome.url);
            }
        }
        anyhow::bail!("{} of {total} posts failed", failed.len());
    }
    Ok(())
}
