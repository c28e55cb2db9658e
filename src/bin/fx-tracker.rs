//! fx-tracker CLI - polls FX conversion rates and records windowed channel
//! statistics
//!
//! ## Example Usage
//!
//! ```bash
//! # Track the default pairs for five hours, persisting to SQLite
//! POLYGON_API_KEY=... fx-tracker
//!
//! # Custom pairs and a short run, all in memory
//! POLYGON_API_KEY=... fx-tracker --pairs EUR/USD,USD/JPY --duration-secs 600 --in-memory
//! ```

use clap::Parser;
use fx_tracker::config::TrackerConfig;
use fx_tracker::currency::CurrencyPair;
use fx_tracker::error::Result;
use fx_tracker::source::PolygonQuoteSource;
use fx_tracker::store::{
    MemorySampleStore, MemorySummaryStore, SampleStore, SqliteSampleStore, SqliteSummaryStore,
    SummaryStore,
};
use fx_tracker::tracker::Tracker;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

/// fx-tracker: streaming FX rate channel tracker
#[derive(Parser)]
#[command(name = "fx-tracker")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Polls FX conversion rates and records windowed channel statistics", long_about = None)]
struct Cli {
    /// Tracked pairs as BASE/QUOTE, comma separated
    #[arg(long, value_delimiter = ',', default_value = "EUR/USD,GBP/INR,CHF/JPY")]
    pairs: Vec<String>,

    /// Poll interval in seconds
    #[arg(long, default_value_t = 1)]
    poll_interval_secs: u64,

    /// Aggregation window length in seconds
    #[arg(long, default_value_t = 360)]
    window_secs: u64,

    /// Total run duration in seconds
    #[arg(long, default_value_t = 18_000)]
    duration_secs: u64,

    /// SQLite file for raw samples
    #[arg(long, default_value = "auxiliary_forex_data.db")]
    samples_db: PathBuf,

    /// SQLite file for window summaries
    #[arg(long, default_value = "final_forex_data.db")]
    summaries_db: PathBuf,

    /// Keep all data in memory instead of SQLite
    #[arg(long)]
    in_memory: bool,
}

async fn run(cli: Cli) -> Result<()> {
    let pairs = cli
        .pairs
        .iter()
        .map(|s| CurrencyPair::parse(s))
        .collect::<Result<Vec<_>>>()?;

    let config = TrackerConfig {
        pairs,
        poll_interval: Duration::from_secs(cli.poll_interval_secs),
        window_length: Duration::from_secs(cli.window_secs),
        run_duration: Duration::from_secs(cli.duration_secs),
        api_key: std::env::var("POLYGON_API_KEY").unwrap_or_default(),
    };
    // Fail on bad configuration before any database file is created
    config.validate()?;

    let source = PolygonQuoteSource::new(config.api_key.clone())?;

    let (samples, summaries): (Box<dyn SampleStore>, Box<dyn SummaryStore>) = if cli.in_memory {
        (
            Box::new(MemorySampleStore::new()),
            Box::new(MemorySummaryStore::new()),
        )
    } else {
        (
            Box::new(SqliteSampleStore::new(&cli.samples_db, &config.pairs)?),
            Box::new(SqliteSummaryStore::new(&cli.summaries_db, &config.pairs)?),
        )
    };

    let mut tracker = Tracker::new(config, source, samples, summaries)?;
    tracker.run().await
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
