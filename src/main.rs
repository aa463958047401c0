//! Command line entry point for the school rating replay
//!
//! Loads the contest schedule and standings from a data directory, replays
//! every contest in chronological order and writes the dense rating history.

use anyhow::Result;
use clap::Parser;
use school_rating::config::AppConfig;
use school_rating::rating::EloRatingCalculator;
use school_rating::replay::{
    ContestOrdering, DirectoryOutcomeProvider, HistorySink, JsonHistorySink, ReplayDriver,
};
use school_rating::utils::{format_leaderboard_line, progress_bar};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

/// School Rating - recompute seed-based Elo ratings from contest results
#[derive(Parser)]
#[command(
    name = "school-rating",
    version,
    about = "Recompute school ratings from a chronological contest history",
    long_about = "Replays every contest listed in <data-dir>/contests.json in date order, \
                 ranks each school by its best team in <data-dir>/standings/<contest>.json, \
                 updates ratings with a seed-based Elo system and writes the rating of every \
                 school after every contest."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Data directory override
    #[arg(long, value_name = "DIR", help = "Directory with contests.json and standings/")]
    data_dir: Option<PathBuf>,

    /// Output path override
    #[arg(short, long, value_name = "FILE", help = "Where to write the rating history")]
    output: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Leaderboard size override
    #[arg(long, value_name = "N", help = "Number of leaderboard entries to log")]
    top: Option<usize>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Dry run mode (validate config and exit)
    #[arg(long, help = "Validate configuration and exit without replaying")]
    dry_run: bool,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from file or environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    // Apply CLI overrides
    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    if let Some(data_dir) = &args.data_dir {
        config.replay.data_dir = data_dir.clone();
    }

    if let Some(output) = &args.output {
        config.replay.output_path = output.clone();
    }

    if let Some(top) = args.top {
        config.replay.leaderboard_size = top;
    }

    school_rating::config::validate_config(&config)?;
    Ok(config)
}

/// Display startup banner with run information
fn display_startup_banner(config: &AppConfig) {
    info!("School Rating {}", school_rating::VERSION);
    info!("   Data directory: {}", config.replay.data_dir.display());
    info!("   Output: {}", config.replay.output_path.display());
    info!("   Default rating: {}", config.rating.default_rating);
    info!(
        "   Search bounds: [{}, {}]",
        config.rating.min_search_rating, config.rating.max_search_rating
    );
}

fn run(config: &AppConfig) -> Result<()> {
    let provider = DirectoryOutcomeProvider::new(&config.replay.data_dir);
    let schedule = provider.load_schedule()?;
    let contests = schedule.ordered_contests();
    info!("Replaying {} scheduled contests", contests.len());

    let calculator = Arc::new(EloRatingCalculator::new(config.rating.clone())?);
    let mut driver =
        ReplayDriver::new(calculator).with_progress(progress_bar(contests.len() as u64));
    driver.run(&contests, &provider)?;
    let result = driver.finish();

    let mut sink = JsonHistorySink::new(&config.replay.output_path);
    sink.write_table(&result.table())?;

    if !result.skipped_contests.is_empty() {
        info!(
            "Skipped {} contests without data: {}",
            result.skipped_contests.len(),
            result.skipped_contests.join(", ")
        );
    }

    info!("Top {} schools:", config.replay.leaderboard_size);
    for (i, entry) in result
        .book
        .leaderboard(config.replay.leaderboard_size)
        .into_iter()
        .enumerate()
    {
        info!("{}", format_leaderboard_line(i + 1, entry));
    }

    Ok(())
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {:#}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    display_startup_banner(&config);

    if args.dry_run {
        info!("Dry run completed - configuration is valid");
        return Ok(());
    }

    if let Err(e) = run(&config) {
        error!("Replay failed: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
