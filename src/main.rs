use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use powderday::adapters::{bundle_from_gridpoint, read_json_file};
use powderday::forecast::parse_time_zone;
use powderday::{DailyAggregator, GeoPoint, PowderdayConfig, PowderdayError, RegionIndex, logging};
use serde_json::Value;
use tracing::{error, info};

#[derive(Parser)]
#[command(
    name = "powderday",
    author,
    version,
    about = "Daily snow forecasts and avalanche zone lookup",
    long_about = None
)]
struct Cli {
    /// Configuration file, defaults to <config dir>/powderday/config.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate a gridpoint forecast document into daily records
    Daily {
        /// Gridpoint forecast JSON file
        #[arg(short, long)]
        grid: PathBuf,
        /// IANA time zone for day boundaries
        #[arg(long)]
        tz: Option<String>,
    },
    /// Find the avalanche zone containing a point and the zones near it
    #[command(allow_negative_numbers = true)]
    Zone {
        /// GeoJSON feature collection of zones
        #[arg(short, long)]
        zones: PathBuf,
        #[arg(long)]
        lat: f64,
        #[arg(long)]
        lon: f64,
        /// Boundary distance cut-off for nearby zones
        #[arg(long)]
        max_miles: Option<f64>,
        /// Maximum number of nearby zones
        #[arg(long)]
        limit: Option<usize>,
    },
}

fn read_json(path: &Path) -> Result<Value> {
    read_json_file(path).with_context(|| format!("Failed to load {}", path.display()))
}

fn run_daily(config: &PowderdayConfig, grid: &Path, tz: Option<&str>) -> Result<()> {
    let tz = match tz {
        Some(name) => parse_time_zone(name)?,
        None => config.time_zone()?,
    };
    let bundle = bundle_from_gridpoint(&read_json(grid)?)?;
    let records = DailyAggregator::new(config.accumulation_chain()).aggregate(&bundle, tz);
    info!("Aggregated {} days in {}", records.len(), tz);
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}

fn run_zone(
    config: &PowderdayConfig,
    zones: &Path,
    point: GeoPoint,
    max_miles: Option<f64>,
    limit: Option<usize>,
) -> Result<()> {
    let index = RegionIndex::from_feature_collection(&read_json(zones)?)?;
    info!("Loaded {} zones from {}", index.len(), zones.display());
    let resolution = index.resolve(
        &point,
        max_miles.unwrap_or(config.regions.nearby_max_distance_miles),
        limit.unwrap_or(config.regions.nearby_limit),
    );
    println!("{}", serde_json::to_string_pretty(&resolution)?);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = PowderdayConfig::load_from_path(cli.config)?;
    logging::init(&config.logging)?;

    let result = match cli.command {
        Commands::Daily { grid, tz } => run_daily(&config, &grid, tz.as_deref()),
        Commands::Zone {
            zones,
            lat,
            lon,
            max_miles,
            limit,
        } => run_zone(&config, &zones, GeoPoint::new(lat, lon), max_miles, limit),
    };

    if let Some(cause) = result.as_ref().err().and_then(|e| e.downcast_ref::<PowderdayError>()) {
        error!("{}", cause.user_message());
    }
    result
}
