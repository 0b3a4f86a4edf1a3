//! `powderday` - daily snow forecasts and avalanche zone lookup
//!
//! This library turns gridded, irregular-interval forecast series into one
//! record per local calendar day, and resolves a coordinate to the avalanche
//! forecast zone containing it plus the closest zones around it.

pub mod adapters;
pub mod config;
pub mod error;
pub mod forecast;
pub mod geometry;
pub mod logging;
pub mod models;
pub mod regions;
pub mod units;

// Re-export core types for public API
pub use config::PowderdayConfig;
pub use error::PowderdayError;
pub use forecast::{AccumulationChain, DailyAggregator, aggregate_daily};
pub use models::{
    DailyRecord, GeoPoint, Quantity, Region, RegionWithDistance, Series, SeriesBundle,
    SeriesPoint, ZoneResolution,
};
pub use regions::{RegionIndex, nearby_regions, resolve_region};
pub use units::Unit;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, PowderdayError>;
