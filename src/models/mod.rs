//! Data models for Powderday
//!
//! This module contains the strict internal schema the engines work on:
//! - Location: query points
//! - Series: generic provider time series
//! - Daily: per-local-day summaries
//! - Region: forecast zone polygons with danger metadata

pub mod daily;
pub mod location;
pub mod region;
pub mod series;

// Re-export all public types for convenient access
pub use daily::DailyRecord;
pub use location::GeoPoint;
pub use region::{
    BoundingBox, Region, RegionGeometry, RegionMetadata, RegionWithDistance, ZoneResolution,
};
pub use series::{Quantity, Series, SeriesBundle, SeriesPoint};
