//! Provider payload adapters
//!
//! The only place provider field names appear. Each adapter turns a parsed
//! JSON payload into the internal [`crate::models`] shapes:
//! - Gridpoint: layered gridded forecast into a series bundle
//! - Zones: avalanche zone feature collection into regions

use std::path::Path;

use serde_json::Value;

pub mod gridpoint;
pub mod zones;

pub use gridpoint::{bundle_from_gridpoint, parse_duration_hours, parse_valid_time};
pub use zones::{geometry_from_geojson, regions_from_feature_collection};

/// Read and parse a JSON payload saved to disk
pub fn read_json_file(path: impl AsRef<Path>) -> crate::Result<Value> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}
