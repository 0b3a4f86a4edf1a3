//! Avalanche zone feature collections
//!
//! Normalizes a GeoJSON `FeatureCollection` into [`Region`]s. A feature with
//! an unknown geometry type or any malformed coordinate is dropped on its
//! own; the rest of the map still resolves.

use geo_types::{Coord, LineString, MultiPolygon, Polygon};
use serde_json::Value;
use tracing::{debug, warn};

use crate::models::{Region, RegionGeometry, RegionMetadata};
use crate::{PowderdayError, Result};

/// Regions from a feature collection, in feature order
///
/// Fails only when the top-level value is not a feature collection.
pub fn regions_from_feature_collection(collection: &Value) -> Result<Vec<Region>> {
    let features = collection
        .get("features")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            PowderdayError::payload("expected a GeoJSON FeatureCollection with a 'features' array")
        })?;

    let regions: Vec<Region> = features
        .iter()
        .enumerate()
        .filter_map(|(index, feature)| region_from_feature(feature, index))
        .collect();

    let dropped = features.len() - regions.len();
    if dropped > 0 {
        warn!("Dropped {} malformed zone features of {}", dropped, features.len());
    }
    debug!("Normalized {} zones", regions.len());
    Ok(regions)
}

/// One feature as a region, `None` if its geometry is unusable
#[must_use]
pub fn region_from_feature(feature: &Value, index: usize) -> Option<Region> {
    let geometry = geometry_from_geojson(feature.get("geometry")?)?;
    let properties = feature.get("properties").unwrap_or(&Value::Null);
    let id = feature_id(feature, properties).unwrap_or_else(|| format!("zone-{index}"));
    Region::new(id, RegionMetadata::from_properties(properties), geometry)
}

/// `Polygon` or `MultiPolygon` geometry object
#[must_use]
pub fn geometry_from_geojson(geometry: &Value) -> Option<RegionGeometry> {
    let coordinates = geometry.get("coordinates")?;
    match geometry.get("type")?.as_str()? {
        "Polygon" => parse_polygon(coordinates).map(RegionGeometry::Polygon),
        "MultiPolygon" => {
            let polygons = coordinates
                .as_array()?
                .iter()
                .map(parse_polygon)
                .collect::<Option<Vec<_>>>()?;
            (!polygons.is_empty())
                .then(|| RegionGeometry::MultiPolygon(MultiPolygon::new(polygons)))
        }
        _ => None,
    }
}

fn feature_id(feature: &Value, properties: &Value) -> Option<String> {
    [feature.get("id"), properties.get("id")]
        .into_iter()
        .flatten()
        .find_map(|value| match value {
            Value::String(id) if !id.is_empty() => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        })
}

fn parse_polygon(value: &Value) -> Option<Polygon<f64>> {
    let mut rings = value
        .as_array()?
        .iter()
        .map(parse_ring)
        .collect::<Option<Vec<_>>>()?
        .into_iter();
    let exterior = rings.next()?;
    Some(Polygon::new(exterior, rings.collect()))
}

fn parse_ring(value: &Value) -> Option<LineString<f64>> {
    let coords = value
        .as_array()?
        .iter()
        .map(parse_position)
        .collect::<Option<Vec<_>>>()?;
    (coords.len() >= 3).then(|| LineString::new(coords))
}

fn parse_position(value: &Value) -> Option<Coord<f64>> {
    let position = value.as_array()?;
    let x = position.first()?.as_f64()?;
    let y = position.get(1)?.as_f64()?;
    (x.is_finite() && y.is_finite()).then_some(Coord { x, y })
}
