//! Point-at-a-time zone queries
//!
//! Regions are visited in input order. Overlapping zones are not expected
//! from upstream but are not validated either: the first containing region
//! wins.

use tracing::debug;

use crate::geometry::{point_in_geometry, point_to_bbox_distance, point_to_boundary_distance};
use crate::models::{GeoPoint, Region, RegionWithDistance};

/// Exact containment behind the bounding box pre-filter
#[must_use]
pub fn region_contains(region: &Region, point: &GeoPoint) -> bool {
    region.bounding_box().contains(point) && point_in_geometry(point.coord(), region.geometry())
}

/// First region containing `point`, `None` for invalid points or no match
#[must_use]
pub fn resolve_region<'a>(point: &GeoPoint, regions: &'a [Region]) -> Option<&'a Region> {
    if !point.is_valid() {
        debug!("Ignoring non-finite query point {:?}", point);
        return None;
    }
    regions.iter().find(|region| region_contains(region, point))
}

/// Regions not containing `point` whose boundary lies within `max_distance_miles`
///
/// Sorted ascending by distance (ties keep input order) and truncated to `limit`.
#[must_use]
pub fn nearby_regions<'a>(
    point: &GeoPoint,
    regions: &'a [Region],
    max_distance_miles: f64,
    limit: usize,
) -> Vec<RegionWithDistance<'a>> {
    if !point.is_valid() || max_distance_miles.is_nan() || max_distance_miles < 0.0 || limit == 0 {
        return Vec::new();
    }
    let coord = point.coord();

    let mut nearby: Vec<RegionWithDistance<'a>> = regions
        .iter()
        .filter(|region| point_to_bbox_distance(coord, region.bounding_box()) <= max_distance_miles)
        .filter(|region| !region_contains(region, point))
        .filter_map(|region| {
            let distance_miles = point_to_boundary_distance(coord, region.geometry());
            (distance_miles <= max_distance_miles).then_some(RegionWithDistance {
                region,
                distance_miles,
            })
        })
        .collect();

    nearby.sort_by(|a, b| a.distance_miles.total_cmp(&b.distance_miles));
    nearby.truncate(limit);
    nearby
}
