//! Owned zone set with the query surface used by callers
//!
//! A [`RegionIndex`] is immutable once built and is `Send + Sync`, so one
//! index can serve any number of concurrent lookups.

use serde_json::Value;
use tracing::{debug, instrument};

use super::resolver::{nearby_regions, resolve_region};
use crate::Result;
use crate::adapters::zones::regions_from_feature_collection;
use crate::models::{GeoPoint, Region, RegionWithDistance, ZoneResolution};

#[derive(Debug, Clone, Default)]
pub struct RegionIndex {
    regions: Vec<Region>,
}

impl RegionIndex {
    #[must_use]
    pub fn new(regions: Vec<Region>) -> Self {
        Self { regions }
    }

    /// Build from a GeoJSON feature collection, dropping malformed features
    pub fn from_feature_collection(collection: &Value) -> Result<Self> {
        regions_from_feature_collection(collection).map(Self::new)
    }

    #[must_use]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Region> {
        self.regions.iter().find(|region| region.id() == id)
    }

    #[must_use]
    pub fn find_containing(&self, point: &GeoPoint) -> Option<&Region> {
        resolve_region(point, &self.regions)
    }

    #[must_use]
    pub fn find_nearby(
        &self,
        point: &GeoPoint,
        max_distance_miles: f64,
        limit: usize,
    ) -> Vec<RegionWithDistance<'_>> {
        nearby_regions(point, &self.regions, max_distance_miles, limit)
    }

    /// Containing zone and nearby zones in one call
    #[instrument(name = "resolve_zone", level = "debug", skip(self))]
    pub fn resolve(
        &self,
        point: &GeoPoint,
        max_distance_miles: f64,
        limit: usize,
    ) -> ZoneResolution<'_> {
        let resolution = ZoneResolution {
            current: self.find_containing(point),
            nearby: self.find_nearby(point, max_distance_miles, limit),
        };
        debug!(
            "Resolved {} to {} with {} nearby zones",
            point.format_coordinates(),
            resolution.current.map_or("no zone", Region::id),
            resolution.nearby.len()
        );
        resolution
    }
}

impl From<Vec<Region>> for RegionIndex {
    fn from(regions: Vec<Region>) -> Self {
        Self::new(regions)
    }
}
