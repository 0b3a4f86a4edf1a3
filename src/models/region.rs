//! Forecast zone model

use geo_types::{Coord, MultiPolygon, Polygon};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::GeoPoint;

/// Danger and label fields carried through from the provider
///
/// Well-known fields are typed; everything else is preserved in `extra`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RegionMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub danger: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub danger_level: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub travel_advice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub off_season: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RegionMetadata {
    /// Build metadata from a feature's `properties` object
    ///
    /// Each well-known field is read on its own; one with an unexpected type
    /// stays verbatim in `extra` without affecting the others.
    #[must_use]
    pub fn from_properties(properties: &Value) -> Self {
        let Value::Object(map) = properties else {
            return Self::default();
        };
        let mut extra = map.clone();
        Self {
            name: take_field(&mut extra, "name"),
            center: take_field(&mut extra, "center"),
            center_id: take_field(&mut extra, "center_id"),
            state: take_field(&mut extra, "state"),
            danger: take_field(&mut extra, "danger"),
            danger_level: take_field(&mut extra, "danger_level"),
            color: take_field(&mut extra, "color"),
            link: take_field(&mut extra, "link"),
            travel_advice: take_field(&mut extra, "travel_advice"),
            off_season: take_field(&mut extra, "off_season"),
            start_date: take_field(&mut extra, "start_date"),
            end_date: take_field(&mut extra, "end_date"),
            extra,
        }
    }
}

fn take_field<T: DeserializeOwned>(extra: &mut Map<String, Value>, key: &str) -> Option<T> {
    let value = extra.get(key)?;
    match serde_json::from_value::<Option<T>>(value.clone()) {
        Ok(typed) => {
            extra.remove(key);
            typed
        }
        Err(err) => {
            tracing::debug!("Zone property '{}' kept untyped: {}", key, err);
            None
        }
    }
}

/// Polygonal zone geometry, coordinates are `(longitude, latitude)` degrees
#[derive(Debug, Clone, PartialEq)]
pub enum RegionGeometry {
    Polygon(Polygon<f64>),
    MultiPolygon(MultiPolygon<f64>),
}

impl RegionGeometry {
    /// Constituent polygons
    #[must_use]
    pub fn polygons(&self) -> &[Polygon<f64>] {
        match self {
            RegionGeometry::Polygon(polygon) => std::slice::from_ref(polygon),
            RegionGeometry::MultiPolygon(multi) => &multi.0,
        }
    }

    fn coords(&self) -> impl Iterator<Item = &Coord<f64>> {
        self.polygons().iter().flat_map(|polygon| {
            std::iter::once(polygon.exterior())
                .chain(polygon.interiors())
                .flat_map(|ring| ring.0.iter())
        })
    }
}

/// Axis-aligned bounding box in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Smallest box enclosing the coordinates, `None` when there are none
    pub fn enclosing<'a>(coords: impl IntoIterator<Item = &'a Coord<f64>>) -> Option<Self> {
        coords.into_iter().fold(None, |acc, c| {
            Some(match acc {
                None => Self {
                    min_lon: c.x,
                    min_lat: c.y,
                    max_lon: c.x,
                    max_lat: c.y,
                },
                Some(b) => Self {
                    min_lon: b.min_lon.min(c.x),
                    min_lat: b.min_lat.min(c.y),
                    max_lon: b.max_lon.max(c.x),
                    max_lat: b.max_lat.max(c.y),
                },
            })
        })
    }

    /// Inclusive containment test
    #[must_use]
    pub fn contains(&self, point: &GeoPoint) -> bool {
        point.longitude >= self.min_lon
            && point.longitude <= self.max_lon
            && point.latitude >= self.min_lat
            && point.latitude <= self.max_lat
    }
}

/// A forecast zone ready for containment and distance queries
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Region {
    id: String,
    metadata: RegionMetadata,
    #[serde(skip)]
    geometry: RegionGeometry,
    bounding_box: BoundingBox,
}

impl Region {
    /// Build a region, deriving its bounding box
    ///
    /// Returns `None` for a geometry without any coordinates.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        metadata: RegionMetadata,
        geometry: RegionGeometry,
    ) -> Option<Self> {
        let bounding_box = BoundingBox::enclosing(geometry.coords())?;
        Some(Self {
            id: id.into(),
            metadata,
            geometry,
            bounding_box,
        })
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn metadata(&self) -> &RegionMetadata {
        &self.metadata
    }

    #[must_use]
    pub fn geometry(&self) -> &RegionGeometry {
        &self.geometry
    }

    #[must_use]
    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bounding_box
    }

    /// Display name, falling back to the id
    #[must_use]
    pub fn name(&self) -> &str {
        self.metadata.name.as_deref().unwrap_or(&self.id)
    }
}

/// A nearby region and its boundary distance from the query point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionWithDistance<'a> {
    pub region: &'a Region,
    pub distance_miles: f64,
}

/// Containing zone plus nearby zones for one query point
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct ZoneResolution<'a> {
    pub current: Option<&'a Region>,
    pub nearby: Vec<RegionWithDistance<'a>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{LineString, polygon};
    use serde_json::json;

    #[test]
    fn test_bounding_box_is_derived() {
        let geometry = RegionGeometry::Polygon(polygon![
            (x: -112.0, y: 40.0),
            (x: -111.0, y: 40.0),
            (x: -111.0, y: 41.0),
            (x: -112.0, y: 41.0),
        ]);
        let region = Region::new("wasatch", RegionMetadata::default(), geometry).unwrap();
        let bbox = region.bounding_box();
        assert_eq!(bbox.min_lon, -112.0);
        assert_eq!(bbox.max_lon, -111.0);
        assert_eq!(bbox.min_lat, 40.0);
        assert_eq!(bbox.max_lat, 41.0);
        assert!(bbox.contains(&GeoPoint::new(40.0, -111.5)));
        assert!(!bbox.contains(&GeoPoint::new(39.9, -111.5)));
        assert_eq!(region.name(), "wasatch");
    }

    #[test]
    fn test_empty_geometry_is_rejected() {
        let geometry = RegionGeometry::Polygon(Polygon::new(LineString::new(vec![]), vec![]));
        assert!(Region::new("empty", RegionMetadata::default(), geometry).is_none());
    }

    #[test]
    fn test_metadata_from_properties() {
        let metadata = RegionMetadata::from_properties(&json!({
            "name": "Salt Lake",
            "center": "Utah Avalanche Center",
            "danger": "considerable",
            "danger_level": 3,
            "fillOpacity": 0.5
        }));
        assert_eq!(metadata.name.as_deref(), Some("Salt Lake"));
        assert_eq!(metadata.danger_level, Some(3));
        assert_eq!(metadata.extra.get("fillOpacity"), Some(&json!(0.5)));
    }

    #[test]
    fn test_metadata_with_unexpected_types_is_preserved() {
        let metadata = RegionMetadata::from_properties(&json!({
            "name": "Ogden",
            "danger_level": "high"
        }));
        assert_eq!(metadata.name.as_deref(), Some("Ogden"));
        assert!(metadata.danger_level.is_none());
        assert!(!metadata.extra.contains_key("name"));
        assert_eq!(metadata.extra.get("danger_level"), Some(&json!("high")));

        let serialized = serde_json::to_value(&metadata).unwrap();
        assert_eq!(serialized, json!({ "name": "Ogden", "danger_level": "high" }));
    }
}
