//! Geometry primitives for zone resolution
//!
//! Containment uses ray casting with an explicit on-edge check, so points on
//! a ring's boundary count as inside that ring. Distances use an
//! equirectangular approximation around the query latitude and are only
//! meaningful for short ranges (tens of miles).

use geo_types::{Coord, LineString, Polygon};

use crate::models::{BoundingBox, RegionGeometry};

/// Tolerance for the on-edge test, in degrees squared
pub const EDGE_EPSILON: f64 = 1e-9;

/// Miles per degree of latitude
pub const MILES_PER_DEGREE: f64 = 69.0;

/// Boundary-inclusive point-in-ring test
///
/// Works for rings given with or without the closing coordinate.
#[must_use]
pub fn point_in_ring(point: Coord<f64>, ring: &LineString<f64>) -> bool {
    let coords = &ring.0;
    let n = coords.len();
    if n < 3 {
        return false;
    }

    let mut j = n - 1;
    for i in 0..n {
        if on_segment(point, coords[j], coords[i]) {
            return true;
        }
        j = i;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (a, b) = (coords[i], coords[j]);
        if (a.y > point.y) != (b.y > point.y) {
            let x_cross = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Inside the outer ring and outside every hole
///
/// A point on a hole's edge is treated as inside the hole, hence outside the polygon.
#[must_use]
pub fn point_in_polygon(point: Coord<f64>, polygon: &Polygon<f64>) -> bool {
    point_in_ring(point, polygon.exterior())
        && !polygon
            .interiors()
            .iter()
            .any(|hole| point_in_ring(point, hole))
}

/// Contained by any constituent polygon
#[must_use]
pub fn point_in_geometry(point: Coord<f64>, geometry: &RegionGeometry) -> bool {
    geometry
        .polygons()
        .iter()
        .any(|polygon| point_in_polygon(point, polygon))
}

/// Distance in miles from `point` to the segment `a`-`b`
#[must_use]
pub fn point_to_segment_distance(point: Coord<f64>, a: Coord<f64>, b: Coord<f64>) -> f64 {
    let lon_scale = MILES_PER_DEGREE * point.y.to_radians().cos();
    let project = |c: Coord<f64>| {
        (
            (c.x - point.x) * lon_scale,
            (c.y - point.y) * MILES_PER_DEGREE,
        )
    };
    let (ax, ay) = project(a);
    let (bx, by) = project(b);
    let (dx, dy) = (bx - ax, by - ay);

    let len_sq = dx * dx + dy * dy;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (-(ax * dx + ay * dy) / len_sq).clamp(0.0, 1.0)
    };
    (ax + t * dx).hypot(ay + t * dy)
}

/// Minimum distance in miles from `point` to any ring segment of the geometry
///
/// Returns `f64::INFINITY` for a geometry with no segments.
#[must_use]
pub fn point_to_boundary_distance(point: Coord<f64>, geometry: &RegionGeometry) -> f64 {
    geometry
        .polygons()
        .iter()
        .flat_map(|polygon| std::iter::once(polygon.exterior()).chain(polygon.interiors()))
        .map(|ring| ring_distance(point, ring))
        .fold(f64::INFINITY, f64::min)
}

/// Distance in miles from `point` to the nearest edge of `bbox`, zero inside it
///
/// Uses the same projection as [`point_to_segment_distance`], so it never
/// exceeds the boundary distance of any geometry the box encloses.
#[must_use]
pub fn point_to_bbox_distance(point: Coord<f64>, bbox: &BoundingBox) -> f64 {
    let lon_scale = MILES_PER_DEGREE * point.y.to_radians().cos();
    let dx = (bbox.min_lon - point.x).max(point.x - bbox.max_lon).max(0.0);
    let dy = (bbox.min_lat - point.y).max(point.y - bbox.max_lat).max(0.0);
    (dx * lon_scale).hypot(dy * MILES_PER_DEGREE)
}

fn ring_distance(point: Coord<f64>, ring: &LineString<f64>) -> f64 {
    let coords = &ring.0;
    match coords.len() {
        0 => f64::INFINITY,
        1 => point_to_segment_distance(point, coords[0], coords[0]),
        n => {
            let mut min = f64::INFINITY;
            let mut j = n - 1;
            for i in 0..n {
                min = min.min(point_to_segment_distance(point, coords[j], coords[i]));
                j = i;
            }
            min
        }
    }
}

fn on_segment(p: Coord<f64>, a: Coord<f64>, b: Coord<f64>) -> bool {
    let cross = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
    if cross.abs() > EDGE_EPSILON {
        return false;
    }
    p.x >= a.x.min(b.x) - EDGE_EPSILON
        && p.x <= a.x.max(b.x) + EDGE_EPSILON
        && p.y >= a.y.min(b.y) - EDGE_EPSILON
        && p.y <= a.y.max(b.y) + EDGE_EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{LineString, MultiPolygon, coord, polygon};
    use rstest::rstest;

    fn square() -> Polygon<f64> {
        polygon![
            (x: -112.0, y: 40.0),
            (x: -111.0, y: 40.0),
            (x: -111.0, y: 41.0),
            (x: -112.0, y: 41.0),
        ]
    }

    fn square_with_hole() -> Polygon<f64> {
        polygon!(
            exterior: [
                (x: -112.0, y: 40.0),
                (x: -111.0, y: 40.0),
                (x: -111.0, y: 41.0),
                (x: -112.0, y: 41.0),
            ],
            interiors: [
                [
                    (x: -111.75, y: 40.25),
                    (x: -111.25, y: 40.25),
                    (x: -111.25, y: 40.75),
                    (x: -111.75, y: 40.75),
                ],
            ],
        )
    }

    #[rstest]
    #[case(coord! { x: -111.5, y: 40.5 }, true)]
    #[case(coord! { x: -112.0, y: 40.5 }, true)] // west edge
    #[case(coord! { x: -111.5, y: 41.0 }, true)] // north edge
    #[case(coord! { x: -111.0, y: 40.0 }, true)] // corner
    #[case(coord! { x: -110.9, y: 40.5 }, false)]
    #[case(coord! { x: -111.5, y: 41.000_001 }, false)]
    fn test_point_in_ring(#[case] point: Coord<f64>, #[case] expected: bool) {
        assert_eq!(point_in_ring(point, square().exterior()), expected);
    }

    #[test]
    fn test_unclosed_ring_has_closing_edge() {
        let ring = LineString::from(vec![(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]);
        assert!(point_in_ring(coord! { x: 1.0, y: 1.0 }, &ring));
        assert!(point_in_ring(coord! { x: 0.0, y: 1.0 }, &ring));
    }

    #[test]
    fn test_degenerate_ring_contains_nothing() {
        let ring = LineString::from(vec![(0.0, 0.0), (1.0, 1.0)]);
        assert!(!point_in_ring(coord! { x: 0.5, y: 0.5 }, &ring));
    }

    #[test]
    fn test_hole_exclusion() {
        let polygon = square_with_hole();
        assert!(!point_in_polygon(coord! { x: -111.5, y: 40.5 }, &polygon));
        assert!(point_in_polygon(coord! { x: -111.9, y: 40.1 }, &polygon));
        // hole edge belongs to the hole
        assert!(!point_in_polygon(coord! { x: -111.75, y: 40.5 }, &polygon));
    }

    #[test]
    fn test_multipolygon_containment() {
        let far = polygon![
            (x: -100.0, y: 30.0),
            (x: -99.0, y: 30.0),
            (x: -99.0, y: 31.0),
        ];
        let geometry = RegionGeometry::MultiPolygon(MultiPolygon::new(vec![far, square()]));
        assert!(point_in_geometry(coord! { x: -111.5, y: 40.5 }, &geometry));
        assert!(!point_in_geometry(coord! { x: -105.0, y: 35.0 }, &geometry));
    }

    #[test]
    fn test_segment_distance_perpendicular() {
        // due east of a north-south edge, one degree of longitude at 40.5N
        let point = coord! { x: -110.0, y: 40.5 };
        let distance = point_to_segment_distance(
            point,
            coord! { x: -111.0, y: 40.0 },
            coord! { x: -111.0, y: 41.0 },
        );
        let expected = MILES_PER_DEGREE * 40.5_f64.to_radians().cos();
        assert!((distance - expected).abs() < 1e-9);
    }

    #[test]
    fn test_segment_distance_clamps_to_endpoint() {
        let point = coord! { x: -111.0, y: 42.0 };
        let distance = point_to_segment_distance(
            point,
            coord! { x: -111.0, y: 40.0 },
            coord! { x: -111.0, y: 41.0 },
        );
        assert!((distance - MILES_PER_DEGREE).abs() < 1e-9);
    }

    #[test]
    fn test_zero_length_segment() {
        let point = coord! { x: 0.0, y: 0.0 };
        let a = coord! { x: 0.0, y: 1.0 };
        assert!((point_to_segment_distance(point, a, a) - MILES_PER_DEGREE).abs() < 1e-9);
    }

    #[test]
    fn test_boundary_distance_uses_nearest_ring() {
        let geometry = RegionGeometry::Polygon(square_with_hole());
        // inside the hole, nearest boundary is the hole edge 0.25 degrees west
        let point = coord! { x: -111.5, y: 40.5 };
        let distance = point_to_boundary_distance(point, &geometry);
        let expected = 0.25 * MILES_PER_DEGREE * 40.5_f64.to_radians().cos();
        assert!((distance - expected).abs() < 1e-9);
    }

    #[test]
    fn test_bbox_distance_is_lower_bound() {
        let polygon = square();
        let geometry = RegionGeometry::Polygon(polygon.clone());
        let bbox = BoundingBox::enclosing(polygon.exterior().0.iter()).unwrap();

        assert_eq!(point_to_bbox_distance(coord! { x: -111.5, y: 40.5 }, &bbox), 0.0);
        for point in [
            coord! { x: -109.0, y: 40.5 },
            coord! { x: -113.0, y: 42.0 },
            coord! { x: -111.5, y: 39.0 },
        ] {
            let lower = point_to_bbox_distance(point, &bbox);
            let exact = point_to_boundary_distance(point, &geometry);
            assert!(lower > 0.0);
            assert!(lower <= exact + 1e-9);
        }
    }

    #[test]
    fn test_approximation_close_to_great_circle_at_short_range() {
        let point = coord! { x: -110.5, y: 40.5 };
        let approx = point_to_segment_distance(
            point,
            coord! { x: -111.0, y: 40.5 },
            coord! { x: -111.0, y: 40.5 },
        );
        let great_circle = haversine::distance(
            haversine::Location {
                latitude: 40.5,
                longitude: -110.5,
            },
            haversine::Location {
                latitude: 40.5,
                longitude: -111.0,
            },
            haversine::Units::Miles,
        );
        assert!((approx - great_circle).abs() / great_circle < 0.02);
    }
}
