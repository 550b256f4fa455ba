use civicmap_core::models::GeoPoint;
use geo::{Distance, Haversine, Point};
use std::cmp::Ordering;

/// Mean Earth radius in meters (GRS80), the radius `geo::Haversine` uses
pub const EARTH_RADIUS_METERS: f64 = 6_371_008.8;

/// Distance between two points, in meters
pub trait DistanceMetric: Send + Sync {
    fn distance(&self, a: &GeoPoint, b: &GeoPoint) -> f64;
}

/// Convert to a `geo` point. `geo` is x/y, so longitude goes first.
pub fn to_geo_point(point: &GeoPoint) -> Point {
    Point::new(point.longitude(), point.latitude())
}

/// Great-circle distance on a sphere of radius [`EARTH_RADIUS_METERS`]
#[derive(Debug, Clone, Copy, Default)]
pub struct HaversineMetric;

impl DistanceMetric for HaversineMetric {
    fn distance(&self, a: &GeoPoint, b: &GeoPoint) -> f64 {
        // Evaluate in a canonical argument order so the result is bit-identical
        // regardless of which point is the origin.
        let (first, second) = match canonical_cmp(a, b) {
            Ordering::Greater => (b, a),
            _ => (a, b),
        };

        Haversine.distance(to_geo_point(first), to_geo_point(second))
    }
}

fn canonical_cmp(a: &GeoPoint, b: &GeoPoint) -> Ordering {
    a.latitude()
        .total_cmp(&b.latitude())
        .then_with(|| a.longitude().total_cmp(&b.longitude()))
}
