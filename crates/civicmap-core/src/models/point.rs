//! Validated WGS 84 coordinate pair.
//!
//! Axis order is latitude first, then longitude, everywhere in this workspace.
//! Adapters that speak GeoJSON (`[lng, lat]`) or `geo::Point` (`x = lng`)
//! convert at their boundary.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CivicmapError, Result};

/// An immutable coordinate pair with latitude in [-90, 90] and longitude in [-180, 180]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPoint")]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

/// Unvalidated wire form, checked through `TryFrom`
#[derive(Deserialize)]
struct RawPoint {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawPoint> for GeoPoint {
    type Error = CivicmapError;

    fn try_from(raw: RawPoint) -> Result<Self> {
        GeoPoint::new(raw.latitude, raw.longitude)
    }
}

impl GeoPoint {
    /// Create a point, rejecting non-finite or out-of-range coordinates
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);

        if !valid {
            return Err(CivicmapError::InvalidCoordinate { latitude, longitude });
        }

        Ok(Self { latitude, longitude })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_boundaries() {
        assert!(GeoPoint::new(90.0, 180.0).is_ok());
        assert!(GeoPoint::new(-90.0, -180.0).is_ok());
        assert!(GeoPoint::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn test_rejects_out_of_range() {
        for (lat, lng) in [(90.0001, 0.0), (-91.0, 0.0), (0.0, 180.5), (0.0, -181.0)] {
            let err = GeoPoint::new(lat, lng).unwrap_err();
            assert!(matches!(err, CivicmapError::InvalidCoordinate { .. }));
        }
    }

    #[test]
    fn test_rejects_non_finite() {
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_deserialization_validates() {
        let ok: GeoPoint = serde_json::from_str(r#"{"latitude": 50.0, "longitude": 14.0}"#).unwrap();
        assert_eq!(ok.latitude(), 50.0);
        assert_eq!(ok.longitude(), 14.0);

        let bad = serde_json::from_str::<GeoPoint>(r#"{"latitude": 120.0, "longitude": 14.0}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_serialization_is_latitude_first() {
        let point = GeoPoint::new(50.0, 14.0).unwrap();
        let json = serde_json::to_string(&point).unwrap();
        assert_eq!(json, r#"{"latitude":50.0,"longitude":14.0}"#);
    }
}
