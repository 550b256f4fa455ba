//! Civicmap Geo - Great-circle distance
//!
//! This crate holds the single distance metric used both for ranking
//! proximity results and for the distance reported back to clients.

pub mod distance;

pub use distance::{to_geo_point, DistanceMetric, HaversineMetric, EARTH_RADIUS_METERS};
