//! Structured output types for JSON mode and table rendering

use civicmap_core::models::{GeoPoint, RankedResult, ResumeToken};
use serde::Serialize;
use tabled::Tabled;

/// Output for the nearby command
#[derive(Debug, Serialize)]
pub struct NearbyOutput {
    pub origin: GeoPoint,
    pub page_size: usize,
    pub pages: usize,
    pub results: Vec<NearbyItem>,
    pub has_more: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_resume: Option<ResumeToken>,
}

#[derive(Debug, Serialize)]
pub struct NearbyItem {
    pub id: u64,
    pub title: String,
    /// Meters from the origin
    pub distance: f64,
    pub location: GeoPoint,
}

impl NearbyItem {
    pub fn new(result: &RankedResult, title: String) -> Self {
        Self {
            id: result.id().0,
            title,
            distance: result.distance,
            location: result.record.location,
        }
    }
}

#[derive(Tabled)]
pub struct NearbyRow {
    #[tabled(rename = "#")]
    pub rank: usize,
    #[tabled(rename = "ID")]
    pub id: u64,
    #[tabled(rename = "Title")]
    pub title: String,
    #[tabled(rename = "Distance")]
    pub distance: String,
    #[tabled(rename = "Location")]
    pub location: String,
}

impl NearbyRow {
    pub fn new(rank: usize, item: &NearbyItem) -> Self {
        Self {
            rank,
            id: item.id,
            title: item.title.clone(),
            distance: format_distance(item.distance),
            location: item.location.to_string(),
        }
    }
}

/// Meters below one kilometer, kilometers above
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{:.1} m", meters)
    } else {
        format!("{:.2} km", meters / 1000.0)
    }
}
