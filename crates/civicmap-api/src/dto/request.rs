use civicmap_core::error::Result;
use civicmap_core::models::{GeoPoint, RecordFilter, ReportState, ReportUpdate};
use serde::Deserialize;

/// Query string of the nearby search endpoint
#[derive(Debug, Deserialize)]
pub struct NearbyParams {
    pub lat: f64,
    pub lng: f64,
    pub page_size: Option<usize>,
    /// Token from the previous page's `next_resume`
    pub resume: Option<String>,
    pub category_id: Option<u64>,
    pub territory_id: Option<u64>,
}

impl NearbyParams {
    pub fn origin(&self) -> Result<GeoPoint> {
        GeoPoint::new(self.lat, self.lng)
    }

    pub fn filter(&self) -> RecordFilter {
        RecordFilter {
            category_id: self.category_id,
            territory_id: self.territory_id,
        }
    }
}

/// Coordinates as sent by clients, validated after deserialization
#[derive(Debug, Deserialize)]
pub struct LocationInput {
    pub latitude: f64,
    pub longitude: f64,
}

impl LocationInput {
    pub fn to_point(&self) -> Result<GeoPoint> {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// Report creation body
#[derive(Debug, Deserialize)]
pub struct CreateReportRequest {
    pub title: String,
    /// State code, 0 (waiting) when omitted
    #[serde(default)]
    pub state: u8,
    pub category_id: u64,
    pub territory_id: u64,
    pub location: LocationInput,
}

/// Full replacement of a report's editable fields
#[derive(Debug, Deserialize)]
pub struct UpdateReportRequest {
    pub title: String,
    pub state: u8,
    pub location: LocationInput,
}

impl UpdateReportRequest {
    pub fn to_update(&self) -> Result<ReportUpdate> {
        Ok(ReportUpdate {
            title: self.title.clone(),
            state: ReportState::try_from(self.state)?,
            location: self.location.to_point()?,
        })
    }
}
