use chrono::{DateTime, Utc};
use civicmap_core::models::{
    GeoPoint, ProximityPage, RankedResult, Report, ReportState, ResumeToken,
};
use serde::Serialize;

/// A single nearby search hit
#[derive(Debug, Serialize)]
pub struct NearbyItem {
    pub id: u64,
    /// Meters from the query origin
    pub distance: f64,
    pub location: GeoPoint,
}

impl From<&RankedResult> for NearbyItem {
    fn from(result: &RankedResult) -> Self {
        Self {
            id: result.id().0,
            distance: result.distance,
            location: result.record.location,
        }
    }
}

/// Nearby search page
#[derive(Debug, Serialize)]
pub struct NearbyResponse {
    pub results: Vec<NearbyItem>,
    pub has_more: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_resume: Option<ResumeToken>,
}

impl From<&ProximityPage> for NearbyResponse {
    fn from(page: &ProximityPage) -> Self {
        Self {
            results: page.results.iter().map(NearbyItem::from).collect(),
            has_more: page.has_more,
            next_resume: page.next_resume(),
        }
    }
}

/// Report detail
#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub id: u64,
    pub title: String,
    pub state: ReportState,
    pub category_id: u64,
    pub territory_id: u64,
    pub owner_id: u64,
    pub location: GeoPoint,
    pub created_at: DateTime<Utc>,
}

impl From<Report> for ReportResponse {
    fn from(report: Report) -> Self {
        Self {
            id: report.id.0,
            title: report.title,
            state: report.state,
            category_id: report.category_id,
            territory_id: report.territory_id,
            owner_id: report.owner_id.0,
            location: report.location,
            created_at: report.created_at,
        }
    }
}

/// Report creation response
#[derive(Debug, Serialize)]
pub struct CreateReportResponse {
    pub id: u64,
}

/// Delete operation response
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

impl DeleteResponse {
    pub fn success(entity: &str, id: &str) -> Self {
        Self {
            success: true,
            message: format!("Successfully deleted {} {}", entity, id),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self { status: "ok", service: "civicmap-api" }
    }
}
