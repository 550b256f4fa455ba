mod request;
mod response;

pub use request::{CreateReportRequest, LocationInput, NearbyParams, UpdateReportRequest};
pub use response::{
    CreateReportResponse, DeleteResponse, HealthResponse, NearbyItem, NearbyResponse,
    ReportResponse,
};
