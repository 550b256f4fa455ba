pub mod point;
pub mod query;
pub mod record;

pub use point::GeoPoint;
pub use query::{ProximityPage, ProximityQuery, RankedResult, ResumeToken};
pub use record::{
    ActorId, NewReport, RecordFilter, RecordId, Report, ReportState, ReportUpdate, SpatialRecord,
};
