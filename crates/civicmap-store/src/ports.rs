use async_trait::async_trait;
use civicmap_core::error::Result;
use civicmap_core::models::{NewReport, RecordFilter, RecordId, Report, ReportUpdate, SpatialRecord};
use std::sync::Arc;

/// Port supplying candidate records for proximity search
///
/// Implementations may return the full record set or any subset matching the
/// filter. Ranking, resumption and paging are the caller's concern, so an
/// index-backed store can replace a scanning one without changing callers.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Snapshot of location-bearing records matching the filter
    async fn candidates(&self, filter: &RecordFilter) -> Result<Vec<SpatialRecord>>;
}

/// Port for report persistence
#[async_trait]
pub trait ReportStore: RecordStore {
    /// Store a new report and return its assigned ID
    async fn create(&self, report: NewReport) -> Result<RecordId>;

    /// Retrieve a report by ID
    async fn get(&self, id: RecordId) -> Result<Option<Report>>;

    /// Replace a report's title, state and location
    async fn update(&self, id: RecordId, update: ReportUpdate) -> Result<()>;

    /// Delete a report, returning whether it existed
    async fn delete(&self, id: RecordId) -> Result<bool>;
}

#[async_trait]
impl<T: RecordStore + ?Sized> RecordStore for Arc<T> {
    async fn candidates(&self, filter: &RecordFilter) -> Result<Vec<SpatialRecord>> {
        (**self).candidates(filter).await
    }
}
