//! In-memory storage implementation for development and testing.
//!
//! This implementation uses `RwLock::unwrap()` intentionally. Lock poisoning
//! only occurs when another thread panicked while holding the lock, which is
//! an unrecoverable state. For production workloads, use the PostgreSQL backend.

use async_trait::async_trait;
use chrono::Utc;
use civicmap_core::error::{CivicmapError, Result};
use civicmap_core::models::{NewReport, RecordFilter, RecordId, Report, ReportUpdate, SpatialRecord};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::ports::{RecordStore, ReportStore};

/// In-memory implementation of ReportStore
#[derive(Debug, Clone)]
pub struct MemoryReportStore {
    reports: Arc<RwLock<HashMap<RecordId, Report>>>,
    next_id: Arc<RwLock<u64>>,
}

impl Default for MemoryReportStore {
    fn default() -> Self {
        Self {
            reports: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(RwLock::new(1)),
        }
    }
}

impl MemoryReportStore {
    /// Create a new in-memory report store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a report under its own ID, replacing any existing one.
    ///
    /// Used when loading records that already carry identifiers.
    pub fn insert(&self, report: Report) {
        let mut reports = self.reports.write().unwrap();
        let mut next_id = self.next_id.write().unwrap();

        *next_id = (*next_id).max(report.id.0.saturating_add(1));
        reports.insert(report.id, report);
    }

    /// Number of stored reports
    pub fn len(&self) -> usize {
        self.reports.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl RecordStore for MemoryReportStore {
    async fn candidates(&self, filter: &RecordFilter) -> Result<Vec<SpatialRecord>> {
        let reports = self.reports.read().unwrap();

        Ok(reports
            .values()
            .filter(|report| filter.matches(report))
            .map(Report::spatial)
            .collect())
    }
}

#[async_trait]
impl ReportStore for MemoryReportStore {
    async fn create(&self, report: NewReport) -> Result<RecordId> {
        let mut reports = self.reports.write().unwrap();
        let mut next_id = self.next_id.write().unwrap();

        let id = RecordId(*next_id);
        // Ids saturate at u64::MAX; never hand out one that is taken
        if reports.contains_key(&id) {
            return Err(CivicmapError::StoreUnavailable {
                reason: "report id space exhausted".to_string(),
            });
        }
        *next_id = next_id.saturating_add(1);

        reports.insert(
            id,
            Report {
                id,
                title: report.title,
                state: report.state,
                category_id: report.category_id,
                territory_id: report.territory_id,
                owner_id: report.owner_id,
                location: report.location,
                created_at: Utc::now(),
            },
        );

        Ok(id)
    }

    async fn get(&self, id: RecordId) -> Result<Option<Report>> {
        let reports = self.reports.read().unwrap();
        Ok(reports.get(&id).cloned())
    }

    async fn update(&self, id: RecordId, update: ReportUpdate) -> Result<()> {
        let mut reports = self.reports.write().unwrap();
        match reports.get_mut(&id) {
            Some(report) => {
                report.apply(update);
                Ok(())
            }
            None => Err(CivicmapError::RecordNotFound { id }),
        }
    }

    async fn delete(&self, id: RecordId) -> Result<bool> {
        let mut reports = self.reports.write().unwrap();
        Ok(reports.remove(&id).is_some())
    }
}
