use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::GeoPoint;
use crate::error::{CivicmapError, Result};

/// Unique identifier for a stored record
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of the user issuing a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(pub u64);

/// The location-bearing view of a record that proximity search ranks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpatialRecord {
    pub id: RecordId,
    pub location: GeoPoint,
}

impl SpatialRecord {
    pub fn new(id: RecordId, location: GeoPoint) -> Self {
        Self { id, location }
    }
}

/// Triage status of a report, stored as its integer code
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ReportState {
    #[default]
    Waiting,
    Accepted,
    Solved,
    Rejected,
}

impl ReportState {
    pub fn code(self) -> u8 {
        match self {
            ReportState::Waiting => 0,
            ReportState::Accepted => 1,
            ReportState::Solved => 2,
            ReportState::Rejected => 3,
        }
    }
}

impl TryFrom<u8> for ReportState {
    type Error = CivicmapError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0 => Ok(ReportState::Waiting),
            1 => Ok(ReportState::Accepted),
            2 => Ok(ReportState::Solved),
            3 => Ok(ReportState::Rejected),
            _ => Err(CivicmapError::InvalidReport {
                field: "state".to_string(),
                reason: format!("unknown state code {}, expected 0..=3", code),
            }),
        }
    }
}

impl From<ReportState> for u8 {
    fn from(state: ReportState) -> Self {
        state.code()
    }
}

/// A citizen-submitted issue report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: RecordId,
    pub title: String,
    pub state: ReportState,
    pub category_id: u64,
    pub territory_id: u64,
    pub owner_id: ActorId,
    pub location: GeoPoint,
    pub created_at: DateTime<Utc>,
}

impl Report {
    pub fn spatial(&self) -> SpatialRecord {
        SpatialRecord::new(self.id, self.location)
    }

    pub fn apply(&mut self, update: ReportUpdate) {
        self.title = update.title;
        self.state = update.state;
        self.location = update.location;
    }
}

/// Fields supplied when creating a report; the store assigns id and timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReport {
    pub title: String,
    pub state: ReportState,
    pub category_id: u64,
    pub territory_id: u64,
    pub owner_id: ActorId,
    pub location: GeoPoint,
}

/// Editable fields of an existing report, replaced together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportUpdate {
    pub title: String,
    pub state: ReportState,
    pub location: GeoPoint,
}

/// Store-side candidate filter. Empty fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFilter {
    pub category_id: Option<u64>,
    pub territory_id: Option<u64>,
}

impl RecordFilter {
    pub fn matches(&self, report: &Report) -> bool {
        self.category_id.map_or(true, |c| c == report.category_id)
            && self.territory_id.map_or(true, |t| t == report.territory_id)
    }
}
