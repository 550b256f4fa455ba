//! Error types for Civicmap

use thiserror::Error;

use crate::models::RecordId;

#[derive(Debug, Error)]
pub enum CivicmapError {
    // Query validation errors
    #[error("Invalid coordinate: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("Page size {requested} outside the allowed range 1..={max}")]
    PageSizeExceeded { requested: usize, max: usize },

    #[error("Invalid resume token: {reason}")]
    InvalidCursor { reason: String },

    #[error("Invalid report {field}: {reason}")]
    InvalidReport { field: String, reason: String },

    // Store errors
    #[error("Record store unavailable: {reason}")]
    StoreUnavailable { reason: String },

    #[error("Record not found: {id}")]
    RecordNotFound { id: RecordId },

    #[error("Access denied")]
    AccessDenied,

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CivicmapError {
    /// Whether the error was caused by the caller's request rather than the system
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CivicmapError::InvalidCoordinate { .. }
                | CivicmapError::PageSizeExceeded { .. }
                | CivicmapError::InvalidCursor { .. }
                | CivicmapError::InvalidReport { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, CivicmapError>;
