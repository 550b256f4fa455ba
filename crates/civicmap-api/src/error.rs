use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use civicmap_core::error::CivicmapError;
use serde::Serialize;

/// Unified API error type
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<String>,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into(), details: None }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
            details: self.details,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<CivicmapError> for ApiError {
    fn from(err: CivicmapError) -> Self {
        match &err {
            CivicmapError::AccessDenied => Self::forbidden("Access denied"),
            CivicmapError::RecordNotFound { .. } => {
                Self::not_found("Report not found").with_details(err.to_string())
            }
            CivicmapError::StoreUnavailable { .. } => {
                tracing::error!(error = %err, "Record store unavailable");
                Self::service_unavailable("Record store unavailable").with_details(err.to_string())
            }
            _ if err.is_client_error() => {
                tracing::debug!(error = %err, "Rejected invalid request");
                Self::bad_request("Invalid request").with_details(err.to_string())
            }
            _ => Self::internal("Internal error").with_details(err.to_string()),
        }
    }
}
