use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::state::AppState;

/// Create the API router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health
        .route("/health", get(handlers::health_check))

        // Proximity search
        .route("/api/v1/reports/nearby", get(handlers::nearby_reports))

        // Reports
        .route("/api/v1/reports", post(handlers::create_report))
        .route(
            "/api/v1/reports/{id}",
            get(handlers::get_report)
                .put(handlers::update_report)
                .delete(handlers::delete_report),
        )

        .with_state(state)
}
