use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use civicmap_core::models::{ProximityQuery, ResumeToken};

use crate::access::{Actor, Resource};
use crate::dto::{NearbyParams, NearbyResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// Distance-ranked reports around a point, one page at a time
pub async fn nearby_reports(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Query(params): Query<NearbyParams>,
) -> Result<Json<NearbyResponse>, ApiError> {
    tracing::info!(
        lat = params.lat,
        lng = params.lng,
        page_size = ?params.page_size,
        resumed = params.resume.is_some(),
        "Processing nearby request"
    );

    state.authorize(&actor, &Resource::NearbyReports)?;

    let page_size = params.page_size.unwrap_or(state.engine.settings().default_page_size);
    let mut query = ProximityQuery::new(params.origin()?)
        .with_page_size(page_size)
        .with_filter(params.filter());

    if let Some(token) = params.resume.as_deref() {
        query = query.resume_after(token.parse::<ResumeToken>()?);
    }

    let page = state.engine.search(&query).await?;

    Ok(Json(NearbyResponse::from(&page)))
}
