use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use civicmap_core::error::CivicmapError;
use civicmap_core::models::{NewReport, RecordId, Report, ReportState};

use crate::access::{Actor, Resource};
use crate::dto::{
    CreateReportRequest, CreateReportResponse, DeleteResponse, ReportResponse, UpdateReportRequest,
};
use crate::error::ApiError;
use crate::state::AppState;

async fn load_report(state: &AppState, id: u64) -> Result<Report, ApiError> {
    state
        .store
        .get(RecordId(id))
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Report {} not found", id)))
}

pub async fn create_report(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Json(request): Json<CreateReportRequest>,
) -> Result<(StatusCode, Json<CreateReportResponse>), ApiError> {
    state.authorize(&actor, &Resource::NewReport)?;
    let owner_id = actor.id().ok_or(CivicmapError::AccessDenied)?;

    let location = request.location.to_point()?;
    let report_state = ReportState::try_from(request.state)?;
    let id = state
        .store
        .create(NewReport {
            title: request.title,
            state: report_state,
            category_id: request.category_id,
            territory_id: request.territory_id,
            owner_id,
            location,
        })
        .await?;

    tracing::info!(report_id = %id, %location, "Report created");

    Ok((StatusCode::CREATED, Json(CreateReportResponse { id: id.0 })))
}

pub async fn get_report(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Path(id): Path<u64>,
) -> Result<Json<ReportResponse>, ApiError> {
    let report = load_report(&state, id).await?;
    state.authorize(&actor, &Resource::Report { id: report.id, owner_id: report.owner_id })?;

    Ok(Json(ReportResponse::from(report)))
}

pub async fn update_report(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Path(id): Path<u64>,
    Json(request): Json<UpdateReportRequest>,
) -> Result<Json<ReportResponse>, ApiError> {
    let report = load_report(&state, id).await?;
    state.authorize(&actor, &Resource::ReportMutation { id: report.id, owner_id: report.owner_id })?;

    let update = request.to_update()?;
    let moved = update.location != report.location;
    state.store.update(report.id, update).await?;
    let updated = load_report(&state, id).await?;

    tracing::info!(report_id = id, state = updated.state.code(), moved, "Report updated");

    Ok(Json(ReportResponse::from(updated)))
}

pub async fn delete_report(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Path(id): Path<u64>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let report = load_report(&state, id).await?;
    state.authorize(&actor, &Resource::ReportMutation { id: report.id, owner_id: report.owner_id })?;

    if !state.store.delete(report.id).await? {
        return Err(ApiError::not_found(format!("Report {} not found", id)));
    }

    tracing::info!(report_id = id, "Report deleted");

    Ok(Json(DeleteResponse::success("report", &id.to_string())))
}
