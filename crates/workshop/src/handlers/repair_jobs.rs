//! Repair job handlers.
//!
//! Writes go through the scheduling coordinator, so the same duration and
//! lifecycle rules apply here as in any other client.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use workshop_core::booking::{CreateRepairJobRequest, RepairJob, UpdateRepairJobRequest};
use workshop_core::schedule::scope_records;
use workshop_core::storage::{RepairJobRepository, RepositoryError};

use super::reservations::CancelQuery;
use crate::{context::RequestContext, handlers::AppError, state::AppState};

/// List repair jobs visible to the caller (GET /api/repair-jobs).
pub async fn list_repair_jobs(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<Json<Vec<RepairJob>>, AppError> {
    let repair_jobs = state.store.list_repair_jobs().await?;
    Ok(Json(scope_records(&ctx.identity, repair_jobs)))
}

/// Get a single repair job (GET /api/repair-jobs/{id}).
pub async fn get_repair_job(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
) -> Result<Json<RepairJob>, AppError> {
    state
        .coordinator
        .repair_job_detail(&ctx.identity, id)
        .await?
        .map(Json)
        .ok_or_else(|| RepositoryError::not_found("RepairJob", id).into())
}

/// Create a repair job (POST /api/repair-jobs).
pub async fn create_repair_job(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(request): Json<CreateRepairJobRequest>,
) -> Result<impl IntoResponse, AppError> {
    tracing::debug!(request_id = %ctx.request_id, request = ?request, "Received create repair job request");

    let job = state
        .coordinator
        .create_repair_job(&ctx.identity, request)
        .await?;

    Ok((StatusCode::CREATED, Json(job)))
}

/// Update a repair job (PUT /api/repair-jobs/{id}).
pub async fn update_repair_job(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateRepairJobRequest>,
) -> Result<Json<RepairJob>, AppError> {
    let job = state
        .coordinator
        .update_repair_job(&ctx.identity, id, request)
        .await?;

    Ok(Json(job))
}

/// Cancel a repair job (POST /api/repair-jobs/{id}/cancel).
pub async fn cancel_repair_job(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
    Query(query): Query<CancelQuery>,
) -> Result<Json<RepairJob>, AppError> {
    let job = state
        .coordinator
        .cancel_repair_job(&ctx.identity, id, query.expected_version)
        .await?;

    Ok(Json(job))
}

/// Delete a repair job (DELETE /api/repair-jobs/{id}).
pub async fn delete_repair_job(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.coordinator.delete_repair_job(&ctx.identity, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
