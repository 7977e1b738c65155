//! Reservation handlers.
//!
//! Writes go through the scheduling coordinator, so the same duration and
//! lifecycle rules apply here as in any other client.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use workshop_core::booking::{CreateReservationRequest, Reservation, UpdateReservationRequest};
use workshop_core::schedule::scope_records;
use workshop_core::storage::{RepositoryError, ReservationRepository};

use crate::{context::RequestContext, handlers::AppError, state::AppState};

/// Query parameters for cancel endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct CancelQuery {
    #[serde(default)]
    pub expected_version: Option<u64>,
}

/// List reservations visible to the caller (GET /api/reservations).
pub async fn list_reservations(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<Json<Vec<Reservation>>, AppError> {
    let reservations = state.store.list_reservations().await?;
    Ok(Json(scope_records(&ctx.identity, reservations)))
}

/// Get a single reservation (GET /api/reservations/{id}).
pub async fn get_reservation(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
) -> Result<Json<Reservation>, AppError> {
    state
        .coordinator
        .reservation_detail(&ctx.identity, id)
        .await?
        .map(Json)
        .ok_or_else(|| RepositoryError::not_found("Reservation", id).into())
}

/// Create a reservation (POST /api/reservations).
pub async fn create_reservation(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(request): Json<CreateReservationRequest>,
) -> Result<impl IntoResponse, AppError> {
    tracing::debug!(request_id = %ctx.request_id, request = ?request, "Received create reservation request");

    let reservation = state
        .coordinator
        .create_reservation(&ctx.identity, request)
        .await?;

    Ok((StatusCode::CREATED, Json(reservation)))
}

/// Update a reservation (PUT /api/reservations/{id}).
pub async fn update_reservation(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateReservationRequest>,
) -> Result<Json<Reservation>, AppError> {
    let reservation = state
        .coordinator
        .update_reservation(&ctx.identity, id, request)
        .await?;

    Ok(Json(reservation))
}

/// Cancel a reservation (POST /api/reservations/{id}/cancel).
pub async fn cancel_reservation(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
    Query(query): Query<CancelQuery>,
) -> Result<Json<Reservation>, AppError> {
    let reservation = state
        .coordinator
        .cancel_reservation(&ctx.identity, id, query.expected_version)
        .await?;

    Ok(Json(reservation))
}

/// Delete a reservation (DELETE /api/reservations/{id}).
pub async fn delete_reservation(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.coordinator.delete_reservation(&ctx.identity, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
