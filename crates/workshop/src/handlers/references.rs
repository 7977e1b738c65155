//! Read-only reference data handlers.

use axum::{extract::State, Json};

use workshop_core::booking::{Car, Client, Mechanic, Service};
use workshop_core::storage::ReferenceRepository;

use crate::{handlers::AppError, state::AppState};

/// List clients (GET /api/clients).
pub async fn list_clients(State(state): State<AppState>) -> Result<Json<Vec<Client>>, AppError> {
    Ok(Json(state.store.list_clients().await?))
}

/// List mechanics (GET /api/mechanics).
pub async fn list_mechanics(
    State(state): State<AppState>,
) -> Result<Json<Vec<Mechanic>>, AppError> {
    Ok(Json(state.store.list_mechanics().await?))
}

/// List services (GET /api/services).
pub async fn list_services(State(state): State<AppState>) -> Result<Json<Vec<Service>>, AppError> {
    Ok(Json(state.store.list_services().await?))
}

/// List cars (GET /api/cars).
pub async fn list_cars(State(state): State<AppState>) -> Result<Json<Vec<Car>>, AppError> {
    Ok(Json(state.store.list_cars().await?))
}
