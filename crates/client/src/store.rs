//! Data Store backed by the workshop HTTP API.
//!
//! Lets the scheduling coordinator run on the client side against a remote
//! server. Transport failures surface as [`RepositoryError`] variants so the
//! coordinator can report partial loads.

use async_trait::async_trait;
use uuid::Uuid;
use workshop_core::booking::{
    Car, Client, CreateRepairJobRequest, CreateReservationRequest, Mechanic, RepairJob,
    Reservation, Service, UpdateRepairJobRequest, UpdateReservationRequest,
};
use workshop_core::storage::{
    RepairJobRepository, ReferenceRepository, ReservationRepository, Result as RepositoryResult,
};

use crate::client::WorkshopClient;
use crate::error::ClientError;

#[derive(Debug, Clone)]
pub struct HttpDataStore {
    client: WorkshopClient,
}

impl HttpDataStore {
    pub fn new(client: WorkshopClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &WorkshopClient {
        &self.client
    }
}

fn lift<T>(
    result: crate::error::Result<T>,
    entity_type: &'static str,
    id: impl ToString,
) -> RepositoryResult<T> {
    result.map_err(|err| {
        let id = id.to_string();
        tracing::debug!(entity_type, %id, error = %err, "Data Store request failed");
        err.into_repository_error(entity_type, &id)
    })
}

/// A 404 on a single-record lookup means the record is absent.
fn optional<T>(
    result: crate::error::Result<T>,
    entity_type: &'static str,
    id: Uuid,
) -> RepositoryResult<Option<T>> {
    match result {
        Ok(found) => Ok(Some(found)),
        Err(ClientError::NotFound { .. }) => Ok(None),
        Err(err) => lift(Err(err), entity_type, id),
    }
}

#[async_trait]
impl ReservationRepository for HttpDataStore {
    async fn list_reservations(&self) -> RepositoryResult<Vec<Reservation>> {
        lift(self.client.list_reservations().await, "Reservation", "")
    }

    async fn get_reservation(&self, id: Uuid) -> RepositoryResult<Option<Reservation>> {
        optional(self.client.get_reservation(id).await, "Reservation", id)
    }

    async fn create_reservation(
        &self,
        request: &CreateReservationRequest,
    ) -> RepositoryResult<Reservation> {
        lift(self.client.create_reservation(request).await, "Reservation", "")
    }

    async fn update_reservation(
        &self,
        id: Uuid,
        request: &UpdateReservationRequest,
    ) -> RepositoryResult<Reservation> {
        lift(self.client.update_reservation(id, request).await, "Reservation", id)
    }

    async fn delete_reservation(&self, id: Uuid) -> RepositoryResult<()> {
        lift(self.client.delete_reservation(id).await, "Reservation", id)
    }
}

#[async_trait]
impl RepairJobRepository for HttpDataStore {
    async fn list_repair_jobs(&self) -> RepositoryResult<Vec<RepairJob>> {
        lift(self.client.list_repair_jobs().await, "RepairJob", "")
    }

    async fn get_repair_job(&self, id: Uuid) -> RepositoryResult<Option<RepairJob>> {
        optional(self.client.get_repair_job(id).await, "RepairJob", id)
    }

    async fn create_repair_job(
        &self,
        request: &CreateRepairJobRequest,
    ) -> RepositoryResult<RepairJob> {
        lift(self.client.create_repair_job(request).await, "RepairJob", "")
    }

    async fn update_repair_job(
        &self,
        id: Uuid,
        request: &UpdateRepairJobRequest,
    ) -> RepositoryResult<RepairJob> {
        lift(self.client.update_repair_job(id, request).await, "RepairJob", id)
    }

    async fn delete_repair_job(&self, id: Uuid) -> RepositoryResult<()> {
        lift(self.client.delete_repair_job(id).await, "RepairJob", id)
    }
}

#[async_trait]
impl ReferenceRepository for HttpDataStore {
    async fn list_clients(&self) -> RepositoryResult<Vec<Client>> {
        lift(self.client.list_clients().await, "Client", "")
    }

    async fn list_mechanics(&self) -> RepositoryResult<Vec<Mechanic>> {
        lift(self.client.list_mechanics().await, "Mechanic", "")
    }

    async fn list_services(&self) -> RepositoryResult<Vec<Service>> {
        lift(self.client.list_services().await, "Service", "")
    }

    async fn list_cars(&self) -> RepositoryResult<Vec<Car>> {
        lift(self.client.list_cars().await, "Car", "")
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::{
        http::StatusCode,
        routing::{get, put},
        Json, Router,
    };
    use chrono::{TimeZone, Utc};
    use tokio::net::TcpListener;
    use workshop_core::booking::ReservationStatus;
    use workshop_core::schedule::{
        CallerIdentity, Granularity, ScheduleFilter, SchedulingCoordinator, ViewWindow,
    };

    use workshop_core::storage::RepositoryError;

    use super::*;

    fn fixed_reservation() -> Reservation {
        let start = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        let mut reservation = Reservation::new(Some(start), Some(end));
        reservation.version = 1;
        reservation
    }

    /// Serves a fixed reservation list, a 404 for single lookups, a 409 for
    /// updates and a 500 for repair jobs.
    async fn spawn_server() -> String {
        let reservation = fixed_reservation();
        let app = Router::new()
            .route(
                "/api/reservations",
                get(move || {
                    let reservation = reservation.clone();
                    async move { Json(vec![reservation]) }
                }),
            )
            .route(
                "/api/reservations/{id}",
                get(|| async { (StatusCode::NOT_FOUND, "Reservation not found") })
                    .put(|| async { (StatusCode::CONFLICT, "stale version") }),
            )
            .route(
                "/api/repair-jobs",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
            )
            .route("/api/repair-jobs/{id}", put(|| async { StatusCode::FORBIDDEN }));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_missing_record_is_none() {
        let store = HttpDataStore::new(WorkshopClient::new(spawn_server().await));

        let found = store.get_reservation(Uuid::new_v4()).await.unwrap();

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_server_errors_map_to_repository_errors() {
        let store = HttpDataStore::new(WorkshopClient::new(spawn_server().await));
        let id = Uuid::new_v4();

        let err = store
            .update_reservation(id, &UpdateReservationRequest::status(ReservationStatus::Completed))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Server { status: 409, .. }));

        let err = store
            .update_repair_job(id, &UpdateRepairJobRequest::new())
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_connection_failure() {
        let client = WorkshopClient::new("http://127.0.0.1:1")
            .with_timeout(Duration::from_secs(2))
            .unwrap();
        let store = HttpDataStore::new(client);

        let err = store.list_reservations().await.unwrap_err();

        assert!(matches!(err, RepositoryError::ConnectionFailed(_)));
    }

    #[tokio::test]
    async fn test_coordinator_renders_partial_view() {
        let store = HttpDataStore::new(WorkshopClient::new(spawn_server().await));
        let coordinator = SchedulingCoordinator::new(std::sync::Arc::new(store));
        let window = ViewWindow::new(
            Granularity::Week,
            chrono::NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        );

        let view = coordinator
            .load_view(
                &CallerIdentity::manager(),
                &ScheduleFilter::new(),
                "",
                window,
            )
            .await;

        assert_eq!(view.events.len(), 1);
        assert_eq!(view.failed, vec![workshop_core::booking::RecordKind::RepairJob]);
        assert!(view.is_partial());
    }
}
