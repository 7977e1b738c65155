use async_trait::async_trait;
use uuid::Uuid;

use crate::booking::{
    Car, Client, CreateRepairJobRequest, CreateReservationRequest, Mechanic, RepairJob,
    Reservation, Service, UpdateRepairJobRequest, UpdateReservationRequest,
};

use super::Result;

/// Data Store operations on reservations.
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Lists every reservation with its snapshots hydrated.
    async fn list_reservations(&self) -> Result<Vec<Reservation>>;

    /// Gets a reservation by its ID.
    async fn get_reservation(&self, id: Uuid) -> Result<Option<Reservation>>;

    /// Creates a reservation, registering the client and car first when the
    /// request carries a new client.
    async fn create_reservation(&self, request: &CreateReservationRequest) -> Result<Reservation>;

    /// Applies a partial update and returns the stored result.
    ///
    /// Fails with `Conflict` when `expected_version` is set and stale.
    async fn update_reservation(
        &self,
        id: Uuid,
        request: &UpdateReservationRequest,
    ) -> Result<Reservation>;

    /// Deletes a reservation by its ID.
    async fn delete_reservation(&self, id: Uuid) -> Result<()>;
}

/// Data Store operations on repair jobs.
#[async_trait]
pub trait RepairJobRepository: Send + Sync {
    /// Lists every repair job with its snapshots hydrated.
    async fn list_repair_jobs(&self) -> Result<Vec<RepairJob>>;

    /// Gets a repair job by its ID.
    async fn get_repair_job(&self, id: Uuid) -> Result<Option<RepairJob>>;

    /// Creates a repair job.
    async fn create_repair_job(&self, request: &CreateRepairJobRequest) -> Result<RepairJob>;

    /// Applies a partial update and returns the stored result.
    async fn update_repair_job(
        &self,
        id: Uuid,
        request: &UpdateRepairJobRequest,
    ) -> Result<RepairJob>;

    /// Deletes a repair job by its ID.
    async fn delete_repair_job(&self, id: Uuid) -> Result<()>;
}

/// Read access to the reference entities bookings point at.
#[async_trait]
pub trait ReferenceRepository: Send + Sync {
    async fn list_clients(&self) -> Result<Vec<Client>>;

    async fn list_mechanics(&self) -> Result<Vec<Mechanic>>;

    async fn list_services(&self) -> Result<Vec<Service>>;

    async fn list_cars(&self) -> Result<Vec<Car>>;
}

/// The full Data Store boundary consumed by the scheduling coordinator.
pub trait DataStore: ReservationRepository + RepairJobRepository + ReferenceRepository {}

impl<T> DataStore for T where T: ReservationRepository + RepairJobRepository + ReferenceRepository {}
