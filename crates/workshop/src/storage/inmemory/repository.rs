//! In-memory Data Store implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use workshop_core::booking::{
    check_version, next_version, Car, Client, CreateRepairJobRequest, CreateReservationRequest,
    Mechanic, ReferenceIndex, RepairJob, Reservation, SeedData, Service, UpdateRepairJobRequest,
    UpdateReservationRequest,
};
use workshop_core::storage::{
    ReferenceRepository, RepairJobRepository, RepositoryError, ReservationRepository, Result,
};

/// In-memory storage backend.
///
/// Uses HashMaps wrapped in `Arc<RwLock<_>>` for thread-safe access. Bookings are
/// stored with foreign-key ids only; snapshots are hydrated from the reference
/// index on every read. Locks are always taken references first.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    references: Arc<RwLock<ReferenceIndex>>,
    reservations: Arc<RwLock<HashMap<Uuid, Reservation>>>,
    repair_jobs: Arc<RwLock<HashMap<Uuid, RepairJob>>>,
}

impl InMemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given dataset. Every booking starts at version 1.
    pub fn from_seed(seed: SeedData) -> Self {
        let references =
            ReferenceIndex::from_lists(seed.clients, seed.cars, seed.mechanics, seed.services);

        let reservations = seed
            .reservations
            .into_iter()
            .map(|mut reservation| {
                reservation.version = next_version(0);
                (reservation.id, strip_reservation(reservation))
            })
            .collect();
        let repair_jobs = seed
            .repair_jobs
            .into_iter()
            .map(|mut job| {
                job.version = next_version(0);
                (job.id, strip_repair_job(job))
            })
            .collect();

        Self {
            references: Arc::new(RwLock::new(references)),
            reservations: Arc::new(RwLock::new(reservations)),
            repair_jobs: Arc::new(RwLock::new(repair_jobs)),
        }
    }

    /// Number of stored reservations and repair jobs.
    pub async fn counts(&self) -> (usize, usize) {
        let reservations = self.reservations.read().await.len();
        let repair_jobs = self.repair_jobs.read().await.len();
        (reservations, repair_jobs)
    }
}

fn strip_reservation(mut reservation: Reservation) -> Reservation {
    reservation.client = None;
    reservation.car = None;
    reservation.mechanic = None;
    reservation.service = None;
    reservation
}

fn strip_repair_job(mut job: RepairJob) -> RepairJob {
    job.client = None;
    job.car = None;
    job.mechanic = None;
    job.service = None;
    job
}

/// Rejects ids that point at no known entity.
fn check_references(
    index: &ReferenceIndex,
    client_id: Option<Uuid>,
    car_id: Option<Uuid>,
    mechanic_id: Option<Uuid>,
    service_id: Option<Uuid>,
) -> Result<()> {
    let unknown = |what: &str, id: Uuid| RepositoryError::InvalidData(format!("Unknown {what}: {id}"));

    if let Some(id) = client_id.filter(|id| index.client(*id).is_none()) {
        return Err(unknown("client", id));
    }
    if let Some(id) = car_id.filter(|id| index.car(*id).is_none()) {
        return Err(unknown("car", id));
    }
    if let Some(id) = mechanic_id.filter(|id| index.mechanic(*id).is_none()) {
        return Err(unknown("mechanic", id));
    }
    if let Some(id) = service_id.filter(|id| index.service(*id).is_none()) {
        return Err(unknown("service", id));
    }
    Ok(())
}

#[async_trait]
impl ReservationRepository for InMemoryStore {
    async fn list_reservations(&self) -> Result<Vec<Reservation>> {
        let index = self.references.read().await;
        let reservations = self.reservations.read().await;

        let mut list: Vec<Reservation> = reservations
            .values()
            .cloned()
            .map(|mut reservation| {
                index.hydrate_reservation(&mut reservation);
                reservation
            })
            .collect();
        list.sort_by_key(|r| (r.visit_start, r.date_added));
        Ok(list)
    }

    async fn get_reservation(&self, id: Uuid) -> Result<Option<Reservation>> {
        let index = self.references.read().await;
        let reservations = self.reservations.read().await;

        Ok(reservations.get(&id).cloned().map(|mut reservation| {
            index.hydrate_reservation(&mut reservation);
            reservation
        }))
    }

    async fn create_reservation(&self, request: &CreateReservationRequest) -> Result<Reservation> {
        let records = request.clone().into_records(Utc::now());
        let mut reservation = records.reservation;

        let mut index = self.references.write().await;
        let mut reservations = self.reservations.write().await;

        // Records registered by this request are not in the index yet.
        let new_client_id = records.client.as_ref().map(|client| client.id);
        let new_car_id = records.car.as_ref().map(|car| car.id);
        check_references(
            &index,
            reservation.client_id.filter(|id| Some(*id) != new_client_id),
            reservation.car_id.filter(|id| Some(*id) != new_car_id),
            reservation.mechanic_id,
            reservation.service_id,
        )?;

        if reservations.contains_key(&reservation.id) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Reservation",
                id: reservation.id.to_string(),
            });
        }

        if let Some(client) = records.client {
            tracing::debug!(client_id = %client.id, name = %client.name, "Registering new client");
            index.insert_client(client);
        }
        if let Some(car) = records.car {
            index.insert_car(car);
        }

        reservation.version = next_version(0);
        reservations.insert(reservation.id, reservation.clone());
        index.hydrate_reservation(&mut reservation);
        Ok(reservation)
    }

    async fn update_reservation(
        &self,
        id: Uuid,
        request: &UpdateReservationRequest,
    ) -> Result<Reservation> {
        let index = self.references.read().await;
        let mut reservations = self.reservations.write().await;

        let stored = reservations
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::not_found("Reservation", id))?;
        check_version(stored.version, request.expected_version)
            .into_result()
            .map_err(|conflict| RepositoryError::conflict("Reservation", id, conflict))?;
        check_references(
            &index,
            request.client_id,
            request.car_id,
            request.mechanic_id,
            request.service_id,
        )?;

        request.apply_to(stored);
        stored.version = next_version(stored.version);

        let mut updated = stored.clone();
        index.hydrate_reservation(&mut updated);
        Ok(updated)
    }

    async fn delete_reservation(&self, id: Uuid) -> Result<()> {
        let mut reservations = self.reservations.write().await;
        if reservations.remove(&id).is_none() {
            return Err(RepositoryError::not_found("Reservation", id));
        }
        Ok(())
    }
}

#[async_trait]
impl RepairJobRepository for InMemoryStore {
    async fn list_repair_jobs(&self) -> Result<Vec<RepairJob>> {
        let index = self.references.read().await;
        let repair_jobs = self.repair_jobs.read().await;

        let mut list: Vec<RepairJob> = repair_jobs
            .values()
            .cloned()
            .map(|mut job| {
                index.hydrate_repair_job(&mut job);
                job
            })
            .collect();
        list.sort_by_key(|job| (job.start, job.id));
        Ok(list)
    }

    async fn get_repair_job(&self, id: Uuid) -> Result<Option<RepairJob>> {
        let index = self.references.read().await;
        let repair_jobs = self.repair_jobs.read().await;

        Ok(repair_jobs.get(&id).cloned().map(|mut job| {
            index.hydrate_repair_job(&mut job);
            job
        }))
    }

    async fn create_repair_job(&self, request: &CreateRepairJobRequest) -> Result<RepairJob> {
        let mut job = request.clone().into_repair_job();

        let index = self.references.read().await;
        let mut repair_jobs = self.repair_jobs.write().await;

        check_references(&index, job.client_id, job.car_id, job.mechanic_id, job.service_id)?;
        if repair_jobs.contains_key(&job.id) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "RepairJob",
                id: job.id.to_string(),
            });
        }

        job.version = next_version(0);
        repair_jobs.insert(job.id, job.clone());
        index.hydrate_repair_job(&mut job);
        Ok(job)
    }

    async fn update_repair_job(
        &self,
        id: Uuid,
        request: &UpdateRepairJobRequest,
    ) -> Result<RepairJob> {
        let index = self.references.read().await;
        let mut repair_jobs = self.repair_jobs.write().await;

        let stored = repair_jobs
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::not_found("RepairJob", id))?;
        check_version(stored.version, request.expected_version)
            .into_result()
            .map_err(|conflict| RepositoryError::conflict("RepairJob", id, conflict))?;
        check_references(
            &index,
            request.client_id,
            request.car_id,
            request.mechanic_id,
            request.service_id,
        )?;

        request.apply_to(stored);
        stored.version = next_version(stored.version);

        let mut updated = stored.clone();
        index.hydrate_repair_job(&mut updated);
        Ok(updated)
    }

    async fn delete_repair_job(&self, id: Uuid) -> Result<()> {
        let mut repair_jobs = self.repair_jobs.write().await;
        if repair_jobs.remove(&id).is_none() {
            return Err(RepositoryError::not_found("RepairJob", id));
        }
        Ok(())
    }
}

#[async_trait]
impl ReferenceRepository for InMemoryStore {
    async fn list_clients(&self) -> Result<Vec<Client>> {
        Ok(self.references.read().await.clients())
    }

    async fn list_mechanics(&self) -> Result<Vec<Mechanic>> {
        Ok(self.references.read().await.mechanics())
    }

    async fn list_services(&self) -> Result<Vec<Service>> {
        Ok(self.references.read().await.services())
    }

    async fn list_cars(&self) -> Result<Vec<Car>> {
        Ok(self.references.read().await.cars())
    }
}
