//! Id-keyed lookup over reference entities.
//!
//! Bookings hold foreign-key ids only; the index resolves them into snapshots on
//! demand instead of keeping reference cycles between entities.

use std::collections::HashMap;

use uuid::Uuid;

use super::types::{Car, Client, Mechanic, RepairJob, Reservation, Service};

/// In-memory index of clients, cars, mechanics and services.
#[derive(Debug, Clone, Default)]
pub struct ReferenceIndex {
    clients: HashMap<Uuid, Client>,
    cars: HashMap<Uuid, Car>,
    mechanics: HashMap<Uuid, Mechanic>,
    services: HashMap<Uuid, Service>,
}

impl ReferenceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an index from the reference lists returned by a Data Store.
    pub fn from_lists(
        clients: impl IntoIterator<Item = Client>,
        cars: impl IntoIterator<Item = Car>,
        mechanics: impl IntoIterator<Item = Mechanic>,
        services: impl IntoIterator<Item = Service>,
    ) -> Self {
        Self {
            clients: clients.into_iter().map(|c| (c.id, c)).collect(),
            cars: cars.into_iter().map(|c| (c.id, c)).collect(),
            mechanics: mechanics.into_iter().map(|m| (m.id, m)).collect(),
            services: services.into_iter().map(|s| (s.id, s)).collect(),
        }
    }

    pub fn insert_client(&mut self, client: Client) {
        self.clients.insert(client.id, client);
    }

    pub fn insert_car(&mut self, car: Car) {
        self.cars.insert(car.id, car);
    }

    pub fn insert_mechanic(&mut self, mechanic: Mechanic) {
        self.mechanics.insert(mechanic.id, mechanic);
    }

    pub fn insert_service(&mut self, service: Service) {
        self.services.insert(service.id, service);
    }

    pub fn client(&self, id: Uuid) -> Option<&Client> {
        self.clients.get(&id)
    }

    pub fn car(&self, id: Uuid) -> Option<&Car> {
        self.cars.get(&id)
    }

    pub fn mechanic(&self, id: Uuid) -> Option<&Mechanic> {
        self.mechanics.get(&id)
    }

    pub fn service(&self, id: Uuid) -> Option<&Service> {
        self.services.get(&id)
    }

    /// Finds the mechanic record behind a session email.
    pub fn mechanic_by_email(&self, email: &str) -> Option<&Mechanic> {
        let email = email.trim();
        self.mechanics
            .values()
            .find(|m| m.email.eq_ignore_ascii_case(email))
    }

    /// Lists entities sorted by name, for stable output.
    pub fn clients(&self) -> Vec<Client> {
        sorted_by(self.clients.values(), |c| c.name.as_str())
    }

    pub fn cars(&self) -> Vec<Car> {
        sorted_by(self.cars.values(), |c| c.make.as_str())
    }

    pub fn mechanics(&self) -> Vec<Mechanic> {
        sorted_by(self.mechanics.values(), |m| m.name.as_str())
    }

    pub fn services(&self) -> Vec<Service> {
        sorted_by(self.services.values(), |s| s.name.as_str())
    }

    /// Replaces a reservation's snapshots with the entities its ids point at.
    ///
    /// A dangling id leaves the snapshot empty.
    pub fn hydrate_reservation(&self, reservation: &mut Reservation) {
        reservation.client = reservation.client_id.and_then(|id| self.client(id).cloned());
        reservation.car = reservation.car_id.and_then(|id| self.car(id).cloned());
        reservation.mechanic = reservation
            .mechanic_id
            .and_then(|id| self.mechanic(id).cloned());
        reservation.service = reservation
            .service_id
            .and_then(|id| self.service(id).cloned());
    }

    /// Replaces a repair job's snapshots with the entities its ids point at.
    pub fn hydrate_repair_job(&self, job: &mut RepairJob) {
        job.client = job.client_id.and_then(|id| self.client(id).cloned());
        job.car = job.car_id.and_then(|id| self.car(id).cloned());
        job.mechanic = job.mechanic_id.and_then(|id| self.mechanic(id).cloned());
        job.service = job.service_id.and_then(|id| self.service(id).cloned());
    }
}

fn sorted_by<'a, T, F>(values: impl Iterator<Item = &'a T>, key: F) -> Vec<T>
where
    T: Clone + 'a,
    F: Fn(&T) -> &str,
{
    let mut items: Vec<T> = values.cloned().collect();
    items.sort_by(|a, b| key(a).cmp(key(b)));
    items
}
