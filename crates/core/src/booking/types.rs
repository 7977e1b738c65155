use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::ParseStatusError;

/// A workshop client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl Client {
    /// Creates a new client with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: None,
            phone: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Sets a specific ID for this client (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }
}

/// A vehicle, optionally owned by a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    pub id: Uuid,
    #[serde(default)]
    pub client_id: Option<Uuid>,
    pub make: String,
    pub model: String,
    #[serde(default)]
    pub license_plate: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
}

impl Car {
    /// Creates a new car with the given make and model.
    pub fn new(make: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            client_id: None,
            make: make.into(),
            model: model.into(),
            license_plate: None,
            year: None,
        }
    }

    pub fn with_owner(mut self, client_id: Uuid) -> Self {
        self.client_id = Some(client_id);
        self
    }

    pub fn with_license_plate(mut self, plate: impl Into<String>) -> Self {
        self.license_plate = Some(plate.into());
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Sets a specific ID for this car (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Short display identifier: the model, falling back to the make.
    pub fn identifier(&self) -> Option<&str> {
        [self.model.as_str(), self.make.as_str()]
            .into_iter()
            .map(str::trim)
            .find(|s| !s.is_empty())
    }
}

/// A mechanic working in the shop.
///
/// `email` and `username` are the fields matched against a session identity;
/// the mechanic record id lives in a different id space than session users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mechanic {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub specialization: Option<String>,
}

impl Mechanic {
    /// Creates a new mechanic.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            username: None,
            specialization: None,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_specialization(mut self, specialization: impl Into<String>) -> Self {
        self.specialization = Some(specialization.into());
        self
    }

    /// Sets a specific ID for this mechanic (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }
}

/// A service offered by the workshop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub estimated_duration_minutes: Option<i64>,
}

impl Service {
    /// Creates a new service with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            estimated_duration_minutes: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_estimated_duration(mut self, minutes: i64) -> Self {
        self.estimated_duration_minutes = Some(minutes);
        self
    }

    /// Sets a specific ID for this service (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Returns the estimated duration when it is known and positive.
    pub fn estimated_duration(&self) -> Option<Duration> {
        self.estimated_duration_minutes
            .filter(|minutes| *minutes > 0)
            .map(Duration::minutes)
    }
}

/// The two kinds of bookings shown on the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecordKind {
    Reservation,
    RepairJob,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Reservation => "reservation",
            RecordKind::RepairJob => "repair-job",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of a client visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Unconfirmed,
    Confirmed,
    Cancelled,
    Completed,
}

impl ReservationStatus {
    pub const ALL: [ReservationStatus; 4] = [
        ReservationStatus::Unconfirmed,
        ReservationStatus::Confirmed,
        ReservationStatus::Cancelled,
        ReservationStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Unconfirmed => "unconfirmed",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Cancelled => "cancelled",
            ReservationStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| ParseStatusError {
                kind: RecordKind::Reservation,
                value: value.to_string(),
            })
    }
}

/// Status of a repair job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepairJobStatus {
    Upcoming,
    InProgress,
    Completed,
    Cancelled,
}

impl RepairJobStatus {
    pub const ALL: [RepairJobStatus; 4] = [
        RepairJobStatus::Upcoming,
        RepairJobStatus::InProgress,
        RepairJobStatus::Completed,
        RepairJobStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RepairJobStatus::Upcoming => "upcoming",
            RepairJobStatus::InProgress => "in_progress",
            RepairJobStatus::Completed => "completed",
            RepairJobStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for RepairJobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RepairJobStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| ParseStatusError {
                kind: RecordKind::RepairJob,
                value: value.to_string(),
            })
    }
}

/// Status of either booking kind, as carried by a calendar event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum BookingStatus {
    Reservation(ReservationStatus),
    RepairJob(RepairJobStatus),
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Reservation(status) => status.as_str(),
            BookingStatus::RepairJob(status) => status.as_str(),
        }
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            BookingStatus::Reservation(_) => RecordKind::Reservation,
            BookingStatus::RepairJob(_) => RecordKind::RepairJob,
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scheduled client visit.
///
/// Associations are stored as foreign-key ids. The `client`, `car`, `mechanic` and
/// `service` snapshots are optional denormalized copies filled by the Data Store
/// (see [`super::ReferenceIndex`]); they are never live back-references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Uuid,
    #[serde(default)]
    pub client_id: Option<Uuid>,
    #[serde(default)]
    pub car_id: Option<Uuid>,
    #[serde(default)]
    pub mechanic_id: Option<Uuid>,
    #[serde(default)]
    pub service_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<Client>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car: Option<Car>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mechanic: Option<Mechanic>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<Service>,
    #[serde(default)]
    pub visit_start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub visit_end: Option<DateTime<Utc>>,
    pub status: ReservationStatus,
    #[serde(default)]
    pub additional_details: Option<String>,
    pub date_added: DateTime<Utc>,
    /// Optimistic-concurrency stamp, bumped by the store on every update.
    #[serde(default)]
    pub version: u64,
}

impl Reservation {
    /// Creates a confirmed reservation for the given visit window.
    pub fn new(visit_start: Option<DateTime<Utc>>, visit_end: Option<DateTime<Utc>>) -> Self {
        Self {
            id: Uuid::new_v4(),
            client_id: None,
            car_id: None,
            mechanic_id: None,
            service_id: None,
            client: None,
            car: None,
            mechanic: None,
            service: None,
            visit_start,
            visit_end,
            status: ReservationStatus::Confirmed,
            additional_details: None,
            date_added: Utc::now(),
            version: 0,
        }
    }

    /// Attaches a client, setting both the foreign key and the snapshot.
    pub fn with_client(mut self, client: Client) -> Self {
        self.client_id = Some(client.id);
        self.client = Some(client);
        self
    }

    pub fn with_car(mut self, car: Car) -> Self {
        self.car_id = Some(car.id);
        self.car = Some(car);
        self
    }

    pub fn with_mechanic(mut self, mechanic: Mechanic) -> Self {
        self.mechanic_id = Some(mechanic.id);
        self.mechanic = Some(mechanic);
        self
    }

    pub fn with_service(mut self, service: Service) -> Self {
        self.service_id = Some(service.id);
        self.service = Some(service);
        self
    }

    pub fn with_status(mut self, status: ReservationStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.additional_details = Some(details.into());
        self
    }

    pub fn with_date_added(mut self, date_added: DateTime<Utc>) -> Self {
        self.date_added = date_added;
        self
    }

    /// Sets a specific ID for this reservation (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn client_name(&self) -> Option<&str> {
        self.client.as_ref().map(|c| c.name.as_str())
    }

    pub fn service_name(&self) -> Option<&str> {
        self.service.as_ref().map(|s| s.name.as_str())
    }
}

/// A mechanic work order. Unlike reservations it has no duration ceiling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepairJob {
    pub id: Uuid,
    #[serde(default)]
    pub client_id: Option<Uuid>,
    #[serde(default)]
    pub car_id: Option<Uuid>,
    #[serde(default)]
    pub mechanic_id: Option<Uuid>,
    #[serde(default)]
    pub service_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<Client>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car: Option<Car>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mechanic: Option<Mechanic>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<Service>,
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
    pub status: RepairJobStatus,
    #[serde(default)]
    pub additional_details: Option<String>,
    #[serde(default)]
    pub version: u64,
}

impl RepairJob {
    /// Creates an upcoming repair job.
    pub fn new(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        Self {
            id: Uuid::new_v4(),
            client_id: None,
            car_id: None,
            mechanic_id: None,
            service_id: None,
            client: None,
            car: None,
            mechanic: None,
            service: None,
            start,
            end,
            status: RepairJobStatus::Upcoming,
            additional_details: None,
            version: 0,
        }
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client_id = Some(client.id);
        self.client = Some(client);
        self
    }

    pub fn with_car(mut self, car: Car) -> Self {
        self.car_id = Some(car.id);
        self.car = Some(car);
        self
    }

    pub fn with_mechanic(mut self, mechanic: Mechanic) -> Self {
        self.mechanic_id = Some(mechanic.id);
        self.mechanic = Some(mechanic);
        self
    }

    pub fn with_service(mut self, service: Service) -> Self {
        self.service_id = Some(service.id);
        self.service = Some(service);
        self
    }

    pub fn with_status(mut self, status: RepairJobStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.additional_details = Some(details.into());
        self
    }

    /// Sets a specific ID for this repair job (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn client_name(&self) -> Option<&str> {
        self.client.as_ref().map(|c| c.name.as_str())
    }

    pub fn service_name(&self) -> Option<&str> {
        self.service.as_ref().map(|s| s.name.as_str())
    }

    pub fn mechanic_name(&self) -> Option<&str> {
        self.mechanic.as_ref().map(|m| m.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_car_identifier_prefers_model() {
        let car = Car::new("Toyota", "Corolla");
        assert_eq!(car.identifier(), Some("Corolla"));

        let car = Car::new("Toyota", "  ");
        assert_eq!(car.identifier(), Some("Toyota"));

        let car = Car::new("", "");
        assert_eq!(car.identifier(), None);
    }

    #[test]
    fn test_service_estimated_duration() {
        let service = Service::new("Oil change").with_estimated_duration(45);
        assert_eq!(service.estimated_duration(), Some(Duration::minutes(45)));

        let service = Service::new("Inspection").with_estimated_duration(0);
        assert_eq!(service.estimated_duration(), None);

        assert_eq!(Service::new("Wash").estimated_duration(), None);
    }

    #[test]
    fn test_status_parsing_is_case_insensitive() {
        assert_eq!(
            "Confirmed".parse::<ReservationStatus>(),
            Ok(ReservationStatus::Confirmed)
        );
        assert_eq!(
            "IN_PROGRESS".parse::<RepairJobStatus>(),
            Ok(RepairJobStatus::InProgress)
        );
        assert!("in progress".parse::<RepairJobStatus>().is_err());
    }

    #[test]
    fn test_status_serde_names() {
        let json = serde_json::to_string(&RepairJobStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");

        let json = serde_json::to_string(&BookingStatus::Reservation(
            ReservationStatus::Unconfirmed,
        ))
        .unwrap();
        assert_eq!(json, "\"unconfirmed\"");

        let json = serde_json::to_string(&RecordKind::RepairJob).unwrap();
        assert_eq!(json, "\"repair-job\"");
    }

    #[test]
    fn test_reservation_builder_sets_foreign_keys() {
        let client = Client::new("Ana Díaz").with_email("ana@example.com");
        let car = Car::new("Ford", "Focus").with_owner(client.id);
        let reservation = Reservation::new(None, None)
            .with_client(client.clone())
            .with_car(car.clone())
            .with_status(ReservationStatus::Unconfirmed);

        assert_eq!(reservation.client_id, Some(client.id));
        assert_eq!(reservation.car_id, Some(car.id));
        assert_eq!(reservation.client_name(), Some("Ana Díaz"));
        assert_eq!(reservation.status, ReservationStatus::Unconfirmed);
    }

    #[test]
    fn test_reservation_deserializes_without_snapshots() {
        let json = r#"{
            "id": "00000000-0000-0000-0000-000000000001",
            "visit_start": "2024-01-10T09:00:00Z",
            "status": "confirmed",
            "date_added": "2024-01-01T08:00:00Z"
        }"#;
        let reservation: Reservation = serde_json::from_str(json).unwrap();

        assert!(reservation.client.is_none());
        assert!(reservation.visit_end.is_none());
        assert_eq!(reservation.version, 0);
    }
}
