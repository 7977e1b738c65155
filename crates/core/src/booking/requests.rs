//! API request types for booking operations.
//!
//! These types are shared between the server and client for type-safe API communication.
//! Following the Functional Core pattern, these are pure data types with no I/O.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::ValidationError;
use super::types::{Car, Client, RepairJob, RepairJobStatus, Reservation, ReservationStatus};
use super::validation::{validate_repair_job_window, validate_reservation_window};

/// Details of a client being registered together with their first reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClient {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub car_make: String,
    pub car_model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_plate: Option<String>,
}

impl NewClient {
    pub fn new(
        name: impl Into<String>,
        car_make: impl Into<String>,
        car_model: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: None,
            phone: None,
            car_make: car_make.into(),
            car_model: car_model.into(),
            license_plate: None,
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

    pub fn with_license_plate(mut self, plate: impl Into<String>) -> Self {
        self.license_plate = Some(plate.into());
        self
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("Client name"));
        }
        if self.car_make.trim().is_empty() {
            return Err(ValidationError::MissingField("Car make"));
        }
        if self.car_model.trim().is_empty() {
            return Err(ValidationError::MissingField("Car model"));
        }
        Ok(())
    }
}

/// Who a new reservation is for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClientSelection {
    /// A client already known to the workshop.
    Existing {
        client_id: Uuid,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        car_id: Option<Uuid>,
    },
    /// A walk-in client registered with the reservation.
    New(NewClient),
}

/// Request payload for creating a reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateReservationRequest {
    pub client: ClientSelection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mechanic_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_id: Option<Uuid>,
    pub visit_start: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visit_end: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ReservationStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_details: Option<String>,
}

/// Records produced by materializing a [`CreateReservationRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservationRecords {
    pub reservation: Reservation,
    /// Present when the request registered a new client.
    pub client: Option<Client>,
    /// Present when the request registered a new car.
    pub car: Option<Car>,
}

impl CreateReservationRequest {
    /// Create a request for an existing client.
    pub fn for_existing_client(client_id: Uuid, visit_start: DateTime<Utc>) -> Self {
        Self::with_selection(
            ClientSelection::Existing {
                client_id,
                car_id: None,
            },
            visit_start,
        )
    }

    /// Create a request that registers a new client.
    pub fn for_new_client(client: NewClient, visit_start: DateTime<Utc>) -> Self {
        Self::with_selection(ClientSelection::New(client), visit_start)
    }

    fn with_selection(client: ClientSelection, visit_start: DateTime<Utc>) -> Self {
        Self {
            client,
            mechanic_id: None,
            service_id: None,
            visit_start,
            visit_end: None,
            status: None,
            additional_details: None,
        }
    }

    /// Set the car for an existing client. Ignored for new clients.
    pub fn with_car(mut self, car: Uuid) -> Self {
        if let ClientSelection::Existing { car_id, .. } = &mut self.client {
            *car_id = Some(car);
        }
        self
    }

    pub fn with_visit_end(mut self, visit_end: DateTime<Utc>) -> Self {
        self.visit_end = Some(visit_end);
        self
    }

    pub fn with_mechanic(mut self, mechanic_id: Uuid) -> Self {
        self.mechanic_id = Some(mechanic_id);
        self
    }

    pub fn with_service(mut self, service_id: Uuid) -> Self {
        self.service_id = Some(service_id);
        self
    }

    pub fn with_status(mut self, status: ReservationStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.additional_details = Some(details.into());
        self
    }

    /// Checks the variant's required fields and the visit duration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let ClientSelection::New(client) = &self.client {
            client.validate()?;
        }
        validate_reservation_window(Some(self.visit_start), self.visit_end)
    }

    /// Convert into stored records.
    ///
    /// A new client also yields the client and car records to store; the
    /// reservation references them by id. Status defaults to unconfirmed.
    pub fn into_records(self, now: DateTime<Utc>) -> NewReservationRecords {
        let (client_id, car_id, client, car) = match self.client {
            ClientSelection::Existing { client_id, car_id } => {
                (Some(client_id), car_id, None, None)
            }
            ClientSelection::New(new_client) => {
                let mut client = Client::new(new_client.name);
                client.email = new_client.email;
                client.phone = new_client.phone;

                let mut car = Car::new(new_client.car_make, new_client.car_model)
                    .with_owner(client.id);
                car.license_plate = new_client.license_plate;

                (Some(client.id), Some(car.id), Some(client), Some(car))
            }
        };

        let mut reservation = Reservation::new(Some(self.visit_start), self.visit_end)
            .with_status(self.status.unwrap_or(ReservationStatus::Unconfirmed))
            .with_date_added(now);
        reservation.client_id = client_id;
        reservation.car_id = car_id;
        reservation.mechanic_id = self.mechanic_id;
        reservation.service_id = self.service_id;
        reservation.additional_details = self.additional_details;

        NewReservationRecords {
            reservation,
            client,
            car,
        }
    }
}

/// Request payload for updating a reservation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateReservationRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mechanic_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visit_start: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visit_end: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ReservationStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_details: Option<String>,
    /// Version the edit was based on. `None` overwrites unconditionally.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_version: Option<u64>,
}

impl UpdateReservationRequest {
    /// Create an empty update request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a request that only changes the status.
    pub fn status(status: ReservationStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn with_client(mut self, client_id: Uuid) -> Self {
        self.client_id = Some(client_id);
        self
    }

    pub fn with_car(mut self, car_id: Uuid) -> Self {
        self.car_id = Some(car_id);
        self
    }

    pub fn with_mechanic(mut self, mechanic_id: Uuid) -> Self {
        self.mechanic_id = Some(mechanic_id);
        self
    }

    pub fn with_service(mut self, service_id: Uuid) -> Self {
        self.service_id = Some(service_id);
        self
    }

    pub fn with_visit(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.visit_start = Some(start);
        self.visit_end = Some(end);
        self
    }

    pub fn with_visit_start(mut self, start: DateTime<Utc>) -> Self {
        self.visit_start = Some(start);
        self
    }

    pub fn with_visit_end(mut self, end: DateTime<Utc>) -> Self {
        self.visit_end = Some(end);
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.additional_details = Some(details.into());
        self
    }

    pub fn with_expected_version(mut self, version: u64) -> Self {
        self.expected_version = Some(version);
        self
    }

    /// Apply updates to an existing reservation.
    ///
    /// Snapshots of changed associations are dropped; the store re-hydrates them.
    pub fn apply_to(&self, reservation: &mut Reservation) {
        if let Some(client_id) = self.client_id {
            if reservation.client_id != Some(client_id) {
                reservation.client = None;
            }
            reservation.client_id = Some(client_id);
        }
        if let Some(car_id) = self.car_id {
            if reservation.car_id != Some(car_id) {
                reservation.car = None;
            }
            reservation.car_id = Some(car_id);
        }
        if let Some(mechanic_id) = self.mechanic_id {
            if reservation.mechanic_id != Some(mechanic_id) {
                reservation.mechanic = None;
            }
            reservation.mechanic_id = Some(mechanic_id);
        }
        if let Some(service_id) = self.service_id {
            if reservation.service_id != Some(service_id) {
                reservation.service = None;
            }
            reservation.service_id = Some(service_id);
        }
        if let Some(start) = self.visit_start {
            reservation.visit_start = Some(start);
        }
        if let Some(end) = self.visit_end {
            reservation.visit_end = Some(end);
        }
        if let Some(status) = self.status {
            reservation.status = status;
        }
        if let Some(details) = &self.additional_details {
            reservation.additional_details = Some(details.clone());
        }
    }

    /// The reservation as it would look after this edit.
    pub fn preview(&self, current: &Reservation) -> Reservation {
        let mut candidate = current.clone();
        self.apply_to(&mut candidate);
        candidate
    }
}

/// Request payload for creating a repair job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRepairJobRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mechanic_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_id: Option<Uuid>,
    pub start: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<RepairJobStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_details: Option<String>,
}

impl CreateRepairJobRequest {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            client_id: None,
            car_id: None,
            mechanic_id: None,
            service_id: None,
            start,
            end: None,
            status: None,
            additional_details: None,
        }
    }

    pub fn with_client(mut self, client_id: Uuid) -> Self {
        self.client_id = Some(client_id);
        self
    }

    pub fn with_car(mut self, car_id: Uuid) -> Self {
        self.car_id = Some(car_id);
        self
    }

    pub fn with_mechanic(mut self, mechanic_id: Uuid) -> Self {
        self.mechanic_id = Some(mechanic_id);
        self
    }

    pub fn with_service(mut self, service_id: Uuid) -> Self {
        self.service_id = Some(service_id);
        self
    }

    pub fn with_end(mut self, end: DateTime<Utc>) -> Self {
        self.end = Some(end);
        self
    }

    pub fn with_status(mut self, status: RepairJobStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.additional_details = Some(details.into());
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_repair_job_window(Some(self.start), self.end)
    }

    /// Convert into a RepairJob, starting as upcoming unless a status is given.
    pub fn into_repair_job(self) -> RepairJob {
        let mut job = RepairJob::new(Some(self.start), self.end)
            .with_status(self.status.unwrap_or(RepairJobStatus::Upcoming));
        job.client_id = self.client_id;
        job.car_id = self.car_id;
        job.mechanic_id = self.mechanic_id;
        job.service_id = self.service_id;
        job.additional_details = self.additional_details;
        job
    }
}

/// Request payload for updating a repair job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRepairJobRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mechanic_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<RepairJobStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_version: Option<u64>,
}

impl UpdateRepairJobRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a request that only changes the status.
    pub fn status(status: RepairJobStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn with_mechanic(mut self, mechanic_id: Uuid) -> Self {
        self.mechanic_id = Some(mechanic_id);
        self
    }

    pub fn with_service(mut self, service_id: Uuid) -> Self {
        self.service_id = Some(service_id);
        self
    }

    pub fn with_start(mut self, start: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_end(mut self, end: DateTime<Utc>) -> Self {
        self.end = Some(end);
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.additional_details = Some(details.into());
        self
    }

    pub fn with_expected_version(mut self, version: u64) -> Self {
        self.expected_version = Some(version);
        self
    }

    /// Apply updates to an existing repair job.
    pub fn apply_to(&self, job: &mut RepairJob) {
        if let Some(client_id) = self.client_id {
            if job.client_id != Some(client_id) {
                job.client = None;
            }
            job.client_id = Some(client_id);
        }
        if let Some(car_id) = self.car_id {
            if job.car_id != Some(car_id) {
                job.car = None;
            }
            job.car_id = Some(car_id);
        }
        if let Some(mechanic_id) = self.mechanic_id {
            if job.mechanic_id != Some(mechanic_id) {
                job.mechanic = None;
            }
            job.mechanic_id = Some(mechanic_id);
        }
        if let Some(service_id) = self.service_id {
            if job.service_id != Some(service_id) {
                job.service = None;
            }
            job.service_id = Some(service_id);
        }
        if let Some(start) = self.start {
            job.start = Some(start);
        }
        if let Some(end) = self.end {
            job.end = Some(end);
        }
        if let Some(status) = self.status {
            job.status = status;
        }
        if let Some(details) = &self.additional_details {
            job.additional_details = Some(details.clone());
        }
    }

    /// The repair job as it would look after this edit.
    pub fn preview(&self, current: &RepairJob) -> RepairJob {
        let mut candidate = current.clone();
        self.apply_to(&mut candidate);
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn nine_am() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_client_selection_is_tagged() {
        let request = CreateReservationRequest::for_new_client(
            NewClient::new("Lea", "Renault", "Clio").with_phone("555-0101"),
            nine_am(),
        );
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["client"]["kind"], "new");
        assert_eq!(json["client"]["car_model"], "Clio");

        let parsed: CreateReservationRequest = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, request);
    }

    #[test]
    fn test_existing_client_deserializes() {
        let json = r#"{
            "client": {"kind": "existing", "client_id": "00000000-0000-0000-0000-000000000001"},
            "visit_start": "2024-01-10T09:00:00Z",
            "visit_end": "2024-01-10T10:00:00Z"
        }"#;
        let request: CreateReservationRequest = serde_json::from_str(json).unwrap();

        assert!(matches!(
            request.client,
            ClientSelection::Existing { car_id: None, .. }
        ));
        assert_eq!(request.validate(), Ok(()));
    }

    #[test]
    fn test_new_client_requires_name_and_car() {
        let request =
            CreateReservationRequest::for_new_client(NewClient::new(" ", "Seat", "Ibiza"), nine_am());
        assert_eq!(
            request.validate(),
            Err(ValidationError::MissingField("Client name"))
        );

        let request =
            CreateReservationRequest::for_new_client(NewClient::new("Lea", "Seat", ""), nine_am());
        assert_eq!(
            request.validate(),
            Err(ValidationError::MissingField("Car model"))
        );
    }

    #[test]
    fn test_create_request_validates_duration() {
        let request = CreateReservationRequest::for_existing_client(Uuid::new_v4(), nine_am())
            .with_visit_end(nine_am() + Duration::minutes(20));
        assert_eq!(request.validate(), Err(ValidationError::TooShort));

        let draft = CreateReservationRequest::for_existing_client(Uuid::new_v4(), nine_am());
        assert_eq!(draft.validate(), Ok(()));
    }

    #[test]
    fn test_into_records_registers_new_client_and_car() {
        let now = nine_am() - Duration::days(1);
        let records = CreateReservationRequest::for_new_client(
            NewClient::new("Lea", "Renault", "Clio").with_license_plate("AB-123"),
            nine_am(),
        )
        .into_records(now);

        let client = records.client.expect("client record");
        let car = records.car.expect("car record");
        assert_eq!(car.client_id, Some(client.id));
        assert_eq!(car.license_plate.as_deref(), Some("AB-123"));
        assert_eq!(records.reservation.client_id, Some(client.id));
        assert_eq!(records.reservation.car_id, Some(car.id));
        assert_eq!(records.reservation.status, ReservationStatus::Unconfirmed);
        assert_eq!(records.reservation.date_added, now);
    }

    #[test]
    fn test_with_car_only_applies_to_existing_clients() {
        let car_id = Uuid::new_v4();
        let request =
            CreateReservationRequest::for_existing_client(Uuid::new_v4(), nine_am()).with_car(car_id);
        assert!(matches!(
            request.client,
            ClientSelection::Existing { car_id: Some(id), .. } if id == car_id
        ));
    }

    #[test]
    fn test_update_preview_does_not_touch_original() {
        let current = Reservation::new(Some(nine_am()), Some(nine_am() + Duration::hours(1)));
        let update = UpdateReservationRequest::new()
            .with_visit_end(nine_am() + Duration::hours(3))
            .with_details("Customer will wait");

        let candidate = update.preview(&current);

        assert_eq!(candidate.visit_end, Some(nine_am() + Duration::hours(3)));
        assert_eq!(candidate.additional_details.as_deref(), Some("Customer will wait"));
        assert_eq!(current.visit_end, Some(nine_am() + Duration::hours(1)));
    }

    #[test]
    fn test_update_drops_stale_snapshot() {
        let mut job = RepairJob::new(Some(nine_am()), None).with_client(Client::new("Old"));
        let new_client = Uuid::new_v4();

        UpdateRepairJobRequest {
            client_id: Some(new_client),
            ..UpdateRepairJobRequest::default()
        }
        .apply_to(&mut job);

        assert_eq!(job.client_id, Some(new_client));
        assert!(job.client.is_none());
    }

    #[test]
    fn test_repair_job_request_defaults_to_upcoming() {
        let job = CreateRepairJobRequest::new(nine_am())
            .with_end(nine_am() + Duration::days(2))
            .into_repair_job();
        assert_eq!(job.status, RepairJobStatus::Upcoming);
        assert_eq!(job.end, Some(nine_am() + Duration::days(2)));
    }
}
