//! Projection of bookings into calendar events.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::booking::{BookingStatus, RecordKind, RepairJob, Reservation};

/// Length given to a reservation that has no usable end.
pub const DEFAULT_RESERVATION_MINUTES: i64 = 60;
/// Length given to a repair job with no usable end and no service estimate.
pub const DEFAULT_REPAIR_JOB_MINUTES: i64 = 120;

const UNKNOWN_CLIENT: &str = "Unknown client";

/// The booking an event was projected from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EventResource {
    Reservation(Reservation),
    RepairJob(RepairJob),
}

/// A booking placed on the calendar. Always satisfies `start < end`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarEvent {
    pub id: Uuid,
    pub kind: RecordKind,
    pub title: String,
    pub label: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: BookingStatus,
    pub resource: EventResource,
}

/// Picks the explicit end when it is after `start`, otherwise `start + fallback`.
fn resolve_end(
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
    fallback: Duration,
) -> DateTime<Utc> {
    end.filter(|end| *end > start).unwrap_or(start + fallback)
}

impl CalendarEvent {
    /// Projects a reservation. Returns None when it has no start.
    pub fn from_reservation(reservation: &Reservation) -> Option<Self> {
        let start = reservation.visit_start?;
        let end = resolve_end(
            start,
            reservation.visit_end,
            Duration::minutes(DEFAULT_RESERVATION_MINUTES),
        );

        let client = reservation.client_name().unwrap_or(UNKNOWN_CLIENT);
        let title = match reservation.car.as_ref().and_then(|car| car.identifier()) {
            Some(car) => format!("{client} - {car}"),
            None => client.to_string(),
        };
        let label = format!(
            "Reservation - {}",
            reservation.service_name().unwrap_or("Checkup")
        );

        Some(Self {
            id: reservation.id,
            kind: RecordKind::Reservation,
            title,
            label,
            start,
            end,
            status: BookingStatus::Reservation(reservation.status),
            resource: EventResource::Reservation(reservation.clone()),
        })
    }

    /// Projects a repair job. Returns None when it has no start.
    ///
    /// Without an explicit end the service's estimated duration is used when
    /// known, otherwise two hours.
    pub fn from_repair_job(job: &RepairJob) -> Option<Self> {
        let start = job.start?;
        let fallback = job
            .service
            .as_ref()
            .and_then(|service| service.estimated_duration())
            .unwrap_or_else(|| Duration::minutes(DEFAULT_REPAIR_JOB_MINUTES));
        let end = resolve_end(start, job.end, fallback);

        Some(Self {
            id: job.id,
            kind: RecordKind::RepairJob,
            title: job.client_name().unwrap_or(UNKNOWN_CLIENT).to_string(),
            label: format!("Repair Job - {}", job.service_name().unwrap_or("Repair")),
            start,
            end,
            status: BookingStatus::RepairJob(job.status),
            resource: EventResource::RepairJob(job.clone()),
        })
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// Projects both collections into one timeline sorted by start.
///
/// Reservations come first before sorting, and the sort is stable, so events
/// with equal starts keep that order.
pub fn transform_all(reservations: &[Reservation], repair_jobs: &[RepairJob]) -> Vec<CalendarEvent> {
    let mut events: Vec<CalendarEvent> = reservations
        .iter()
        .filter_map(CalendarEvent::from_reservation)
        .chain(repair_jobs.iter().filter_map(CalendarEvent::from_repair_job))
        .collect();

    events.sort_by_key(|event| event.start);
    events
}
