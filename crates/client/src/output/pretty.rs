//! Pretty output formatting.

use chrono::{DateTime, Utc};
use workshop_core::booking::{Car, Client, Mechanic, RepairJob, Reservation, Service};
use workshop_core::schedule::{CalendarEvent, ScheduleView};

fn format_instant(instant: Option<DateTime<Utc>>) -> String {
    instant
        .map(|i| i.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Renders a titled list, or `empty` when there are no items.
fn format_list<T>(title: &str, empty: &str, items: &[T], one: impl Fn(&T) -> String) -> String {
    if items.is_empty() {
        return empty.to_string();
    }
    let mut output = format!("{} ({})\n", title, items.len());
    output.push_str(&"-".repeat(40));
    for item in items {
        output.push_str(&format!("\n{}", one(item)));
        output.push('\n');
    }
    output
}

/// Format a reservation for display.
pub fn format_reservation(reservation: &Reservation) -> String {
    let mut output = format!(
        "{} [{}]\n  ID: {}\n  Visit: {} - {}\n  Version: {}",
        reservation.client_name().unwrap_or("Unknown client"),
        reservation.status,
        reservation.id,
        format_instant(reservation.visit_start),
        format_instant(reservation.visit_end),
        reservation.version,
    );
    if let Some(service) = reservation.service_name() {
        output.push_str(&format!("\n  Service: {}", service));
    }
    if let Some(mechanic) = &reservation.mechanic {
        output.push_str(&format!("\n  Mechanic: {}", mechanic.name));
    }
    if let Some(details) = &reservation.additional_details {
        output.push_str(&format!("\n  Details: {}", details));
    }
    output
}

pub fn format_reservations(reservations: &[Reservation]) -> String {
    format_list(
        "RESERVATIONS",
        "No reservations found.",
        reservations,
        format_reservation,
    )
}

/// Format a repair job for display.
pub fn format_repair_job(job: &RepairJob) -> String {
    let mut output = format!(
        "{} [{}]\n  ID: {}\n  Period: {} - {}\n  Version: {}",
        job.service_name().unwrap_or("Repair job"),
        job.status,
        job.id,
        format_instant(job.start),
        format_instant(job.end),
        job.version,
    );
    if let Some(client) = job.client_name() {
        output.push_str(&format!("\n  Client: {}", client));
    }
    if let Some(mechanic) = job.mechanic_name() {
        output.push_str(&format!("\n  Mechanic: {}", mechanic));
    }
    if let Some(details) = &job.additional_details {
        output.push_str(&format!("\n  Details: {}", details));
    }
    output
}

pub fn format_repair_jobs(jobs: &[RepairJob]) -> String {
    format_list("REPAIR JOBS", "No repair jobs found.", jobs, format_repair_job)
}

fn format_event(event: &CalendarEvent) -> String {
    format!(
        "{} - {}  {} [{}, {}]",
        event.start.format("%a %Y-%m-%d %H:%M"),
        event.end.format("%H:%M"),
        event.title,
        event.kind,
        event.status,
    )
}

/// Format a schedule view: window header, then one line per event.
pub fn format_view(view: &ScheduleView) -> String {
    let range = view.window.date_range();
    let mut output = format!(
        "SCHEDULE {} {} .. {}",
        view.window.granularity, range.start, range.end
    );
    if view.read_only {
        output.push_str(" (read-only)");
    }
    for kind in &view.failed {
        output.push_str(&format!("\n  ! {} could not be loaded", kind));
    }
    output.push('\n');
    output.push_str(&"-".repeat(40));
    if view.events.is_empty() {
        output.push_str("\nNo bookings in this window.");
    }
    for event in &view.events {
        output.push_str(&format!("\n{}", format_event(event)));
    }
    output
}

pub fn format_clients(clients: &[Client]) -> String {
    format_list("CLIENTS", "No clients found.", clients, |client| {
        let mut output = format!("{}\n  ID: {}", client.name, client.id);
        if let Some(email) = &client.email {
            output.push_str(&format!("\n  Email: {}", email));
        }
        if let Some(phone) = &client.phone {
            output.push_str(&format!("\n  Phone: {}", phone));
        }
        output
    })
}

pub fn format_mechanics(mechanics: &[Mechanic]) -> String {
    format_list("MECHANICS", "No mechanics found.", mechanics, |mechanic| {
        let mut output = format!(
            "{}\n  ID: {}\n  Email: {}",
            mechanic.name, mechanic.id, mechanic.email
        );
        if let Some(specialization) = &mechanic.specialization {
            output.push_str(&format!("\n  Specialization: {}", specialization));
        }
        output
    })
}

pub fn format_services(services: &[Service]) -> String {
    format_list("SERVICES", "No services found.", services, |service| {
        let mut output = format!("{}\n  ID: {}", service.name, service.id);
        if let Some(minutes) = service.estimated_duration_minutes {
            output.push_str(&format!("\n  Estimated: {} min", minutes));
        }
        output
    })
}

pub fn format_cars(cars: &[Car]) -> String {
    format_list("CARS", "No cars found.", cars, |car| {
        let mut output = format!("{} {}\n  ID: {}", car.make, car.model, car.id);
        if let Some(plate) = &car.license_plate {
            output.push_str(&format!("\n  Plate: {}", plate));
        }
        output
    })
}
