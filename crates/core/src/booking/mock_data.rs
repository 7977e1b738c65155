use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

use super::types::{
    Car, Client, Mechanic, RepairJob, RepairJobStatus, Reservation, ReservationStatus, Service,
};

/// A self-consistent workshop dataset for demos and development servers.
#[derive(Debug, Clone, Default)]
pub struct SeedData {
    pub clients: Vec<Client>,
    pub cars: Vec<Car>,
    pub mechanics: Vec<Mechanic>,
    pub services: Vec<Service>,
    pub reservations: Vec<Reservation>,
    pub repair_jobs: Vec<RepairJob>,
}

/// Generates demo data spread across the week centered on the given date.
///
/// Reservations and repair jobs carry foreign-key ids and snapshots.
pub fn generate_seed_data(center: NaiveDate) -> SeedData {
    let at = |day_offset: i64, hour: u32, min: u32| -> DateTime<Utc> {
        let time = NaiveTime::from_hms_opt(hour, min, 0).unwrap_or_default();
        (center + Duration::days(day_offset)).and_time(time).and_utc()
    };

    let ana = Client::new("Ana Díaz")
        .with_email("ana.diaz@example.com")
        .with_phone("555-0101");
    let bruno = Client::new("Bruno Costa")
        .with_email("bruno.costa@example.com")
        .with_phone("555-0102");
    let chen = Client::new("Chen Wei").with_email("chen.wei@example.com");

    let corolla = Car::new("Toyota", "Corolla")
        .with_owner(ana.id)
        .with_license_plate("4821-KLM")
        .with_year(2017);
    let golf = Car::new("Volkswagen", "Golf")
        .with_owner(bruno.id)
        .with_license_plate("9034-BCD")
        .with_year(2020);
    let model3 = Car::new("Tesla", "Model 3")
        .with_owner(chen.id)
        .with_year(2022);

    let marta = Mechanic::new("Marta Ruiz", "marta.ruiz@workshop.test")
        .with_username("marta")
        .with_specialization("Brakes & suspension");
    let jonas = Mechanic::new("Jonas Berg", "jonas.berg@workshop.test")
        .with_username("jonas")
        .with_specialization("Electrical");

    let checkup = Service::new("Checkup")
        .with_description("General inspection")
        .with_estimated_duration(60);
    let brakes = Service::new("Brake replacement")
        .with_description("Pads and discs")
        .with_estimated_duration(180);
    let battery = Service::new("Battery diagnostics").with_estimated_duration(90);

    let reservations = vec![
        Reservation::new(Some(at(0, 9, 0)), Some(at(0, 10, 0)))
            .with_client(ana.clone())
            .with_car(corolla.clone())
            .with_mechanic(marta.clone())
            .with_service(checkup.clone())
            .with_date_added(at(-5, 12, 0)),
        Reservation::new(Some(at(1, 14, 30)), None)
            .with_client(bruno.clone())
            .with_car(golf.clone())
            .with_service(brakes.clone())
            .with_status(ReservationStatus::Unconfirmed)
            .with_details("Squeaking noise when braking")
            .with_date_added(at(-1, 18, 45)),
        Reservation::new(Some(at(-2, 11, 0)), Some(at(-2, 12, 30)))
            .with_client(chen.clone())
            .with_car(model3.clone())
            .with_mechanic(jonas.clone())
            .with_service(battery.clone())
            .with_status(ReservationStatus::Cancelled)
            .with_date_added(at(-9, 9, 15)),
    ];

    let repair_jobs = vec![
        RepairJob::new(Some(at(0, 10, 30)), None)
            .with_client(bruno.clone())
            .with_car(golf.clone())
            .with_mechanic(marta.clone())
            .with_service(brakes.clone())
            .with_status(RepairJobStatus::InProgress),
        RepairJob::new(Some(at(2, 8, 0)), Some(at(3, 17, 0)))
            .with_client(chen.clone())
            .with_car(model3.clone())
            .with_mechanic(jonas.clone())
            .with_service(battery.clone())
            .with_details("Intermittent charging fault"),
        RepairJob::new(Some(at(-1, 13, 0)), Some(at(-1, 15, 0)))
            .with_client(ana.clone())
            .with_car(corolla.clone())
            .with_mechanic(jonas.clone())
            .with_status(RepairJobStatus::Completed),
    ];

    SeedData {
        clients: vec![ana, bruno, chen],
        cars: vec![corolla, golf, model3],
        mechanics: vec![marta, jonas],
        services: vec![checkup, brakes, battery],
        reservations,
        repair_jobs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_references_are_consistent() {
        let center = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let seed = generate_seed_data(center);

        let client_ids: Vec<_> = seed.clients.iter().map(|c| c.id).collect();
        let mechanic_ids: Vec<_> = seed.mechanics.iter().map(|m| m.id).collect();

        for reservation in &seed.reservations {
            assert!(client_ids.contains(&reservation.client_id.unwrap()));
            if let Some(mechanic_id) = reservation.mechanic_id {
                assert!(mechanic_ids.contains(&mechanic_id));
            }
        }
        for job in &seed.repair_jobs {
            assert!(mechanic_ids.contains(&job.mechanic_id.unwrap()));
        }
    }

    #[test]
    fn test_seed_reservations_respect_duration_rules() {
        let center = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let seed = generate_seed_data(center);

        for reservation in &seed.reservations {
            assert!(super::super::validate_reservation(reservation).is_ok());
        }
    }
}
