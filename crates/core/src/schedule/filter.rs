//! Multi-criteria filtering and free-text search over bookings.
//!
//! Every active constraint must hold (logical AND). Filtering never mutates its
//! input and preserves the original order.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::booking::{RepairJob, Reservation};
use crate::serde::{deserialize_optional_date, deserialize_optional_string, deserialize_optional_uuid};

/// Filter criteria for the schedule. Absent fields do not constrain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleFilter {
    /// Earliest start date, inclusive.
    #[serde(default, deserialize_with = "deserialize_optional_date", skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveDate>,
    /// Latest start date, inclusive.
    #[serde(default, deserialize_with = "deserialize_optional_date", skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_uuid", skip_serializing_if = "Option::is_none")]
    pub client_id: Option<Uuid>,
    #[serde(default, deserialize_with = "deserialize_optional_uuid", skip_serializing_if = "Option::is_none")]
    pub mechanic_id: Option<Uuid>,
    #[serde(default, deserialize_with = "deserialize_optional_uuid", skip_serializing_if = "Option::is_none")]
    pub service_id: Option<Uuid>,
    #[serde(default, deserialize_with = "deserialize_optional_uuid", skip_serializing_if = "Option::is_none")]
    pub car_id: Option<Uuid>,
    /// Status name, matched case-insensitively.
    #[serde(default, deserialize_with = "deserialize_optional_string", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Free-text query applied in addition to the search box text.
    #[serde(default, deserialize_with = "deserialize_optional_string", skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl ScheduleFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_date_range(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    pub fn with_client(mut self, client_id: Uuid) -> Self {
        self.client_id = Some(client_id);
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

    pub fn with_car(mut self, car_id: Uuid) -> Self {
        self.car_id = Some(car_id);
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    fn has_date_range(&self) -> bool {
        self.from.is_some() || self.to.is_some()
    }

    fn active_query(&self) -> Option<&str> {
        self.query.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }

    fn active_status(&self) -> Option<&str> {
        self.status.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

/// A record the filter engine can match against.
pub trait Filterable {
    /// The instant the date range applies to.
    fn start(&self) -> Option<DateTime<Utc>>;
    fn client_id(&self) -> Option<Uuid>;
    fn mechanic_id(&self) -> Option<Uuid>;
    fn service_id(&self) -> Option<Uuid>;
    fn car_id(&self) -> Option<Uuid>;
    fn status_name(&self) -> &'static str;
    /// Texts searched by free-text queries.
    fn search_fields(&self) -> Vec<&str>;
}

impl Filterable for Reservation {
    fn start(&self) -> Option<DateTime<Utc>> {
        self.visit_start
    }

    fn client_id(&self) -> Option<Uuid> {
        self.client_id
    }

    fn mechanic_id(&self) -> Option<Uuid> {
        self.mechanic_id
    }

    fn service_id(&self) -> Option<Uuid> {
        self.service_id
    }

    fn car_id(&self) -> Option<Uuid> {
        self.car_id
    }

    fn status_name(&self) -> &'static str {
        self.status.as_str()
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = Vec::with_capacity(4);
        fields.extend(self.client_name());
        if let Some(car) = &self.car {
            fields.push(car.make.as_str());
            fields.push(car.model.as_str());
        }
        fields.extend(self.service_name());
        fields
    }
}

impl Filterable for RepairJob {
    fn start(&self) -> Option<DateTime<Utc>> {
        self.start
    }

    fn client_id(&self) -> Option<Uuid> {
        self.client_id
    }

    fn mechanic_id(&self) -> Option<Uuid> {
        self.mechanic_id
    }

    fn service_id(&self) -> Option<Uuid> {
        self.service_id
    }

    fn car_id(&self) -> Option<Uuid> {
        self.car_id
    }

    fn status_name(&self) -> &'static str {
        self.status.as_str()
    }

    fn search_fields(&self) -> Vec<&str> {
        self.client_name()
            .into_iter()
            .chain(self.service_name())
            .chain(self.mechanic_name())
            .collect()
    }
}

fn matches_text<T: Filterable>(record: &T, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    record
        .search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

fn matches<T: Filterable>(record: &T, filter: &ScheduleFilter, search_text: Option<&str>) -> bool {
    if let Some(text) = search_text {
        if !matches_text(record, text) {
            return false;
        }
    }
    if let Some(query) = filter.active_query() {
        if !matches_text(record, query) {
            return false;
        }
    }

    if filter.has_date_range() {
        let Some(day) = record.start().map(|start| start.date_naive()) else {
            return false;
        };
        if !(filter.from.is_none_or(|from| day >= from) && filter.to.is_none_or(|to| day <= to)) {
            return false;
        }
    }

    filter.client_id.is_none_or(|id| record.client_id() == Some(id))
        && filter.mechanic_id.is_none_or(|id| record.mechanic_id() == Some(id))
        && filter.service_id.is_none_or(|id| record.service_id() == Some(id))
        && filter.car_id.is_none_or(|id| record.car_id() == Some(id))
        && filter
            .active_status()
            .is_none_or(|status| record.status_name().eq_ignore_ascii_case(status))
}

/// Returns true if `record` satisfies every active constraint.
pub fn matches_filters<T: Filterable>(record: &T, filter: &ScheduleFilter, search_text: &str) -> bool {
    let search_text = Some(search_text.trim()).filter(|s| !s.is_empty());
    matches(record, filter, search_text)
}

/// Returns the records satisfying every active constraint, in input order.
pub fn apply_filters<T: Filterable + Clone>(
    records: &[T],
    filter: &ScheduleFilter,
    search_text: &str,
) -> Vec<T> {
    records
        .iter()
        .filter(|record| matches_filters(*record, filter, search_text))
        .cloned()
        .collect()
}

/// Returns true if any filter dimension is set.
pub fn has_active_filters(filter: &ScheduleFilter) -> bool {
    active_filter_count(filter) > 0
}

/// Counts active dimensions. The date range counts once.
pub fn active_filter_count(filter: &ScheduleFilter) -> usize {
    [
        filter.has_date_range(),
        filter.client_id.is_some(),
        filter.mechanic_id.is_some(),
        filter.service_id.is_some(),
        filter.car_id.is_some(),
        filter.active_status().is_some(),
        filter.active_query().is_some(),
    ]
    .into_iter()
    .filter(|active| *active)
    .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::{Car, Client, Mechanic, RepairJobStatus, ReservationStatus, Service};
    use chrono::TimeZone;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap()
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    struct Fixture {
        ana: Client,
        bruno: Client,
        marta: Mechanic,
        reservations: Vec<Reservation>,
        jobs: Vec<RepairJob>,
    }

    fn fixture() -> Fixture {
        let ana = Client::new("Ana Díaz");
        let bruno = Client::new("Bruno Costa");
        let marta = Mechanic::new("Marta Ruiz", "marta@shop.test");
        let jonas = Mechanic::new("Jonas Berg", "jonas@shop.test");
        let brakes = Service::new("Brake replacement");

        let reservations = vec![
            Reservation::new(Some(at(15, 9)), None)
                .with_client(ana.clone())
                .with_car(Car::new("Toyota", "Corolla"))
                .with_mechanic(marta.clone()),
            Reservation::new(Some(at(16, 10)), None)
                .with_client(bruno.clone())
                .with_car(Car::new("Volkswagen", "Golf"))
                .with_service(brakes.clone())
                .with_status(ReservationStatus::Unconfirmed),
            Reservation::new(None, None).with_client(ana.clone()),
        ];
        let jobs = vec![
            RepairJob::new(Some(at(15, 8)), None)
                .with_client(bruno.clone())
                .with_mechanic(marta.clone())
                .with_service(brakes),
            RepairJob::new(Some(at(17, 8)), None)
                .with_client(ana.clone())
                .with_mechanic(jonas)
                .with_status(RepairJobStatus::InProgress),
        ];

        Fixture {
            ana,
            bruno,
            marta,
            reservations,
            jobs,
        }
    }

    #[test]
    fn test_empty_filter_is_identity() {
        let f = fixture();
        let filter = ScheduleFilter::default();

        assert_eq!(apply_filters(&f.reservations, &filter, ""), f.reservations);
        assert_eq!(apply_filters(&f.jobs, &filter, "   "), f.jobs);
        assert!(!has_active_filters(&filter));
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let f = fixture();

        let found = apply_filters(&f.reservations, &ScheduleFilter::default(), "GOLF");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].client_id, Some(f.bruno.id));

        let found = apply_filters(&f.jobs, &ScheduleFilter::default(), "marta");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].client_id, Some(f.bruno.id));
    }

    #[test]
    fn test_reservation_search_ignores_mechanic_name() {
        let f = fixture();
        let found = apply_filters(&f.reservations, &ScheduleFilter::default(), "Marta");
        assert!(found.is_empty());
    }

    #[test]
    fn test_search_text_and_query_both_apply() {
        let f = fixture();
        let filter = ScheduleFilter::new().with_query("brake");

        assert_eq!(apply_filters(&f.reservations, &filter, "bruno").len(), 1);
        assert!(apply_filters(&f.reservations, &filter, "ana").is_empty());
    }

    #[test]
    fn test_date_range_is_inclusive_and_excludes_missing_start() {
        let f = fixture();
        let filter = ScheduleFilter::new().with_date_range(Some(date(15)), Some(date(15)));

        let found = apply_filters(&f.reservations, &filter, "");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].client_id, Some(f.ana.id));

        let open_ended = ScheduleFilter::new().with_date_range(Some(date(16)), None);
        assert_eq!(apply_filters(&f.jobs, &open_ended, "").len(), 1);
    }

    #[test]
    fn test_status_matches_case_insensitively() {
        let f = fixture();
        let filter = ScheduleFilter::new().with_status("IN_PROGRESS");

        let found = apply_filters(&f.jobs, &filter, "");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].status, RepairJobStatus::InProgress);
    }

    #[test]
    fn test_constraints_intersect_in_any_order() {
        let f = fixture();
        let by_mechanic = ScheduleFilter::new().with_mechanic(f.marta.id);
        let by_client = ScheduleFilter::new().with_client(f.bruno.id);
        let both = ScheduleFilter::new()
            .with_mechanic(f.marta.id)
            .with_client(f.bruno.id);

        let combined = apply_filters(&f.jobs, &both, "");
        let chained = apply_filters(&apply_filters(&f.jobs, &by_mechanic, ""), &by_client, "");
        let reversed = apply_filters(&apply_filters(&f.jobs, &by_client, ""), &by_mechanic, "");

        assert_eq!(combined.len(), 1);
        assert_eq!(combined, chained);
        assert_eq!(combined, reversed);
    }

    #[test]
    fn test_filter_preserves_input_order() {
        let f = fixture();
        let found = apply_filters(&f.reservations, &ScheduleFilter::new().with_client(f.ana.id), "");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].id, f.reservations[0].id);
        assert_eq!(found[1].id, f.reservations[2].id);
    }

    #[test]
    fn test_active_filter_count() {
        let filter = ScheduleFilter::new()
            .with_date_range(Some(date(1)), Some(date(31)))
            .with_status("confirmed")
            .with_query("  ");

        assert_eq!(active_filter_count(&filter), 2);
        assert!(has_active_filters(&filter));

        let filter = filter.with_query("golf").with_car(Uuid::new_v4());
        assert_eq!(active_filter_count(&filter), 4);
    }

    #[test]
    fn test_filter_deserializes_blank_query_params() {
        let filter: ScheduleFilter =
            serde_json::from_str(r#"{"from": "", "status": "", "client_id": ""}"#).unwrap();
        assert_eq!(filter, ScheduleFilter::default());
    }
}
