//! Booking duration rules.
//!
//! Reservations must last between 30 and 120 minutes. Repair jobs only need a
//! consistent ordering and may span several days.

use chrono::{DateTime, Duration, Utc};

use super::error::ValidationError;
use super::types::{RepairJob, Reservation};

/// Shortest bookable reservation, in minutes.
pub const MIN_RESERVATION_MINUTES: i64 = 30;
/// Longest bookable reservation, in minutes.
pub const MAX_RESERVATION_MINUTES: i64 = 120;

/// Validates a reservation's start/end pair.
///
/// Rules are checked in order: ordering, minimum length, maximum length.
pub fn validate_duration(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), ValidationError> {
    if end <= start {
        return Err(ValidationError::InvalidOrder);
    }

    let length = end - start;
    if length < Duration::minutes(MIN_RESERVATION_MINUTES) {
        return Err(ValidationError::TooShort);
    }
    if length > Duration::minutes(MAX_RESERVATION_MINUTES) {
        return Err(ValidationError::TooLong);
    }

    Ok(())
}

/// Validates a reservation window that may still be a draft.
///
/// Nothing is checked until both instants are chosen.
pub fn validate_reservation_window(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> Result<(), ValidationError> {
    match (start, end) {
        (Some(start), Some(end)) => validate_duration(start, end),
        _ => Ok(()),
    }
}

/// Validates a repair job window: ordering only, no ceiling.
pub fn validate_repair_job_window(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> Result<(), ValidationError> {
    match (start, end) {
        (Some(start), Some(end)) if end <= start => Err(ValidationError::InvalidOrder),
        _ => Ok(()),
    }
}

pub fn validate_reservation(reservation: &Reservation) -> Result<(), ValidationError> {
    validate_reservation_window(reservation.visit_start, reservation.visit_end)
}

pub fn validate_repair_job(job: &RepairJob) -> Result<(), ValidationError> {
    validate_repair_job_window(job.start, job.end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, hour, min, 0).unwrap()
    }

    #[test]
    fn test_twenty_minute_visit_is_too_short() {
        assert_eq!(
            validate_duration(at(9, 0), at(9, 20)),
            Err(ValidationError::TooShort)
        );
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert_eq!(validate_duration(at(9, 0), at(9, 30)), Ok(()));
        assert_eq!(validate_duration(at(9, 0), at(11, 0)), Ok(()));
        assert_eq!(validate_duration(at(9, 0), at(10, 15)), Ok(()));
    }

    #[test]
    fn test_longer_than_two_hours_is_too_long() {
        assert_eq!(
            validate_duration(at(9, 0), at(11, 1)),
            Err(ValidationError::TooLong)
        );
        // A few seconds past the ceiling still counts.
        let end = at(11, 0) + Duration::seconds(30);
        assert_eq!(
            validate_duration(at(9, 0), end),
            Err(ValidationError::TooLong)
        );
    }

    #[test]
    fn test_end_before_or_at_start_is_invalid_order() {
        assert_eq!(
            validate_duration(at(9, 0), at(9, 0)),
            Err(ValidationError::InvalidOrder)
        );
        assert_eq!(
            validate_duration(at(10, 0), at(9, 0)),
            Err(ValidationError::InvalidOrder)
        );
    }

    #[test]
    fn test_duration_bands_over_every_minute() {
        for minutes in -10..=200 {
            let end = at(9, 0) + Duration::minutes(minutes);
            let expected = if minutes <= 0 {
                Err(ValidationError::InvalidOrder)
            } else if minutes < 30 {
                Err(ValidationError::TooShort)
            } else if minutes > 120 {
                Err(ValidationError::TooLong)
            } else {
                Ok(())
            };
            assert_eq!(validate_duration(at(9, 0), end), expected, "{minutes} min");
        }
    }

    #[test]
    fn test_draft_window_is_not_validated() {
        assert_eq!(validate_reservation_window(Some(at(9, 0)), None), Ok(()));
        assert_eq!(validate_reservation_window(None, Some(at(9, 5))), Ok(()));
        assert_eq!(
            validate_reservation_window(Some(at(9, 0)), Some(at(9, 5))),
            Err(ValidationError::TooShort)
        );
    }

    #[test]
    fn test_repair_jobs_have_no_ceiling() {
        let start = at(8, 0);
        let end = start + Duration::days(3);
        assert_eq!(validate_repair_job_window(Some(start), Some(end)), Ok(()));
        assert_eq!(
            validate_repair_job_window(Some(end), Some(start)),
            Err(ValidationError::InvalidOrder)
        );
    }

    #[test]
    fn test_validate_reservation_record() {
        let reservation = Reservation::new(Some(at(9, 0)), Some(at(9, 20)));
        assert_eq!(
            validate_reservation(&reservation),
            Err(ValidationError::TooShort)
        );

        let job = RepairJob::new(Some(at(9, 0)), Some(at(8, 0)));
        assert_eq!(validate_repair_job(&job), Err(ValidationError::InvalidOrder));
    }
}
