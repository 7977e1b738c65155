use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, Utc};

use super::DateRangeError;

/// A date range with inclusive start and end dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a new date range, validating that start <= end.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if start > end {
            return Err(DateRangeError::InvalidRange);
        }
        Ok(Self { start, end })
    }

    /// A single-day range.
    pub fn day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// Creates a date range for the ISO week containing the given date.
    ///
    /// ISO weeks start on Monday and end on Sunday.
    pub fn week(date: NaiveDate) -> Self {
        let days_from_monday = date.weekday().num_days_from_monday();
        let start = date - Duration::days(days_from_monday as i64);
        let end = start + Duration::days(6);

        Self { start, end }
    }

    /// Creates a date range for the calendar month containing the given date.
    pub fn month(date: NaiveDate) -> Self {
        let start = date.with_day(1).unwrap_or(date);
        let end = start
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(start);

        Self { start, end }
    }

    /// Returns true if the date falls inside the range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Returns true if the half-open interval `[start, end)` touches any day of
    /// this range.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        let last_day = if end > start {
            (end - Duration::nanoseconds(1)).date_naive()
        } else {
            start.date_naive()
        };
        start.date_naive() <= self.end && last_day >= self.start
    }

    /// Number of days covered, including both ends.
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Weekday};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_valid_range_construction() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 31)).unwrap();

        assert_eq!(range.start, date(2024, 1, 1));
        assert_eq!(range.end, date(2024, 1, 31));
        assert_eq!(range.num_days(), 31);
    }

    #[test]
    fn test_invalid_range_returns_error() {
        let result = DateRange::new(date(2024, 1, 31), date(2024, 1, 1));

        assert_eq!(result, Err(DateRangeError::InvalidRange));
    }

    #[test]
    fn test_day_factory() {
        let range = DateRange::day(date(2024, 6, 15));

        assert_eq!(range.num_days(), 1);
        assert!(range.contains(date(2024, 6, 15)));
        assert!(!range.contains(date(2024, 6, 16)));
    }

    #[test]
    fn test_month_factory_february_leap_year() {
        let range = DateRange::month(date(2024, 2, 17));

        assert_eq!(range.start, date(2024, 2, 1));
        assert_eq!(range.end, date(2024, 2, 29));
    }

    #[test]
    fn test_month_factory_december() {
        let range = DateRange::month(date(2024, 12, 31));

        assert_eq!(range.start, date(2024, 12, 1));
        assert_eq!(range.end, date(2024, 12, 31));
    }

    #[test]
    fn test_week_factory_from_wednesday() {
        // 2024-01-03 is a Wednesday
        let range = DateRange::week(date(2024, 1, 3));

        assert_eq!(range.start, date(2024, 1, 1));
        assert_eq!(range.end, date(2024, 1, 7));
        assert_eq!(range.start.weekday(), Weekday::Mon);
        assert_eq!(range.end.weekday(), Weekday::Sun);
    }

    #[test]
    fn test_week_factory_crossing_month_boundary() {
        // 2024-01-31 is a Wednesday, week spans Jan 29 - Feb 4
        let range = DateRange::week(date(2024, 1, 31));

        assert_eq!(range.start, date(2024, 1, 29));
        assert_eq!(range.end, date(2024, 2, 4));
    }

    #[test]
    fn test_overlaps() {
        let range = DateRange::day(date(2024, 1, 15));
        let at = |d: u32, h: u32| Utc.with_ymd_and_hms(2024, 1, d, h, 0, 0).unwrap();

        assert!(range.overlaps(at(15, 9), at(15, 10)));
        // Multi-day job spanning the whole day
        assert!(range.overlaps(at(14, 8), at(16, 17)));
        // Ends exactly at midnight of the range's first day
        assert!(!range.overlaps(at(14, 22), at(15, 0)));
        assert!(!range.overlaps(at(16, 0), at(16, 1)));
    }
}
