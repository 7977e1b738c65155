//! Calendar view windows and navigation.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, Months, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::DateRange;

/// How much of the calendar a view shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    #[default]
    Week,
    Month,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown granularity: {0} (expected day, week or month)")]
pub struct ParseGranularityError(pub String);

impl FromStr for Granularity {
    type Err = ParseGranularityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Granularity::Day),
            "week" => Ok(Granularity::Week),
            "month" => Ok(Granularity::Month),
            other => Err(ParseGranularityError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Prev,
    Next,
}

/// Default first visible hour of the working day.
pub fn default_min_time() -> NaiveTime {
    NaiveTime::from_hms_opt(7, 0, 0).unwrap_or(NaiveTime::MIN)
}

/// Default last visible hour of the working day.
pub fn default_max_time() -> NaiveTime {
    NaiveTime::from_hms_opt(19, 0, 0).unwrap_or(NaiveTime::MIN)
}

/// The visible part of the calendar: a date span plus time-of-day bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewWindow {
    pub granularity: Granularity,
    /// Any date inside the window.
    pub anchor: NaiveDate,
    pub min_time: NaiveTime,
    pub max_time: NaiveTime,
}

impl ViewWindow {
    pub fn new(granularity: Granularity, anchor: NaiveDate) -> Self {
        Self {
            granularity,
            anchor,
            min_time: default_min_time(),
            max_time: default_max_time(),
        }
    }

    /// Sets the time-of-day bounds. Ignored unless `min_time < max_time`.
    pub fn with_hours(mut self, min_time: NaiveTime, max_time: NaiveTime) -> Self {
        if min_time < max_time {
            self.min_time = min_time;
            self.max_time = max_time;
        }
        self
    }

    /// The dates covered by this window.
    pub fn date_range(&self) -> DateRange {
        match self.granularity {
            Granularity::Day => DateRange::day(self.anchor),
            Granularity::Week => DateRange::week(self.anchor),
            Granularity::Month => DateRange::month(self.anchor),
        }
    }

    /// Moves one unit of the window's granularity, keeping granularity and hours.
    pub fn navigate(&self, direction: Direction) -> Self {
        let anchor = match (self.granularity, direction) {
            (Granularity::Day, Direction::Next) => self.anchor + Duration::days(1),
            (Granularity::Day, Direction::Prev) => self.anchor - Duration::days(1),
            (Granularity::Week, Direction::Next) => self.anchor + Duration::days(7),
            (Granularity::Week, Direction::Prev) => self.anchor - Duration::days(7),
            (Granularity::Month, Direction::Next) => self
                .anchor
                .checked_add_months(Months::new(1))
                .unwrap_or(self.anchor),
            (Granularity::Month, Direction::Prev) => self
                .anchor
                .checked_sub_months(Months::new(1))
                .unwrap_or(self.anchor),
        };

        Self { anchor, ..*self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_granularity_parse_and_display() {
        assert_eq!("Week".parse::<Granularity>(), Ok(Granularity::Week));
        assert_eq!(" month ".parse::<Granularity>(), Ok(Granularity::Month));
        assert!("year".parse::<Granularity>().is_err());
        assert_eq!(Granularity::Day.to_string(), "day");
    }

    #[test]
    fn test_default_hours() {
        let window = ViewWindow::new(Granularity::Day, date(2024, 1, 15));
        assert_eq!(window.min_time, NaiveTime::from_hms_opt(7, 0, 0).unwrap());
        assert_eq!(window.max_time, NaiveTime::from_hms_opt(19, 0, 0).unwrap());
    }

    #[test]
    fn test_with_hours_rejects_inverted_bounds() {
        let eight = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
        let evening = NaiveTime::from_hms_opt(18, 0, 0).unwrap();

        let window = ViewWindow::new(Granularity::Day, date(2024, 1, 15)).with_hours(evening, eight);
        assert_eq!(window.min_time, default_min_time());

        let window = window.with_hours(eight, evening);
        assert_eq!(window.min_time, eight);
        assert_eq!(window.max_time, evening);
    }

    #[test]
    fn test_navigate_day_and_week() {
        let day = ViewWindow::new(Granularity::Day, date(2024, 1, 31));
        assert_eq!(day.navigate(Direction::Next).anchor, date(2024, 2, 1));

        let week = ViewWindow::new(Granularity::Week, date(2024, 1, 3));
        let previous = week.navigate(Direction::Prev);
        assert_eq!(previous.granularity, Granularity::Week);
        assert_eq!(previous.date_range().start, date(2023, 12, 25));
        assert_eq!(previous.date_range().end, date(2023, 12, 31));
    }

    #[test]
    fn test_navigate_month_clamps_day() {
        let window = ViewWindow::new(Granularity::Month, date(2024, 1, 31));

        let next = window.navigate(Direction::Next);

        assert_eq!(next.anchor, date(2024, 2, 29));
        assert_eq!(next.date_range().end, date(2024, 2, 29));
        assert_eq!(next.navigate(Direction::Prev).date_range().start, date(2024, 1, 1));
    }
}
