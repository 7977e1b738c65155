//! Schedule view command.

use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use uuid::Uuid;
use workshop_core::schedule::{Direction, Granularity, ScheduleFilter};

/// Arguments for the schedule view.
#[derive(Debug, Args)]
pub struct ScheduleArgs {
    /// Window size.
    #[arg(long, value_enum, default_value = "week")]
    pub granularity: GranularityArg,
    /// Any date inside the window (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub date: Option<NaiveDate>,
    /// Move the window one step before loading.
    #[arg(long, value_enum)]
    pub shift: Option<ShiftArg>,
    /// Free-text search over client, car, mechanic and service names.
    #[arg(long)]
    pub search: Option<String>,
    /// Only bookings starting on or after this date.
    #[arg(long)]
    pub from: Option<NaiveDate>,
    /// Only bookings starting on or before this date.
    #[arg(long)]
    pub to: Option<NaiveDate>,
    #[arg(long)]
    pub client_id: Option<Uuid>,
    #[arg(long)]
    pub mechanic_id: Option<Uuid>,
    #[arg(long)]
    pub service_id: Option<Uuid>,
    #[arg(long)]
    pub car_id: Option<Uuid>,
    /// Status name, matched against either booking kind.
    #[arg(long)]
    pub status: Option<String>,
    /// Case-insensitive text filter.
    #[arg(long)]
    pub query: Option<String>,
}

impl ScheduleArgs {
    pub fn filter(&self) -> ScheduleFilter {
        ScheduleFilter {
            from: self.from,
            to: self.to,
            client_id: self.client_id,
            mechanic_id: self.mechanic_id,
            service_id: self.service_id,
            car_id: self.car_id,
            status: self.status.clone(),
            query: self.query.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum GranularityArg {
    Day,
    Week,
    Month,
}

impl From<GranularityArg> for Granularity {
    fn from(g: GranularityArg) -> Self {
        match g {
            GranularityArg::Day => Granularity::Day,
            GranularityArg::Week => Granularity::Week,
            GranularityArg::Month => Granularity::Month,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ShiftArg {
    Prev,
    Next,
}

impl From<ShiftArg> for Direction {
    fn from(s: ShiftArg) -> Self {
        match s {
            ShiftArg::Prev => Direction::Prev,
            ShiftArg::Next => Direction::Next,
        }
    }
}
