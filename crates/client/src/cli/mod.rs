//! CLI command definitions.

pub mod references;
pub mod repair_jobs;
pub mod reservations;
pub mod rules;
pub mod schedule;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use workshop_core::booking::{RecordKind, Role};
use workshop_core::schedule::CallerIdentity;

/// CLI client for the workshop scheduling API.
#[derive(Debug, Parser)]
#[command(name = "workshop-client")]
#[command(about = "CLI client for the workshop scheduling API", long_about = None)]
pub struct Cli {
    /// Server base URL.
    #[arg(long, env = "WORKSHOP_URL", default_value = "http://localhost:3000")]
    pub base_url: String,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    /// Role to act as (manager, mechanic or client).
    #[arg(long, env = "WORKSHOP_ROLE", default_value = "manager")]
    pub role: Role,

    /// Caller email, used to scope mechanic and client views.
    #[arg(long, env = "WORKSHOP_EMAIL")]
    pub email: Option<String>,

    /// Caller username, used to scope mechanic views.
    #[arg(long, env = "WORKSHOP_USERNAME")]
    pub username: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, env = "WORKSHOP_TIMEOUT", default_value = "10")]
    pub timeout: u64,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// The caller identity described by the global flags.
    pub fn identity(&self) -> CallerIdentity {
        let mut identity = CallerIdentity::new(self.role);
        identity.email = self.email.clone();
        identity.username = self.username.clone();
        identity
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Booking kind selector.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Kind {
    Reservation,
    RepairJob,
}

impl From<Kind> for RecordKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Reservation => RecordKind::Reservation,
            Kind::RepairJob => RecordKind::RepairJob,
        }
    }
}

/// Parses a date-time flag, accepting RFC 3339 or a naive `YYYY-MM-DDTHH:MM` taken as UTC.
pub fn parse_instant_arg(value: &str) -> Result<DateTime<Utc>, String> {
    workshop_core::serde::parse_instant(value)
        .ok_or_else(|| format!("invalid date-time '{value}' (expected e.g. 2024-01-15T09:00)"))
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the role-scoped schedule for a day, week or month.
    Schedule(schedule::ScheduleArgs),
    /// Reservation management.
    Reservations(reservations::ReservationsCommand),
    /// Repair job management.
    RepairJobs(repair_jobs::RepairJobsCommand),
    /// List clients, mechanics, services and cars.
    References(references::ReferencesCommand),
    /// Offline checks of booking rules.
    Rules(rules::RulesCommand),
    /// Server health check.
    Health,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_from_flags() {
        let cli = Cli::parse_from([
            "workshop-client",
            "--role",
            "client",
            "--email",
            "ana.diaz@example.com",
            "health",
        ]);

        let identity = cli.identity();

        assert_eq!(identity.role, Role::Client);
        assert_eq!(identity.email.as_deref(), Some("ana.diaz@example.com"));
        assert!(identity.username.is_none());
    }

    #[test]
    fn test_unknown_role_rejected() {
        let result = Cli::try_parse_from(["workshop-client", "--role", "admin", "health"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_instant_arg() {
        assert!(parse_instant_arg("2024-01-15T09:00").is_ok());
        assert!(parse_instant_arg("2024-01-15T09:00:00Z").is_ok());
        assert!(parse_instant_arg("tomorrow").is_err());
    }
}
