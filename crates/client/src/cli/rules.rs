//! Offline booking rule checks.
//!
//! These run the same pure rules the coordinator and server enforce, without
//! contacting the server.

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use workshop_core::booking::Role;

use super::{parse_instant_arg, Kind};

#[derive(Debug, Parser)]
pub struct RulesCommand {
    #[command(subcommand)]
    pub action: RulesAction,
}

#[derive(Debug, Subcommand)]
pub enum RulesAction {
    /// Check a booking window against the duration rules.
    Validate {
        #[arg(long, value_enum, default_value = "reservation")]
        kind: Kind,
        #[arg(long, value_parser = parse_instant_arg)]
        start: DateTime<Utc>,
        #[arg(long, value_parser = parse_instant_arg)]
        end: Option<DateTime<Utc>>,
    },
    /// Check whether a role may move a booking between two statuses.
    CanTransition {
        #[arg(long, value_enum, default_value = "reservation")]
        kind: Kind,
        /// Role to check. Defaults to the global --role.
        #[arg(long = "as")]
        as_role: Option<Role>,
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
    },
}
