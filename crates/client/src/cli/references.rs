//! Reference data CLI commands.

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
pub struct ReferencesCommand {
    #[command(subcommand)]
    pub action: ReferencesAction,
}

#[derive(Debug, Subcommand)]
pub enum ReferencesAction {
    Clients,
    Mechanics,
    Services,
    Cars,
}
