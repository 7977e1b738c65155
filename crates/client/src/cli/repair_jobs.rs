//! Repair job CLI commands.

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use uuid::Uuid;
use workshop_core::booking::{CreateRepairJobRequest, RepairJobStatus, UpdateRepairJobRequest};

use super::parse_instant_arg;

/// Repair job management commands.
#[derive(Debug, Parser)]
pub struct RepairJobsCommand {
    #[command(subcommand)]
    pub action: RepairJobsAction,
}

/// Available repair job actions.
#[derive(Debug, Subcommand)]
pub enum RepairJobsAction {
    /// List repair jobs visible to the caller.
    List,
    /// Get repair job by ID.
    Get { id: Uuid },
    /// Create a repair job (staff only).
    Create(CreateRepairJobArgs),
    /// Update a repair job.
    Update(UpdateRepairJobArgs),
    /// Cancel a repair job. The record is kept.
    Cancel {
        id: Uuid,
        #[arg(long)]
        expected_version: Option<u64>,
    },
    /// Delete a repair job (managers only).
    Delete { id: Uuid },
}

#[derive(Debug, Args)]
pub struct CreateRepairJobArgs {
    #[arg(long)]
    pub client_id: Option<Uuid>,
    #[arg(long)]
    pub car_id: Option<Uuid>,
    #[arg(long)]
    pub mechanic_id: Option<Uuid>,
    #[arg(long)]
    pub service_id: Option<Uuid>,
    /// Job start (e.g. 2024-01-15T08:00).
    #[arg(long, value_parser = parse_instant_arg)]
    pub start: DateTime<Utc>,
    /// Job end. Defaults to two hours after start.
    #[arg(long, value_parser = parse_instant_arg)]
    pub end: Option<DateTime<Utc>>,
    #[arg(long)]
    pub status: Option<RepairJobStatus>,
    #[arg(long)]
    pub details: Option<String>,
}

impl CreateRepairJobArgs {
    pub fn into_request(self) -> CreateRepairJobRequest {
        let mut request = CreateRepairJobRequest::new(self.start);
        request.client_id = self.client_id;
        request.car_id = self.car_id;
        request.mechanic_id = self.mechanic_id;
        request.service_id = self.service_id;
        request.end = self.end;
        request.status = self.status;
        request.additional_details = self.details;
        request
    }
}

#[derive(Debug, Args)]
pub struct UpdateRepairJobArgs {
    pub id: Uuid,
    #[arg(long)]
    pub client_id: Option<Uuid>,
    #[arg(long)]
    pub car_id: Option<Uuid>,
    #[arg(long)]
    pub mechanic_id: Option<Uuid>,
    #[arg(long)]
    pub service_id: Option<Uuid>,
    #[arg(long, value_parser = parse_instant_arg)]
    pub start: Option<DateTime<Utc>>,
    #[arg(long, value_parser = parse_instant_arg)]
    pub end: Option<DateTime<Utc>>,
    #[arg(long)]
    pub status: Option<RepairJobStatus>,
    #[arg(long)]
    pub details: Option<String>,
    #[arg(long)]
    pub expected_version: Option<u64>,
}

impl UpdateRepairJobArgs {
    pub fn to_request(&self) -> UpdateRepairJobRequest {
        UpdateRepairJobRequest {
            client_id: self.client_id,
            car_id: self.car_id,
            mechanic_id: self.mechanic_id,
            service_id: self.service_id,
            start: self.start,
            end: self.end,
            status: self.status,
            additional_details: self.details.clone(),
            expected_version: self.expected_version,
        }
    }
}
