//! Reservation CLI commands.

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use uuid::Uuid;
use workshop_core::booking::{
    CreateReservationRequest, NewClient, ReservationStatus, UpdateReservationRequest,
};

use super::parse_instant_arg;
use crate::error::{ClientError, Result};

/// Reservation management commands.
#[derive(Debug, Parser)]
pub struct ReservationsCommand {
    #[command(subcommand)]
    pub action: ReservationsAction,
}

/// Available reservation actions.
#[derive(Debug, Subcommand)]
pub enum ReservationsAction {
    /// List reservations visible to the caller.
    List,
    /// Get reservation by ID.
    Get { id: Uuid },
    /// Create a reservation for an existing or a new client.
    Create(CreateReservationArgs),
    /// Update a reservation.
    Update(UpdateReservationArgs),
    /// Cancel a reservation. The record is kept.
    Cancel {
        id: Uuid,
        /// Version the cancellation is based on.
        #[arg(long)]
        expected_version: Option<u64>,
    },
    /// Delete a reservation (managers only).
    Delete { id: Uuid },
}

#[derive(Debug, Args)]
pub struct CreateReservationArgs {
    /// Existing client ID. Omit to register a new client with --name.
    #[arg(long, conflicts_with = "name")]
    pub client_id: Option<Uuid>,
    /// Existing car ID for an existing client.
    #[arg(long, requires = "client_id")]
    pub car_id: Option<Uuid>,
    /// New client name.
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long, requires = "name")]
    pub email: Option<String>,
    #[arg(long, requires = "name")]
    pub phone: Option<String>,
    #[arg(long, requires = "name")]
    pub car_make: Option<String>,
    #[arg(long, requires = "name")]
    pub car_model: Option<String>,
    #[arg(long, requires = "name")]
    pub license_plate: Option<String>,
    #[arg(long)]
    pub mechanic_id: Option<Uuid>,
    #[arg(long)]
    pub service_id: Option<Uuid>,
    /// Visit start (e.g. 2024-01-15T09:00).
    #[arg(long, value_parser = parse_instant_arg)]
    pub start: DateTime<Utc>,
    /// Visit end. Defaults to one hour after start.
    #[arg(long, value_parser = parse_instant_arg)]
    pub end: Option<DateTime<Utc>>,
    /// Initial status (staff only).
    #[arg(long)]
    pub status: Option<ReservationStatus>,
    #[arg(long)]
    pub details: Option<String>,
}

impl CreateReservationArgs {
    /// Builds the API request, checking that exactly one client source is given.
    pub fn into_request(self) -> Result<CreateReservationRequest> {
        let mut request = match (self.client_id, self.name) {
            (Some(client_id), None) => {
                let request = CreateReservationRequest::for_existing_client(client_id, self.start);
                match self.car_id {
                    Some(car_id) => request.with_car(car_id),
                    None => request,
                }
            }
            (None, Some(name)) => {
                let (Some(make), Some(model)) = (self.car_make, self.car_model) else {
                    return Err(ClientError::InvalidInput(
                        "a new client needs --car-make and --car-model".to_string(),
                    ));
                };
                let mut client = NewClient::new(name, make, model);
                client.email = self.email;
                client.phone = self.phone;
                client.license_plate = self.license_plate;
                CreateReservationRequest::for_new_client(client, self.start)
            }
            _ => {
                return Err(ClientError::InvalidInput(
                    "pass either --client-id or --name".to_string(),
                ))
            }
        };

        request.visit_end = self.end;
        request.mechanic_id = self.mechanic_id;
        request.service_id = self.service_id;
        request.status = self.status;
        request.additional_details = self.details;
        Ok(request)
    }
}

#[derive(Debug, Args)]
pub struct UpdateReservationArgs {
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
    pub status: Option<ReservationStatus>,
    #[arg(long)]
    pub details: Option<String>,
    /// Version the edit is based on. Omit to overwrite unconditionally.
    #[arg(long)]
    pub expected_version: Option<u64>,
}

impl UpdateReservationArgs {
    pub fn to_request(&self) -> UpdateReservationRequest {
        UpdateReservationRequest {
            client_id: self.client_id,
            car_id: self.car_id,
            mechanic_id: self.mechanic_id,
            service_id: self.service_id,
            visit_start: self.start,
            visit_end: self.end,
            status: self.status,
            additional_details: self.details.clone(),
            expected_version: self.expected_version,
        }
    }
}
