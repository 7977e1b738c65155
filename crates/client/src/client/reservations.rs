//! Reservation API operations.

use reqwest::Method;
use uuid::Uuid;
use workshop_core::booking::{CreateReservationRequest, Reservation, UpdateReservationRequest};

use super::WorkshopClient;
use crate::error::Result;

impl WorkshopClient {
    /// List reservations visible to the caller.
    pub async fn list_reservations(&self) -> Result<Vec<Reservation>> {
        let response = self.request(Method::GET, "/api/reservations").send().await?;
        self.handle_response(response).await
    }

    /// Get reservation by ID.
    pub async fn get_reservation(&self, id: Uuid) -> Result<Reservation> {
        let response = self
            .request(Method::GET, &format!("/api/reservations/{}", id))
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Create a new reservation.
    pub async fn create_reservation(&self, req: &CreateReservationRequest) -> Result<Reservation> {
        let response = self
            .request(Method::POST, "/api/reservations")
            .json(req)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Update a reservation.
    pub async fn update_reservation(
        &self,
        id: Uuid,
        req: &UpdateReservationRequest,
    ) -> Result<Reservation> {
        let response = self
            .request(Method::PUT, &format!("/api/reservations/{}", id))
            .json(req)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Cancel a reservation, optionally guarded by the version the caller last saw.
    pub async fn cancel_reservation(
        &self,
        id: Uuid,
        expected_version: Option<u64>,
    ) -> Result<Reservation> {
        let mut builder = self.request(Method::POST, &format!("/api/reservations/{}/cancel", id));
        if let Some(version) = expected_version {
            builder = builder.query(&[("expected_version", version)]);
        }
        let response = builder.send().await?;
        self.handle_response(response).await
    }

    /// Delete reservation by ID.
    pub async fn delete_reservation(&self, id: Uuid) -> Result<()> {
        let response = self
            .request(Method::DELETE, &format!("/api/reservations/{}", id))
            .send()
            .await?;
        self.handle_empty_response(response).await
    }
}
