//! Repair job API operations.

use reqwest::Method;
use uuid::Uuid;
use workshop_core::booking::{CreateRepairJobRequest, RepairJob, UpdateRepairJobRequest};

use super::WorkshopClient;
use crate::error::Result;

impl WorkshopClient {
    /// List repair jobs visible to the caller.
    pub async fn list_repair_jobs(&self) -> Result<Vec<RepairJob>> {
        let response = self.request(Method::GET, "/api/repair-jobs").send().await?;
        self.handle_response(response).await
    }

    /// Get repair job by ID.
    pub async fn get_repair_job(&self, id: Uuid) -> Result<RepairJob> {
        let response = self
            .request(Method::GET, &format!("/api/repair-jobs/{}", id))
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Create a new repair job.
    pub async fn create_repair_job(&self, req: &CreateRepairJobRequest) -> Result<RepairJob> {
        let response = self
            .request(Method::POST, "/api/repair-jobs")
            .json(req)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Update a repair job.
    pub async fn update_repair_job(
        &self,
        id: Uuid,
        req: &UpdateRepairJobRequest,
    ) -> Result<RepairJob> {
        let response = self
            .request(Method::PUT, &format!("/api/repair-jobs/{}", id))
            .json(req)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Cancel a repair job, optionally guarded by the version the caller last saw.
    pub async fn cancel_repair_job(
        &self,
        id: Uuid,
        expected_version: Option<u64>,
    ) -> Result<RepairJob> {
        let mut builder = self.request(Method::POST, &format!("/api/repair-jobs/{}/cancel", id));
        if let Some(version) = expected_version {
            builder = builder.query(&[("expected_version", version)]);
        }
        let response = builder.send().await?;
        self.handle_response(response).await
    }

    /// Delete repair job by ID.
    pub async fn delete_repair_job(&self, id: Uuid) -> Result<()> {
        let response = self
            .request(Method::DELETE, &format!("/api/repair-jobs/{}", id))
            .send()
            .await?;
        self.handle_empty_response(response).await
    }
}
