//! Health check operations.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::WorkshopClient;
use crate::error::Result;

/// Server health summary.
#[derive(Debug, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    pub reservations: usize,
    pub repair_jobs: usize,
}

impl WorkshopClient {
    /// Check server health and store counts.
    pub async fn health(&self) -> Result<Health> {
        let response = self.request(Method::GET, "/healthz").send().await?;
        self.handle_response(response).await
    }
}
