//! HTTP client for the workshop API.

pub mod health;
pub mod references;
pub mod repair_jobs;
pub mod reservations;

use std::time::Duration;

use reqwest::Method;
use workshop_core::schedule::CallerIdentity;
use workshop_core::storage::{EMAIL_HEADER, ROLE_HEADER, USERNAME_HEADER};

use crate::error::{ClientError, Result};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the workshop API.
///
/// Every request carries the caller identity as `x-workshop-*` headers.
#[derive(Debug, Clone)]
pub struct WorkshopClient {
    client: reqwest::Client,
    base_url: String,
    identity: CallerIdentity,
}

impl WorkshopClient {
    /// Create a new client acting as a manager.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            identity: CallerIdentity::manager(),
        }
    }

    /// Create from environment (WORKSHOP_URL or default).
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("WORKSHOP_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
        Self::new(base_url)
    }

    /// Act as the given caller.
    pub fn with_identity(mut self, identity: CallerIdentity) -> Self {
        self.identity = identity;
        self
    }

    /// Replace the underlying HTTP client with one using the given timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn identity(&self) -> &CallerIdentity {
        &self.identity
    }

    /// Build a URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Start a request with the identity headers attached.
    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self
            .client
            .request(method, self.url(path))
            .header(ROLE_HEADER, self.identity.role.as_str());
        if let Some(email) = &self.identity.email {
            builder = builder.header(EMAIL_HEADER, email);
        }
        if let Some(username) = &self.identity.username {
            builder = builder.header(USERNAME_HEADER, username);
        }
        builder
    }

    /// Handle error responses.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let response = Self::check_status(response).await?;
        response.json().await.map_err(ClientError::from)
    }

    /// Handle responses with no body expected.
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        Self::check_status(response).await.map(|_| ())
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else if status.as_u16() == 404 {
            Err(ClientError::NotFound {
                resource: response.url().path().to_string(),
            })
        } else {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(ClientError::ServerError {
                status: status.as_u16(),
                message,
            })
        }
    }
}
