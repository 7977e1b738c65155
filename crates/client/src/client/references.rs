//! Reference data operations.

use reqwest::Method;
use workshop_core::booking::{Car, Client, Mechanic, Service};

use super::WorkshopClient;
use crate::error::Result;

impl WorkshopClient {
    pub async fn list_clients(&self) -> Result<Vec<Client>> {
        let response = self.request(Method::GET, "/api/clients").send().await?;
        self.handle_response(response).await
    }

    pub async fn list_mechanics(&self) -> Result<Vec<Mechanic>> {
        let response = self.request(Method::GET, "/api/mechanics").send().await?;
        self.handle_response(response).await
    }

    pub async fn list_services(&self) -> Result<Vec<Service>> {
        let response = self.request(Method::GET, "/api/services").send().await?;
        self.handle_response(response).await
    }

    pub async fn list_cars(&self) -> Result<Vec<Car>> {
        let response = self.request(Method::GET, "/api/cars").send().await?;
        self.handle_response(response).await
    }
}
