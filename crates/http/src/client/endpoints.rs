//! Endpoint management methods

use super::{ClientError, ConsoleClient};
use crate::types::{Endpoint, EndpointInput, MessageResponse};

impl ConsoleClient {
    /// List all endpoints with their providers
    pub async fn list_endpoints(&self) -> Result<Vec<Endpoint>, ClientError> {
        self.get("/endpoints").await
    }

    /// Create an endpoint
    pub async fn create_endpoint(&self, input: &EndpointInput) -> Result<Endpoint, ClientError> {
        self.post("/endpoints", input).await
    }

    /// Update an endpoint; the response carries the reloaded provider
    pub async fn update_endpoint(
        &self,
        id: u64,
        input: &EndpointInput,
    ) -> Result<Endpoint, ClientError> {
        self.put(&format!("/endpoints/{id}"), input).await
    }

    /// Delete an endpoint
    pub async fn delete_endpoint(&self, id: u64) -> Result<MessageResponse, ClientError> {
        self.delete(&format!("/endpoints/{id}")).await
    }
}
