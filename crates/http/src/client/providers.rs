//! Provider management methods

use super::{ClientError, ConsoleClient};
use crate::types::{MessageResponse, Provider, ProviderInput};

impl ConsoleClient {
    /// List all providers
    pub async fn list_providers(&self) -> Result<Vec<Provider>, ClientError> {
        self.get("/providers").await
    }

    /// Register a new provider
    pub async fn create_provider(&self, input: &ProviderInput) -> Result<Provider, ClientError> {
        self.post("/providers", input).await
    }

    /// Replace a provider's settings
    pub async fn update_provider(
        &self,
        id: u64,
        input: &ProviderInput,
    ) -> Result<Provider, ClientError> {
        self.put(&format!("/providers/{id}"), input).await
    }

    /// Delete a provider
    pub async fn delete_provider(&self, id: u64) -> Result<MessageResponse, ClientError> {
        self.delete(&format!("/providers/{id}")).await
    }
}
