//! Admin console HTTP client

mod deadline;
pub mod endpoints;
pub mod error;
pub mod pipeline;
pub mod providers;
pub mod stats;
pub mod user;

use console_core::{SessionConfig, SessionContext};
use error::{ClientError, extract_error_message};
use pipeline::Pipeline;
use reqwest::{Client, ClientBuilder, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Client for the admin API
///
/// Cheap to clone; clones share the connection pool, the session and the pipeline.
#[derive(Clone)]
pub struct ConsoleClient {
    client: Client,
    base_url: String,
    timeout: Duration,
    session: SessionContext,
    pipeline: Arc<Pipeline>,
}

impl ConsoleClient {
    /// Create a client for `origin` with the standard pipeline and settings
    pub fn new(origin: impl Into<String>, session: SessionContext) -> Result<Self, ClientError> {
        Self::builder().origin(origin).session(session).build()
    }

    /// Create a new client builder
    pub fn builder() -> ConsoleClientBuilder {
        ConsoleClientBuilder::default()
    }

    /// Origin plus API prefix, e.g. `http://localhost:8080/admin`
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Per-call ceiling, enforced on every target
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Create a request builder for a path under the API prefix
    ///
    /// Request stages are applied later, by [`Self::execute`].
    pub fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, url)
    }

    /// Run a request through the pipeline and decode the payload
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let request = self.pipeline.prepare(request, &self.session);

        #[cfg(target_arch = "wasm32")]
        let outcome = deadline::with_timeout(Self::send(request), self.timeout).await;
        #[cfg(not(target_arch = "wasm32"))]
        let outcome = Self::send(request).await;

        match outcome {
            Ok(payload) => Ok(payload),
            Err(error) => {
                warn!("Admin call failed: {error}");
                Err(self.fail(error))
            }
        }
    }

    /// Issue a call with an optional JSON body
    pub async fn call<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        debug!(%method, path, "Admin call");
        let mut request = self.request(method, path);
        if let Some(body) = body {
            request = request.json(body);
        }
        self.execute(request).await
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.call::<T, ()>(Method::GET, path, None).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.call(Method::POST, path, Some(body)).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.call(Method::PUT, path, Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.call::<T, ()>(Method::DELETE, path, None).await
    }

    /// Run failure stages for an error raised outside of `execute`
    pub(crate) fn fail(&self, error: ClientError) -> ClientError {
        self.pipeline.fail(error, &self.session)
    }

    async fn send<T: DeserializeOwned>(request: reqwest::RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if status.is_success() {
            Ok(serde_json::from_slice(&body)?)
        } else {
            Err(ClientError::from_status(status, extract_error_message(&body)))
        }
    }
}

impl std::fmt::Debug for ConsoleClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleClient")
            .field("base_url", &self.base_url)
            .field("pipeline", &self.pipeline)
            .finish_non_exhaustive()
    }
}

/// Builder for ConsoleClient
#[derive(Default)]
pub struct ConsoleClientBuilder {
    origin: Option<String>,
    base_path: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    session: Option<SessionContext>,
    pipeline: Option<Pipeline>,
}

impl ConsoleClientBuilder {
    /// Scheme and authority of the backend, e.g. `http://localhost:8080`
    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Override the API prefix (defaults to `/admin`)
    pub fn base_path(mut self, path: impl Into<String>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    /// Override the per-call timeout (defaults to 10 seconds)
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Session shared with the route guard
    pub fn session(mut self, session: SessionContext) -> Self {
        self.session = Some(session);
        self
    }

    /// Replace the standard pipeline
    pub fn pipeline(mut self, pipeline: Pipeline) -> Self {
        self.pipeline = Some(pipeline);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<ConsoleClient, ClientError> {
        let origin = self
            .origin
            .ok_or_else(|| ClientError::Configuration("origin is required".into()))?;
        let session = self
            .session
            .ok_or_else(|| ClientError::Configuration("session is required".into()))?;

        let base_path = self
            .base_path
            .unwrap_or_else(|| SessionConfig::API_BASE_PATH.to_string());
        if !base_path.is_empty() && !base_path.starts_with('/') {
            return Err(ClientError::Configuration(format!(
                "base path '{base_path}' must start with '/'"
            )));
        }

        // Ensure the joined URL has exactly one slash between origin and prefix
        let base_url = format!(
            "{}{}",
            origin.trim_end_matches('/'),
            base_path.trim_end_matches('/')
        );

        let timeout = self.timeout.unwrap_or(SessionConfig::REQUEST_TIMEOUT);
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| concat!("console-http/", env!("CARGO_PKG_VERSION")).to_string());

        #[cfg(not(target_arch = "wasm32"))]
        let client = ClientBuilder::new()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        #[cfg(target_arch = "wasm32")]
        let client = {
            let _ = user_agent; // Browsers own the user agent
            ClientBuilder::new().build()?
        };

        Ok(ConsoleClient {
            client,
            base_url,
            timeout,
            session,
            pipeline: Arc::new(self.pipeline.unwrap_or_else(Pipeline::standard)),
        })
    }
}
