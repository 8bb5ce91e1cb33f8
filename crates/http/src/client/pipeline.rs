//! Ordered request/failure stages applied to every admin call
//!
//! The standard pipeline is:
//!
//! 1. request: [`BearerAuth`] attaches `Authorization: Bearer <token>` when a credential
//!    is stored
//! 2. success: the body is decoded into the caller's type (done by the client)
//! 3. failure: [`NotifyUser`] shows the error, then [`SessionTeardown`] clears the
//!    credential and hard-redirects to login when the status is 401
//!
//! The error is always returned to the caller after the failure stages ran.

use super::error::ClientError;
use console_core::SessionContext;
use reqwest::{RequestBuilder, header};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// A named step of the pipeline
///
/// Both hooks default to pass-through so a stage only implements the side it cares about.
pub trait PipelineStage: Send + Sync {
    fn name(&self) -> &'static str;

    /// Decorate an outgoing request
    fn prepare(&self, request: RequestBuilder, _session: &SessionContext) -> RequestBuilder {
        request
    }

    /// React to a failed call
    fn on_failure(&self, _error: &ClientError, _session: &SessionContext) {}
}

/// Attach the stored credential as a bearer token
#[derive(Debug, Default, Clone, Copy)]
pub struct BearerAuth;

impl PipelineStage for BearerAuth {
    fn name(&self) -> &'static str {
        "bearer_auth"
    }

    fn prepare(&self, request: RequestBuilder, session: &SessionContext) -> RequestBuilder {
        match session.credential() {
            Some(credential) => request.header(header::AUTHORIZATION, credential.bearer()),
            None => request,
        }
    }
}

/// Show every failure through the session's notifier
#[derive(Debug, Default, Clone, Copy)]
pub struct NotifyUser;

impl PipelineStage for NotifyUser {
    fn name(&self) -> &'static str {
        "notify_user"
    }

    fn on_failure(&self, error: &ClientError, session: &SessionContext) {
        session.notify_error(error.user_message());
    }
}

/// Clear the credential and restart at login when the backend answers 401
#[derive(Debug, Default, Clone, Copy)]
pub struct SessionTeardown;

impl PipelineStage for SessionTeardown {
    fn name(&self) -> &'static str {
        "session_teardown"
    }

    fn on_failure(&self, error: &ClientError, session: &SessionContext) {
        if error.is_unauthorized() {
            session.teardown();
        }
    }
}

/// Ordered list of stages
#[derive(Clone, Default)]
pub struct Pipeline {
    request_stages: Vec<Arc<dyn PipelineStage>>,
    failure_stages: Vec<Arc<dyn PipelineStage>>,
}

impl Pipeline {
    /// Pipeline with no stages
    pub fn empty() -> Self {
        Self::default()
    }

    /// The console's standard pipeline
    pub fn standard() -> Self {
        Self::empty()
            .with_request_stage(BearerAuth)
            .with_failure_stage(NotifyUser)
            .with_failure_stage(SessionTeardown)
    }

    /// Append a request stage
    #[must_use]
    pub fn with_request_stage(mut self, stage: impl PipelineStage + 'static) -> Self {
        self.request_stages.push(Arc::new(stage));
        self
    }

    /// Append a failure stage
    #[must_use]
    pub fn with_failure_stage(mut self, stage: impl PipelineStage + 'static) -> Self {
        self.failure_stages.push(Arc::new(stage));
        self
    }

    /// Run request stages in order
    pub fn prepare(&self, request: RequestBuilder, session: &SessionContext) -> RequestBuilder {
        self.request_stages
            .iter()
            .fold(request, |request, stage| stage.prepare(request, session))
    }

    /// Run failure stages in order and hand the error back
    pub fn fail(&self, error: ClientError, session: &SessionContext) -> ClientError {
        for stage in &self.failure_stages {
            debug!(stage = stage.name(), "Running failure stage");
            stage.on_failure(&error, session);
        }
        error
    }

    /// Names of the request stages, in order
    pub fn request_stage_names(&self) -> Vec<&'static str> {
        self.request_stages.iter().map(|s| s.name()).collect()
    }

    /// Names of the failure stages, in order
    pub fn failure_stage_names(&self) -> Vec<&'static str> {
        self.failure_stages.iter().map(|s| s.name()).collect()
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("request_stages", &self.request_stage_names())
            .field("failure_stages", &self.failure_stage_names())
            .finish()
    }
}
