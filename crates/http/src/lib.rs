//! Admin console HTTP client
//!
//! Every call goes through an explicit [`client::pipeline::Pipeline`]: request stages
//! decorate the outgoing request, successful bodies are decoded straight into the
//! caller's type, and failure stages notify the user and tear the session down on 401
//! before the error is handed back.

pub mod client;
pub mod types;

pub use client::error::ClientError;
pub use client::pipeline::{Pipeline, PipelineStage};
pub use client::{ConsoleClient, ConsoleClientBuilder};
