//! Admin API payloads
//!
//! The backend serializes its models with Go field names, so most resources use
//! PascalCase on the wire while the user endpoints use lower camel case.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Bookkeeping columns shared by persisted records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMeta {
    #[serde(rename = "ID")]
    pub id: u64,
    #[serde(rename = "CreatedAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "UpdatedAt")]
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "DeletedAt", default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Upstream AI provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    #[serde(flatten)]
    pub meta: RecordMeta,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "APIAddress")]
    pub api_address: String,
    #[serde(rename = "APIKey")]
    pub api_key: String,
    /// Model requested upstream, e.g. `gpt-4` or `deepseek-chat`
    #[serde(rename = "ModelName")]
    pub model_name: String,
}

/// Fields accepted when creating or updating a provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderInput {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "APIAddress")]
    pub api_address: String,
    #[serde(rename = "APIKey")]
    pub api_key: String,
    #[serde(rename = "ModelName")]
    pub model_name: String,
}

/// Public API path routed to a provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    #[serde(flatten)]
    pub meta: RecordMeta,
    /// Public path such as `/api/translate`
    #[serde(rename = "Path")]
    pub path: String,
    #[serde(rename = "SystemPrompt", default)]
    pub system_prompt: String,
    /// Key clients present when calling this endpoint
    #[serde(rename = "ApiKey")]
    pub api_key: String,
    #[serde(rename = "ProviderID")]
    pub provider_id: u64,
    /// Only populated by list and update responses
    #[serde(rename = "Provider", default)]
    pub provider: Option<Provider>,
    #[serde(rename = "StreamOutput", default)]
    pub stream_output: bool,
}

/// Fields accepted when creating or updating an endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointInput {
    #[serde(rename = "Path")]
    pub path: String,
    #[serde(rename = "SystemPrompt")]
    pub system_prompt: String,
    #[serde(rename = "ApiKey")]
    pub api_key: String,
    #[serde(rename = "ProviderID")]
    pub provider_id: u64,
    #[serde(rename = "StreamOutput")]
    pub stream_output: bool,
}

/// Per-endpoint usage counters for one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiStats {
    #[serde(rename = "ID")]
    pub id: u64,
    #[serde(rename = "APIEndpointID")]
    pub api_endpoint_id: u64,
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "CallCount")]
    pub call_count: i64,
    #[serde(rename = "InputTokens")]
    pub input_tokens: i64,
    #[serde(rename = "OutputTokens")]
    pub output_tokens: i64,
    #[serde(rename = "CacheHitTokens")]
    pub cache_hit_tokens: i64,
    #[serde(rename = "LastUpdated")]
    pub last_updated: DateTime<Utc>,
}

/// Signed-in administrator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: u64,
    pub username: String,
    pub created: DateTime<Utc>,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Password change request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChangeRequest {
    pub old_password: String,
    pub new_password: String,
}

/// Profile update request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfoUpdate {
    pub username: String,
}

/// Acknowledgement returned by mutating calls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
