//! Fixed console settings shared by the browser and native front-ends

use std::time::Duration;

/// Session and transport constants
pub struct SessionConfig;

impl SessionConfig {
    /// Storage key holding the session credential
    pub const CREDENTIAL_KEY: &'static str = "token";

    /// Hard-redirect target used when the session is torn down
    pub const LOGIN_HREF: &'static str = "/#/login";

    /// Path prefix of every admin API call
    pub const API_BASE_PATH: &'static str = "/admin";

    /// Per-call ceiling for admin API requests
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

    /// Shown when a failure carries no server-provided message
    pub const DEFAULT_ERROR_MESSAGE: &'static str = "Request failed";
}
