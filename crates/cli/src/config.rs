//! Console CLI configuration

use crate::validation::{ValidateConfig, validators};
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File picked up from the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "console.toml";

/// Console CLI configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Admin API settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Dev server settings
    #[serde(default)]
    pub dev: DevServerConfig,
    /// Asset publishing settings
    #[serde(default)]
    pub build: BuildConfig,
}

/// Where the admin API lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Backend origin
    #[serde(default = "default_server_url")]
    pub server_url: String,
    /// Prefix every admin call is issued under
    #[serde(default = "default_api_prefix")]
    pub base_path: String,
    /// Per-call timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Local dev server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
    /// Built assets served for everything outside the proxy prefix
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
    /// Requests under this prefix are forwarded to `proxy_target`
    #[serde(default = "default_api_prefix")]
    pub proxy_prefix: String,
    #[serde(default = "default_server_url")]
    pub proxy_target: String,
}

/// Where `console publish` puts the built assets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,
    /// Remove the previous contents of `out_dir` first
    #[serde(default = "default_true")]
    pub empty_out_dir: bool,
}

fn default_server_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_api_prefix() -> String {
    console_core::SessionConfig::API_BASE_PATH.to_string()
}

fn default_timeout_secs() -> u64 {
    console_core::SessionConfig::REQUEST_TIMEOUT.as_secs()
}

fn default_bind_addr() -> SocketAddr {
    ([127, 0, 0, 1], 5173).into()
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("dist")
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("../backend/static/dist")
}

fn default_true() -> bool {
    true
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            base_path: default_api_prefix(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            static_dir: default_static_dir(),
            proxy_prefix: default_api_prefix(),
            proxy_target: default_server_url(),
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            out_dir: default_out_dir(),
            empty_out_dir: default_true(),
        }
    }
}

impl ApiConfig {
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl ConsoleConfig {
    /// Load configuration from defaults, a config file and `CONSOLE__` environment variables
    ///
    /// An explicit `path` must exist; otherwise `console.toml` in the working directory is
    /// used when present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        match path {
            Some(path) => builder = builder.add_source(File::from(path)),
            None => {
                builder = builder.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false));
            }
        }

        // CONSOLE__API__SERVER_URL, CONSOLE__DEV__BIND_ADDR, ...
        builder = builder.add_source(
            Environment::with_prefix("CONSOLE")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

impl ValidateConfig for ConsoleConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        validators::validate_origin(&self.api.server_url, "api.server_url")?;
        validators::validate_path_prefix(&self.api.base_path, "api.base_path")?;
        validators::validate_positive_secs(self.api.timeout_secs, "api.timeout_secs")?;

        validators::validate_origin(&self.dev.proxy_target, "dev.proxy_target")?;
        validators::validate_path_prefix(&self.dev.proxy_prefix, "dev.proxy_prefix")?;
        validators::validate_port(self.dev.bind_addr.port(), "dev.bind_addr")?;

        if self.build.out_dir.as_os_str().is_empty() {
            return Err(ConfigError::Message(
                "build.out_dir: must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ConsoleConfig::default();
        assert_eq!(config.api.server_url, "http://localhost:8080");
        assert_eq!(config.api.base_path, "/admin");
        assert_eq!(config.api.timeout(), Duration::from_secs(10));
        assert_eq!(config.dev.proxy_prefix, "/admin");
        assert_eq!(config.dev.proxy_target, "http://localhost:8080");
        assert_eq!(config.build.out_dir, PathBuf::from("../backend/static/dist"));
        assert!(config.build.empty_out_dir);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[dev]
bind_addr = "127.0.0.1:3000"
proxy_target = "http://127.0.0.1:9090"

[build]
empty_out_dir = false
"#
        )
        .unwrap();

        let config = ConsoleConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.dev.bind_addr, "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.dev.proxy_target, "http://127.0.0.1:9090");
        assert_eq!(config.dev.proxy_prefix, "/admin");
        assert!(!config.build.empty_out_dir);
        assert_eq!(config.api, ApiConfig::default());
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[api]\nserver_url = \"localhost\"").unwrap();

        let err = ConsoleConfig::load(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("api.server_url"));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        assert!(ConsoleConfig::load(Some(Path::new("/nonexistent/console.toml"))).is_err());
    }

    #[test]
    fn test_validation_failures() {
        let mut config = ConsoleConfig::default();
        config.api.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = ConsoleConfig::default();
        config.dev.proxy_prefix = "admin".into();
        assert!(config.validate().is_err());

        let mut config = ConsoleConfig::default();
        config.build.out_dir = PathBuf::new();
        assert!(config.validate().is_err());
    }
}
