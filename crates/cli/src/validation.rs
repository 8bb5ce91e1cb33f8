//! Configuration validation support

use config::ConfigError;

/// Trait for validating configuration values
pub trait ValidateConfig {
    /// Validate the configuration
    ///
    /// Returns Ok(()) if valid, or an error describing what's wrong
    fn validate(&self) -> Result<(), ConfigError>;
}

/// Common validation helpers
pub mod validators {
    use config::ConfigError;

    /// Validate that a port number is usable (non-zero)
    pub fn validate_port(port: u16, field: &str) -> Result<(), ConfigError> {
        if port == 0 {
            return Err(ConfigError::Message(format!("{field}: port must not be 0")));
        }
        Ok(())
    }

    /// Validate an absolute http(s) URL without a path
    pub fn validate_origin(value: &str, field: &str) -> Result<(), ConfigError> {
        let url = url::Url::parse(value)
            .map_err(|e| ConfigError::Message(format!("{field}: invalid URL '{value}': {e}")))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Message(format!(
                "{field}: scheme must be http or https, got '{}'",
                url.scheme()
            )));
        }
        if url.path() != "/" || url.query().is_some() {
            return Err(ConfigError::Message(format!(
                "{field}: expected an origin like http://localhost:8080, got '{value}'"
            )));
        }
        Ok(())
    }

    /// Validate a path prefix such as `/admin`
    pub fn validate_path_prefix(value: &str, field: &str) -> Result<(), ConfigError> {
        if !value.starts_with('/') || value.len() < 2 || value.ends_with('/') {
            return Err(ConfigError::Message(format!(
                "{field}: expected a prefix like /admin, got '{value}'"
            )));
        }
        Ok(())
    }

    /// Validate that a duration in seconds is positive
    pub fn validate_positive_secs(secs: u64, field: &str) -> Result<(), ConfigError> {
        if secs == 0 {
            return Err(ConfigError::Message(format!("{field}: must be at least 1 second")));
        }
        Ok(())
    }
}
