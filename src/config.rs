//! Application configuration.
//!
//! All configuration is read from the environment exactly once at process
//! start, validated eagerly, and shared read-only afterwards. Nothing else
//! in the tool reaches for `std::env`.

use std::env;
use std::net::SocketAddr;

use thiserror::Error;

/// Default listen address when `BIND_ADDR` is not set.
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is missing or empty.
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    /// A value failed validation.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Connection settings for the JIRA instance.
#[derive(Debug, Clone)]
pub struct JiraConfig {
    /// Base URL of the JIRA instance (e.g., "https://jira.example.com:8443").
    pub base_url: String,
    /// Account username for Basic auth.
    pub username: String,
    /// Account password or API token.
    pub password: String,
}

/// Login credentials for this tool's own UI.
#[derive(Debug, Clone)]
pub struct AppCredentials {
    /// Expected login username.
    pub username: String,
    /// Expected login password.
    pub password: String,
}

/// The complete application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// JIRA connection settings.
    pub jira: JiraConfig,
    /// Staff login credentials.
    pub credentials: AppCredentials,
    /// Socket address to listen on.
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    /// Load configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error when a required variable is missing or a value fails
    /// validation.
    pub fn from_env() -> Result<Self> {
        let config = Self {
            jira: JiraConfig {
                base_url: require("JIRA_BASE_URL")?,
                username: require("JIRA_USERNAME")?,
                password: require("JIRA_PASSWORD")?,
            },
            credentials: AppCredentials {
                username: require("APP_USERNAME")?,
                password: require("APP_PASSWORD")?,
            },
            bind_addr: parse_bind_addr(
                &env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            )?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the loaded values.
    pub fn validate(&self) -> Result<()> {
        if !self.jira.base_url.starts_with("https://")
            && !self.jira.base_url.starts_with("http://")
        {
            return Err(ConfigError::Invalid(format!(
                "JIRA_BASE_URL '{}' must start with http:// or https://",
                self.jira.base_url
            )));
        }
        Ok(())
    }
}

fn require(name: &'static str) -> Result<String> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(name)),
    }
}

/// Parse a bind address, used for both `BIND_ADDR` and the `--bind` flag.
pub fn parse_bind_addr(addr: &str) -> Result<SocketAddr> {
    addr.parse()
        .map_err(|_| ConfigError::Invalid(format!("'{}' is not a valid socket address", addr)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> AppConfig {
        AppConfig {
            jira: JiraConfig {
                base_url: base_url.to_string(),
                username: "svc-jira".to_string(),
                password: "secret".to_string(),
            },
            credentials: AppCredentials {
                username: "staff".to_string(),
                password: "hunter2".to_string(),
            },
            bind_addr: parse_bind_addr(DEFAULT_BIND_ADDR).unwrap(),
        }
    }

    #[test]
    fn test_validate_accepts_https_url() {
        assert!(config("https://jira.example.com").validate().is_ok());
    }

    #[test]
    fn test_validate_accepts_http_url() {
        assert!(config("http://localhost:8080").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bare_host() {
        let err = config("jira.example.com").validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_parse_bind_addr() {
        assert!(parse_bind_addr("127.0.0.1:8080").is_ok());
        assert!(parse_bind_addr("not an address").is_err());
    }
}
