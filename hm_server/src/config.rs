//! Server configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use hangman::{SecretName, SessionConfig, constants::MAX_CHANCES};
use std::net::SocketAddr;

/// Default address the server listens on
pub const DEFAULT_BIND: &str = "127.0.0.1:4000";

/// Complete server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind address
    pub bind: SocketAddr,
    /// Settings every game session starts with
    pub session: SessionConfig,
    /// Maximum number of concurrent sessions (one per connection)
    pub max_sessions: usize,
    /// Prometheus exporter address, disabled when unset
    pub metrics_bind: Option<SocketAddr>,
}

/// Values given on the command line, taking priority over the environment
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub bind: Option<SocketAddr>,
    pub secrets: Option<String>,
    pub rotate: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns error if a variable is present but cannot be parsed; unset
    /// variables take their default
    pub fn from_env(overrides: CliOverrides) -> Result<Self, ConfigError> {
        let bind = match overrides.bind {
            Some(bind) => bind,
            None => parse_addr("SERVER_BIND", std::env::var("SERVER_BIND").ok())?
                .map_or_else(default_bind, Ok)?,
        };

        let secret_names = match overrides
            .secrets
            .or_else(|| std::env::var("SECRET_NAMES").ok())
        {
            Some(raw) => parse_secret_names(&raw)?,
            None => vec![SecretName::default()],
        };

        let defaults = SessionConfig::default();
        let session = SessionConfig {
            secret_names,
            max_chances: parse_env_or("MAX_CHANCES", defaults.max_chances)?,
            rotate_secrets: overrides.rotate
                || parse_flag("ROTATE_SECRETS", std::env::var("ROTATE_SECRETS").ok())?,
            inbox_capacity: parse_env_or("SESSION_INBOX_CAPACITY", defaults.inbox_capacity)?,
            subscriber_capacity: parse_env_or(
                "SESSION_OUTBOX_CAPACITY",
                defaults.subscriber_capacity,
            )?,
        };

        let metrics_bind = parse_addr("METRICS_BIND", std::env::var("METRICS_BIND").ok())?;

        Ok(ServerConfig {
            bind,
            session,
            max_sessions: parse_env_or("MAX_SESSIONS", 1000)?,
            metrics_bind,
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session.max_chances == 0 || self.session.max_chances > MAX_CHANCES {
            return Err(ConfigError::Invalid {
                var: "MAX_CHANCES".to_string(),
                reason: format!("Must be between 1 and {MAX_CHANCES}"),
            });
        }

        if self.session.inbox_capacity == 0 {
            return Err(ConfigError::Invalid {
                var: "SESSION_INBOX_CAPACITY".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.session.subscriber_capacity == 0 {
            return Err(ConfigError::Invalid {
                var: "SESSION_OUTBOX_CAPACITY".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.max_sessions == 0 {
            return Err(ConfigError::Invalid {
                var: "MAX_SESSIONS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.metrics_bind == Some(self.bind) {
            return Err(ConfigError::Invalid {
                var: "METRICS_BIND".to_string(),
                reason: format!("Must differ from the server address ({})", self.bind),
            });
        }

        self.session
            .validate()
            .map_err(|reason| ConfigError::Invalid {
                var: "SECRET_NAMES".to_string(),
                reason,
            })
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Parses a comma separated list of secret names, skipping empty entries
pub fn parse_secret_names(raw: &str) -> Result<Vec<SecretName>, ConfigError> {
    let names = raw
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| {
            name.parse::<SecretName>()
                .map_err(|e| ConfigError::Invalid {
                    var: "SECRET_NAMES".to_string(),
                    reason: format!("{name:?}: {e}"),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if names.is_empty() {
        return Err(ConfigError::Invalid {
            var: "SECRET_NAMES".to_string(),
            reason: "At least one secret name is required".to_string(),
        });
    }

    Ok(names)
}

fn default_bind() -> Result<SocketAddr, ConfigError> {
    DEFAULT_BIND.parse().map_err(|_| ConfigError::Invalid {
        var: "SERVER_BIND".to_string(),
        reason: format!("Default {DEFAULT_BIND} is not an address"),
    })
}

fn parse_addr(var: &str, value: Option<String>) -> Result<Option<SocketAddr>, ConfigError> {
    value
        .map(|raw| {
            raw.parse().map_err(|_| ConfigError::Invalid {
                var: var.to_string(),
                reason: format!("{raw:?} is not an IP:PORT address"),
            })
        })
        .transpose()
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    parse_value_or(key, std::env::var(key).ok(), default)
}

fn parse_value_or<T>(var: &str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e| ConfigError::Invalid {
            var: var.to_string(),
            reason: format!("{raw:?}: {e}"),
        }),
    }
}

/// Boolean switch; unset means off
fn parse_flag(var: &str, value: Option<String>) -> Result<bool, ConfigError> {
    let Some(raw) = value else {
        return Ok(false);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::Invalid {
            var: var.to_string(),
            reason: format!("{raw:?} is not a boolean (true/false, 1/0, yes/no)"),
        }),
    }
}
