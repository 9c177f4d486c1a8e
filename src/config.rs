//! Configuration loading and constants.
//!
//! The service is configured entirely from the process environment. `PORT`
//! selects the listen port; `RUST_LOG` and `LOG_FORMAT` control logging.
//! Everything is resolved once at startup into an immutable `AppConfig`.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

// =============================================================================
// HTTP Server
// =============================================================================

/// Listen on every interface
pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Port used when `PORT` is not set
pub const DEFAULT_PORT: u16 = 5000;

/// Seconds to wait for in-flight connections after a shutdown signal
pub const SHUTDOWN_GRACE_SECS: u64 = 30;

/// Cache-Control for liveness probes, which must always reach the process
pub const CACHE_CONTROL_HEALTH: &str = "no-store";

// =============================================================================
// Environment Variables
// =============================================================================

pub const ENV_PORT: &str = "PORT";
pub const ENV_LOG_FILTER: &str = "RUST_LOG";
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";

// =============================================================================
// Logging Defaults
// =============================================================================

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "hello_gke=info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// HTTP server configuration
    pub http: HttpServerConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl HttpServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST,
            port: DEFAULT_PORT,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// `EnvFilter` directive string
    pub filter: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
            format: LogFormat::default(),
        }
    }
}

/// Log line format: human-readable text (default) or structured JSON
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::InvalidLogFormat(s.to_string())),
        }
    }
}

impl AppConfig {
    /// Resolve configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve configuration using `lookup` in place of the environment.
    ///
    /// An absent `PORT` means the default; a present but malformed one is an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup(ENV_PORT) {
            Some(value) => parse_port(&value)?,
            None => DEFAULT_PORT,
        };

        let filter = lookup(ENV_LOG_FILTER).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        let format = match lookup(ENV_LOG_FORMAT) {
            Some(value) => value.parse()?,
            None => LogFormat::default(),
        };

        Ok(Self {
            http: HttpServerConfig {
                port,
                ..HttpServerConfig::default()
            },
            logging: LoggingConfig { filter, format },
        })
    }
}

/// Parse a listen port, accepting only 1..=65535.
pub fn parse_port(value: &str) -> Result<u16, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidPort {
        value: value.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(invalid("value is empty"));
    }

    match trimmed.parse::<u16>() {
        Ok(0) => Err(invalid("port must be between 1 and 65535")),
        Ok(port) => Ok(port),
        Err(e) => Err(invalid(&e.to_string())),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid PORT value {value:?}: {reason}")]
    InvalidPort { value: String, reason: String },
    #[error("Invalid LOG_FORMAT value {0:?}: expected \"text\" or \"json\"")]
    InvalidLogFormat(String),
}
