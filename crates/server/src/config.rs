//! Server settings read from the environment.

use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

/// Address used when `SLANT_ADDR` is unset
pub const DEFAULT_ADDR: &str = "127.0.0.1:8787";
/// Seconds allowed for one extraction when `SLANT_TIMEOUT_SECS` is unset
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// Request body cap when `SLANT_MAX_BODY_BYTES` is unset
pub const DEFAULT_MAX_BODY_BYTES: usize = 5 * 1024 * 1024;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub timeout: Duration,
    pub max_body_bytes: usize,
}

impl ServerConfig {
    /// Reads `SLANT_ADDR`, `SLANT_TIMEOUT_SECS` and `SLANT_MAX_BODY_BYTES`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let addr = parse_var(&lookup, "SLANT_ADDR", DEFAULT_ADDR.parse().ok())?;
        let timeout_secs: u64 = parse_var(&lookup, "SLANT_TIMEOUT_SECS", Some(DEFAULT_TIMEOUT_SECS))?;
        let max_body_bytes = parse_var(&lookup, "SLANT_MAX_BODY_BYTES", Some(DEFAULT_MAX_BODY_BYTES))?;

        if timeout_secs == 0 {
            return Err(ConfigError::InvalidValue { name: "SLANT_TIMEOUT_SECS", value: "0".to_string() });
        }

        Ok(Self { addr, timeout: Duration::from_secs(timeout_secs), max_body_bytes })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 8787)),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>, name: &'static str, default: Option<T>,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidValue { name, value }),
        None => default.ok_or_else(|| ConfigError::InvalidValue { name, value: String::new() }),
    }
}
