//! Server configuration.
//!
//! A [`ServerConfig`] names the address the server binds to. It is built
//! once at startup and never mutated afterwards; construct it directly,
//! take the defaults, or load it from a JSON file.

use std::fs;
use std::net::{AddrParseError, SocketAddr};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Bind address for the server.
///
/// # Examples
///
/// ```
/// use tinyserve::ServerConfig;
///
/// let config = ServerConfig::default();
/// assert_eq!(config.address(), "127.0.0.1:8080");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Textual IPv4 address to bind, e.g. `"0.0.0.0"`.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to bind. Port 0 asks the OS for an ephemeral port.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_owned()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// Returns the `host:port` string for this configuration.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Resolves the configuration to a socket address.
    ///
    /// # Errors
    ///
    /// Returns the parse error if `host` is not a valid IP address.
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.address().parse()
    }

    /// Loads a configuration from a JSON file.
    ///
    /// Missing fields fall back to their defaults, so `{}` is a valid
    /// config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn address_custom() {
        let config = ServerConfig {
            host: "0.0.0.0".to_owned(),
            port: 3000,
        };
        assert_eq!(config.address(), "0.0.0.0:3000");
    }

    #[test]
    fn socket_addr_resolves() {
        let addr = ServerConfig::default().socket_addr().unwrap();
        assert!(addr.is_ipv4());
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn socket_addr_rejects_bad_host() {
        let config = ServerConfig {
            host: "not-an-ip".to_owned(),
            port: 8080,
        };
        assert!(config.socket_addr().is_err());
    }

    #[test]
    fn parse_from_json() {
        let config: ServerConfig =
            serde_json::from_str(r#"{"host": "0.0.0.0", "port": 9000}"#).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config: ServerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn from_json_file_missing_is_io_error() {
        let err = ServerConfig::from_json_file("/nonexistent/tinyserve.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
