//! Server configuration, read once at startup.
//!
//! Values are taken from the environment in `main` and passed down as
//! explicit config structs; nothing below this layer reads the
//! environment.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Errors in the startup configuration. Fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// No usable routing credentials and no offline atlas
    #[error("{var} is not set (or set OFFLINE_ATLAS to run without credentials)")]
    Missing { var: &'static str },

    /// A variable is set but cannot be parsed
    #[error("invalid {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

/// Where place resolution and directions come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendConfig {
    /// OpenRouteService with an API key.
    Live {
        api_key: String,
        base_url: Option<String>,
    },
    /// Offline atlas loaded from a JSON file.
    Offline { atlas_path: PathBuf },
}

/// Top-level server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub backend: BackendConfig,
    /// JSON-lines file for ranked query history.
    pub history_path: PathBuf,
    pub bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`.
    ///
    /// - `OFFLINE_ATLAS`: path to an atlas file; selects offline mode
    /// - `ORS_API_KEY`: required unless offline
    /// - `ORS_BASE_URL`: optional
    /// - `HISTORY_PATH`: defaults to `route_history.jsonl`
    /// - `BIND_ADDR`: defaults to `127.0.0.1:3000`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let backend = match get("OFFLINE_ATLAS") {
            Some(path) => BackendConfig::Offline {
                atlas_path: PathBuf::from(path),
            },
            None => BackendConfig::Live {
                api_key: get("ORS_API_KEY").ok_or(ConfigError::Missing { var: "ORS_API_KEY" })?,
                base_url: get("ORS_BASE_URL"),
            },
        };

        let history_path = get("HISTORY_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("route_history.jsonl"));

        let bind_addr = match get("BIND_ADDR") {
            Some(addr) => addr.parse().map_err(|e: std::net::AddrParseError| {
                ConfigError::Invalid {
                    var: "BIND_ADDR",
                    message: e.to_string(),
                }
            })?,
            None => SocketAddr::from(([127, 0, 0, 1], 3000)),
        };

        Ok(Self {
            backend,
            history_path,
            bind_addr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn missing_key_is_fatal() {
        let err = ServerConfig::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err, ConfigError::Missing { var: "ORS_API_KEY" });
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let err = ServerConfig::from_lookup(lookup(&[("ORS_API_KEY", "  ")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing { var: "ORS_API_KEY" });
    }

    #[test]
    fn live_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[("ORS_API_KEY", "secret")])).unwrap();

        assert_eq!(
            config.backend,
            BackendConfig::Live {
                api_key: "secret".to_string(),
                base_url: None,
            }
        );
        assert_eq!(config.history_path, PathBuf::from("route_history.jsonl"));
        assert_eq!(config.bind_addr, SocketAddr::from(([127, 0, 0, 1], 3000)));
    }

    #[test]
    fn offline_needs_no_key() {
        let config =
            ServerConfig::from_lookup(lookup(&[("OFFLINE_ATLAS", "data/atlas.json")])).unwrap();

        assert_eq!(
            config.backend,
            BackendConfig::Offline {
                atlas_path: PathBuf::from("data/atlas.json")
            }
        );
    }

    #[test]
    fn overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("ORS_API_KEY", "secret"),
            ("ORS_BASE_URL", "http://localhost:8082/ors"),
            ("HISTORY_PATH", "/tmp/h.jsonl"),
            ("BIND_ADDR", "0.0.0.0:8080"),
        ]))
        .unwrap();

        assert_eq!(
            config.backend,
            BackendConfig::Live {
                api_key: "secret".to_string(),
                base_url: Some("http://localhost:8082/ors".to_string()),
            }
        );
        assert_eq!(config.history_path, PathBuf::from("/tmp/h.jsonl"));
        assert_eq!(config.bind_addr, SocketAddr::from(([0, 0, 0, 0], 8080)));
    }

    #[test]
    fn invalid_bind_addr() {
        let err = ServerConfig::from_lookup(lookup(&[
            ("ORS_API_KEY", "secret"),
            ("BIND_ADDR", "not-an-address"),
        ]))
        .unwrap_err();

        assert!(matches!(err, ConfigError::Invalid { var: "BIND_ADDR", .. }));
    }
}
