//! Server settings from the environment: HOST (default 0.0.0.0) and PORT (default 8080).
//! Log filtering is left to env_logger's RUST_LOG.

const HOST_VAR: &str = "HOST";
const PORT_VAR: &str = "PORT";

/// Default log filter when RUST_LOG is unset.
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Missing or unparsable values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let host = lookup(HOST_VAR)
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
            .unwrap_or(defaults.host);
        let port = match lookup(PORT_VAR) {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                log::warn!("Ignoring invalid {}={:?}, using {}", PORT_VAR, raw, defaults.port);
                defaults.port
            }),
            None => defaults.port,
        };
        Self { host, port }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(ServerConfig::from_lookup(|_| None), ServerConfig::default());
    }

    #[test]
    fn reads_host_and_port() {
        let config = ServerConfig::from_lookup(lookup_from(&[("HOST", "127.0.0.1"), ("PORT", "9000")]));
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn invalid_port_falls_back() {
        let config = ServerConfig::from_lookup(lookup_from(&[("PORT", "eighty")]));
        assert_eq!(config.port, 8080);
    }
}
