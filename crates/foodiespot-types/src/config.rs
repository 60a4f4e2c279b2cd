//! Client configuration for the FoodieSpot chat client.
//!
//! Deserialized from `{data_dir}/config.toml`; every field has a default
//! so a missing or partial file still yields a usable configuration.

use serde::{Deserialize, Serialize};

/// Default conversation server URL (the local development backend).
fn default_server_url() -> String {
    "http://localhost:8001".to_string()
}

/// Default bounded wait for a chat reply, in seconds.
fn default_request_timeout_secs() -> u64 {
    20
}

/// Configuration for the conversation client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the conversation server.
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Hard per-request timeout for `send`, in seconds. Exceeding it does
    /// not cancel the server-side request; the reply is reconciled later
    /// via an explicit recovery fetch.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Identity attached to outgoing chat requests when set. Anonymous
    /// chat is valid; absence must not break anything.
    #[serde(default)]
    pub user_id: Option<String>,

    /// Opaque bearer credential attached to outgoing requests when set.
    #[serde(default)]
    pub auth_token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            request_timeout_secs: default_request_timeout_secs(),
            user_id: None,
            auth_token: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.server_url, "http://localhost:8001");
        assert_eq!(config.request_timeout_secs, 20);
        assert!(config.user_id.is_none());
        assert!(config.auth_token.is_none());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let json = r#"{"server_url": "https://api.foodiespot.example"}"#;
        let config: ClientConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.server_url, "https://api.foodiespot.example");
        assert_eq!(config.request_timeout_secs, 20);
    }
}
