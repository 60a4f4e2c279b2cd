//! Application state wiring the session manager to its infrastructure.
//!
//! The manager is generic over the transport and store ports; AppState
//! pins it to the concrete infra implementations and carries the loaded
//! configuration.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use foodiespot_core::chat::manager::SessionManager;
use foodiespot_infra::config::load_client_config;
use foodiespot_infra::filesystem::{resolve_data_dir, FileSessionStore};
use foodiespot_infra::http::HttpConversationClient;
use foodiespot_types::config::ClientConfig;

/// Concrete type alias for the manager pinned to infra implementations.
pub type ConcreteSessionManager = SessionManager<HttpConversationClient, FileSessionStore>;

/// Shared application state for all CLI commands.
pub struct AppState {
    pub data_dir: PathBuf,
    pub config: ClientConfig,
}

impl AppState {
    /// Initialize the application state: resolve the data directory and
    /// load the configuration.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;
        let config = load_client_config(&data_dir).await;
        Ok(Self { data_dir, config })
    }

    /// Build the HTTP transport from config, with an optional server URL
    /// override from the command line.
    pub fn build_client(&self, server_override: Option<&str>) -> HttpConversationClient {
        let base_url = server_override.unwrap_or(&self.config.server_url);
        let mut client = HttpConversationClient::new(base_url)
            .with_timeout(Duration::from_secs(self.config.request_timeout_secs));
        if let Some(token) = &self.config.auth_token {
            client = client.with_bearer_token(SecretString::from(token.clone()));
        }
        client
    }

    /// Build the file-backed session store in the data directory.
    pub fn build_store(&self) -> FileSessionStore {
        FileSessionStore::new(&self.data_dir)
    }

    /// Build a session manager over the concrete transport and store.
    pub fn build_manager(
        &self,
        server_override: Option<&str>,
        user_override: Option<&str>,
    ) -> ConcreteSessionManager {
        let client = self.build_client(server_override);
        let store = self.build_store();
        let mut manager = SessionManager::new(client, store);
        let user_id = user_override
            .map(str::to_string)
            .or_else(|| self.config.user_id.clone());
        if let Some(user_id) = user_id {
            manager = manager.with_user_id(user_id);
        }
        manager
    }
}
