use crate::domain::error::MjtError;
use crate::infrastructure::config::{Config, ConfigCredentials};
use crate::infrastructure::network::client::DeeplClient;
use crate::infrastructure::network::http::create_client;
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub http_client: Client,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, MjtError> {
        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            http_client: create_client()?,
        })
    }

    /// Build a translation client wired to the config-backed credential
    /// provider. Cheap: the HTTP client is a shared handle.
    pub fn deepl_client(&self) -> DeeplClient {
        DeeplClient::new(
            self.http_client.clone(),
            Arc::new(ConfigCredentials::new(self.config.clone())),
        )
    }
}
