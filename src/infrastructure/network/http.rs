// HTTP client utilities
use crate::domain::error::MjtError;
use reqwest::Client;

/// Create the shared HTTP client.
///
/// 30s covers the slowest DeepL calls we have seen; anything beyond that
/// is treated as a transport failure.
pub fn create_client() -> Result<Client, MjtError> {
    Ok(Client::builder()
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(std::time::Duration::from_secs(30))
        .timeout(std::time::Duration::from_secs(30))
        .user_agent("mjt/0.1.0")
        .build()?)
}
