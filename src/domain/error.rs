use crate::domain::model::PlanTier;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MjtError {
    #[error("DeepL API key not set")]
    MissingCredential,

    #[error("Transport error ({host} host): {message}")]
    Transport { host: PlanTier, message: String },

    #[error("DeepL rejected the request ({host} host, HTTP {status}): {message}")]
    RemoteRejected {
        host: PlanTier,
        status: u16,
        message: String,
    },

    #[error("Unexpected API response from {host} host (no translations[0].text)")]
    MalformedResponse { host: PlanTier, status: u16 },

    #[error("Temp file error: {0}")]
    TempResource(String),

    #[error("MJML CLI error: {0}")]
    CliCompile(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl MjtError {
    /// True only for the one rejection that means "this key belongs to the
    /// other plan tier" and therefore warrants the single host failover.
    pub fn is_plan_mismatch(&self) -> bool {
        matches!(self, MjtError::RemoteRejected { status: 403, .. })
    }
}
