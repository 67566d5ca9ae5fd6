use crate::domain::error::MjtError;
use crate::domain::model::ApiCredential;
use crate::domain::traits::CredentialProvider;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub logging: Logging,
    #[serde(default)]
    pub deepl: DeeplConfig,
    #[serde(default)]
    pub mjml: MjmlConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Logging {
    #[serde(default = "default_enable")]
    pub enable: bool,
    pub path: Option<String>,
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DeeplConfig {
    /// DeepL key; free-plan keys end in ":fx". The first host to try is
    /// guessed from that suffix, a mismatch is recovered by failover.
    pub api_key: Option<String>,
    #[serde(default = "default_target_lang")]
    pub target_lang: String,
    /// Passed through to DeepL as the "formality" option when set.
    pub formality: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct MjmlConfig {
    /// Explicit mjml executable; skips discovery when set.
    pub cli_path: Option<String>,
    /// Directory for subprocess temp files; system temp dir when unset.
    pub tmp_path: Option<String>,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            enable: true,
            path: None,
            level: "WARN".to_string(),
        }
    }
}

impl Default for DeeplConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            target_lang: default_target_lang(),
            formality: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: Logging::default(),
            deepl: DeeplConfig::default(),
            mjml: MjmlConfig::default(),
        }
    }
}

// Defaults
fn default_enable() -> bool {
    true
}
fn default_log_level() -> String {
    "WARN".to_string()
}
fn default_target_lang() -> String {
    "DE".to_string()
}

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("mjt").join("config.toml"))
}

pub fn load_config() -> Result<Config, MjtError> {
    let config_path = get_config_path();

    if let Some(path) = config_path {
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            match toml::from_str::<Config>(&content) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    eprintln!(
                        "Warning: Failed to parse config file: {}. Using defaults.",
                        e
                    );
                }
            }
        }
    }

    Ok(Config::default())
}

pub fn generate_config_sample() -> Result<(), MjtError> {
    let config_path = get_config_path();

    if let Some(path) = config_path {
        if path.exists() {
            eprintln!("Config file already exists at: {}", path.display());
            return Ok(());
        }

        // Create directory if needed
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Generate sample config
        let sample = Config::default();
        let toml_content = toml::to_string_pretty(&sample)
            .map_err(|e| MjtError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(&path, toml_content)
            .map_err(|e| MjtError::Config(format!("Failed to write config file: {}", e)))?;
        println!("Generated config file at: {}", path.display());
    } else {
        return Err(MjtError::Config(
            "Cannot determine config directory".to_string(),
        ));
    }

    Ok(())
}

/// Credential provider backed by the loaded config file.
///
/// Reads the key on every call so a config reload picks up rotated keys
/// without rebuilding the client.
pub struct ConfigCredentials {
    config: Arc<RwLock<Config>>,
}

impl ConfigCredentials {
    pub fn new(config: Arc<RwLock<Config>>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl CredentialProvider for ConfigCredentials {
    async fn api_key(&self) -> Option<ApiCredential> {
        let config = self.config.read().await;
        config
            .deepl
            .api_key
            .as_deref()
            .and_then(ApiCredential::new)
    }
}

/// Fixed-key provider for library consumers and tests.
pub struct StaticCredentials {
    key: Option<String>,
}

impl StaticCredentials {
    pub fn new(key: Option<String>) -> Self {
        Self { key }
    }
}

#[async_trait]
impl CredentialProvider for StaticCredentials {
    async fn api_key(&self) -> Option<ApiCredential> {
        self.key.as_deref().and_then(ApiCredential::new)
    }
}
