use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

fn default_base_url() -> String {
    "https://app.thenvoi.com".to_string()
}

/// Which tool group the configured API key unlocks.
///
/// Derived once from the key prefix at startup and consumed when the
/// tool registry is built. Nothing re-inspects the raw key afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeyKind {
    AgentKey,
    UserKey,
    LegacyKey,
    Unknown,
}

impl ApiKeyKind {
    pub fn from_key(key: &str) -> Self {
        if key.starts_with("thnv_a_") {
            ApiKeyKind::AgentKey
        } else if key.starts_with("thnv_u_") {
            ApiKeyKind::UserKey
        } else if key.starts_with("thnv_") {
            ApiKeyKind::LegacyKey
        } else {
            ApiKeyKind::Unknown
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config_env = env::var("CONFIG_ENV").unwrap_or_else(|_| "default".to_string());

        let config = Config::builder()
            .add_source(File::with_name(&format!("config/{}", config_env)).required(false))
            .add_source(Environment::with_prefix("THENVOI").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    pub fn key_kind(&self) -> ApiKeyKind {
        ApiKeyKind::from_key(&self.api_key)
    }
}
