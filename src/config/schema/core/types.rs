use super::super::{GatewayConfig, ModelsConfig};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - resolved at load time, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,
    /// Credential for the hosted model API.
    pub api_key: Option<String>,
    /// Base URL of the OpenAI-compatible API.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Optional TOML catalog replacing the built-in one.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    #[serde(default)]
    pub models: ModelsConfig,

    #[serde(default)]
    pub gateway: GatewayConfig,
}

fn default_api_url() -> String {
    "https://api.together.xyz/v1".into()
}

fn default_request_timeout_secs() -> u64 {
    120
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            api_key: None,
            api_url: default_api_url(),
            request_timeout_secs: default_request_timeout_secs(),
            log_level: default_log_level(),
            catalog_path: None,
            models: ModelsConfig::default(),
            gateway: GatewayConfig::default(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let models = &self.models;

        if !(0.0..=2.0).contains(&models.temperature) {
            return Err(ConfigError::Validation(format!(
                "models.temperature must be within 0.0..=2.0, got {}",
                models.temperature
            )));
        }

        for (field, name) in models.required_names() {
            if name.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "models.{field} must not be empty"
                )));
            }
        }

        if models.chat_models.is_empty() {
            return Err(ConfigError::Validation(
                "models.chat_models must list at least one model".into(),
            ));
        }
        if !models.chat_models.contains(&models.default_chat_model) {
            return Err(ConfigError::Validation(format!(
                "models.default_chat_model {} is not in models.chat_models",
                models.default_chat_model
            )));
        }
        if models.routes.is_empty() {
            return Err(ConfigError::Validation(
                "models.routes must define at least one route".into(),
            ));
        }
        if models.proposer_models.is_empty() {
            return Err(ConfigError::Validation(
                "models.proposer_models must list at least one model".into(),
            ));
        }
        if self.api_url.trim().is_empty() {
            return Err(ConfigError::Validation("api_url must not be empty".into()));
        }

        Ok(())
    }
}
