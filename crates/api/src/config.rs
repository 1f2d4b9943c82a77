//! Service Configuration
//!
//! Layered: built-in defaults, then an optional TOML file, then
//! `MATERIAL_ADVISOR__*` environment variables.

use crate::rate_limit::RateLimitConfig;
use config::{Config, Environment, File};
use descriptor_validator::ValidationConfig;
use prediction_client::PredictionConfig;
use serde::{Deserialize, Serialize};
use suggestion_engine::ChatCompletionConfig;
use tracing::info;

/// Default configuration file, relative to the working directory
pub const DEFAULT_CONFIG_FILE: &str = "material-advisor.toml";

/// Environment variable overriding the configuration file path
pub const CONFIG_PATH_ENV: &str = "MATERIAL_ADVISOR_CONFIG";

const ENV_PREFIX: &str = "MATERIAL_ADVISOR";

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub rate_limit: RateLimitConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            rate_limit: RateLimitConfig::default(),
        }
    }
}

/// Log output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Maximum level: trace, debug, info, warn or error
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Complete service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub prediction: PredictionConfig,
    pub validation: ValidationConfig,
    /// Suggestion providers, tried in order
    pub providers: Vec<ChatCompletionConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            prediction: PredictionConfig::default(),
            validation: ValidationConfig::default(),
            providers: vec![
                ChatCompletionConfig::hugging_face(),
                ChatCompletionConfig::openai(),
            ],
        }
    }
}

impl AppConfig {
    /// Load from the default file location and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        let path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from(&path)
    }

    /// Load from `path` (optional) and the environment
    pub fn load_from(path: &str) -> Result<Self, config::ConfigError> {
        let config: AppConfig = Config::builder()
            .add_source(Config::try_from(&AppConfig::default())?)
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        info!(
            "Configuration loaded ({} provider(s), backend {})",
            config.providers.len(),
            config.prediction.api_url
        );
        Ok(config)
    }
}
