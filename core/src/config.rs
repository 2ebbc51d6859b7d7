use std::time::Duration;

use config::{Config, ConfigError, Environment};
use reqwest::Url;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL, e.g. `https://api.example.com/api`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Bearer token attached to every request
    #[serde(default)]
    pub api_token: Option<String>,

    /// Request timeout in seconds; unset leaves the HTTP client's default
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            log_level: default_log_level(),
            api_token: None,
            timeout_secs: None,
        }
    }
}

impl ClientConfig {
    /// Reads `CONSOLE_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config: Self = Config::builder()
            .add_source(Environment::with_prefix("CONSOLE"))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| ConfigError::Message(format!("invalid base_url '{}': {e}", self.base_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Message(format!(
                "base_url must use http or https; got '{}://'",
                url.scheme()
            )));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.filter(|secs| *secs > 0).map(Duration::from_secs)
    }
}
