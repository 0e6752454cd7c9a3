//! Polyfill configuration

use std::time::Duration;

use serde::Deserialize;
use sprite_net::{FetcherConfig, Url};

use crate::{ConfigError, Environment};

/// Polyfill configuration options
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base that relative sprite URLs resolve against
    pub base_url: String,

    /// Agent identification string used for environment detection
    pub user_agent: String,

    /// Whether the host runs inside another browsing context
    pub nested_in_frame: bool,

    /// Polyfill regardless of the environment
    pub force_polyfill: bool,

    /// Emit development diagnostics (unset = debug builds only)
    pub diagnostics: Option<bool>,

    /// User agent header sent when fetching sprites
    pub fetch_user_agent: String,

    /// Sprite fetch timeout in seconds
    pub fetch_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "about:blank".to_string(),
            user_agent: String::new(),
            nested_in_frame: false,
            force_polyfill: false,
            diagnostics: None,
            fetch_user_agent: format!("sprite-polyfill/{}", crate::VERSION),
            fetch_timeout_secs: 30,
        }
    }
}

impl Config {
    /// Parse a JSON config; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parsed base URL
    pub fn base(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.base_url).map_err(|err| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason: err.to_string(),
        })
    }

    pub fn environment(&self) -> Environment {
        Environment::new(self.user_agent.clone()).in_frame(self.nested_in_frame)
    }

    pub fn diagnostics_enabled(&self) -> bool {
        self.diagnostics.unwrap_or(cfg!(debug_assertions))
    }

    pub fn fetcher_config(&self) -> FetcherConfig {
        FetcherConfig {
            user_agent: self.fetch_user_agent.clone(),
            timeout: Duration::from_secs(self.fetch_timeout_secs),
            ..FetcherConfig::default()
        }
    }
}
