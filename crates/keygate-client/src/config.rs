//! Client configuration
//!
//! Read once at startup from defaults, an optional `keygate.toml` in the
//! working directory and `KEYGATE_*` environment variables, in that order
//! of increasing priority.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] config::ConfigError),

    #[error("api_base must be an http(s) URL, got {0:?}")]
    InvalidApiBase(String),

    #[error("request_timeout_secs must be greater than zero")]
    ZeroTimeout,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base: String,
    pub request_timeout_secs: u64,
    pub auto_switch_delay_ms: u64,
    pub auto_login_user: Option<String>,
    pub auto_login_pass: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout_secs: 10,
            auto_switch_delay_ms: 2000,
            auto_login_user: None,
            auto_login_pass: None,
        }
    }
}

impl ClientConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::build(
            Config::builder()
                .add_source(File::with_name("keygate").required(false))
                .add_source(Environment::with_prefix("KEYGATE")),
        )
    }

    /// Resolve `builder` on top of the built-in defaults and validate it.
    pub fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let mut config: Self = builder
            .set_default("api_base", defaults.api_base)?
            .set_default("request_timeout_secs", defaults.request_timeout_secs)?
            .set_default("auto_switch_delay_ms", defaults.auto_switch_delay_ms)?
            .build()?
            .try_deserialize()?;

        config.api_base = config.api_base.trim().to_string();
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let base = &self.api_base;
        if !(base.starts_with("http://") || base.starts_with("https://")) || base.ends_with("//") {
            return Err(ConfigError::InvalidApiBase(self.api_base.clone()));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn auto_switch_delay(&self) -> Duration {
        Duration::from_millis(self.auto_switch_delay_ms)
    }

    /// Credentials for the one-shot login on startup, if both are set.
    pub fn auto_login(&self) -> Option<(String, String)> {
        match (&self.auto_login_user, &self.auto_login_pass) {
            (Some(user), Some(pass)) if !user.is_empty() && !pass.is_empty() => {
                Some((user.clone(), pass.clone()))
            }
            _ => None,
        }
    }
}
