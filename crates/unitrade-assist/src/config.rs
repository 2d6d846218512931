//! # Assistant Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                            │
//! │     UNITRADE_API_KEY / API_KEY, UNITRADE_MODEL, UNITRADE_ASSIST_URL     │
//! │                                                                         │
//! │  2. [assist] section of market.toml                                     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                    │
//! │     no key, gemini-2.5-flash, public v1beta endpoint, 20s timeout       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ```toml
//! [assist]
//! api_key = "..."
//! model = "gemini-2.5-flash"
//! base_url = "https://generativelanguage.googleapis.com/v1beta"
//! timeout_secs = 20
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::AssistConfigError;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Settings for the text-generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistConfig {
    /// Without a key the assistant answers with fallback text only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(skip)]
    pub(crate) key_source: KeySource,
}

/// Where `api_key` came from. Only a key read from the file is ever saved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) enum KeySource {
    #[default]
    File,
    /// Overridden by the environment; `file_key` is what the file held.
    Environment { file_key: Option<String> },
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    20
}

impl Default for AssistConfig {
    fn default() -> Self {
        AssistConfig {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            key_source: KeySource::File,
        }
    }
}

impl AssistConfig {
    /// True when a non-blank API key is configured.
    pub fn has_credentials(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    /// The configuration as it may be written to disk: a key that came
    /// from the environment is replaced by whatever the file held.
    pub fn to_persisted(&self) -> AssistConfig {
        let mut persisted = self.clone();
        if let KeySource::Environment { file_key } = &self.key_source {
            persisted.api_key = file_key.clone();
            persisted.key_source = KeySource::File;
        }
        persisted
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), AssistConfigError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(AssistConfigError::InvalidBaseUrl(self.base_url.clone()));
        }

        if self.model.trim().is_empty() {
            return Err(AssistConfigError::EmptyModel);
        }

        if self.timeout_secs == 0 {
            return Err(AssistConfigError::ZeroTimeout);
        }

        Ok(())
    }

    /// Applies overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Applies overrides from `lookup`, which maps a variable name to its value.
    ///
    /// `UNITRADE_API_KEY` wins over the bare `API_KEY`.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("UNITRADE_API_KEY").or_else(|| lookup("API_KEY")) {
            debug!("Overriding assist API key from environment");
            if self.key_source == KeySource::File {
                self.key_source = KeySource::Environment {
                    file_key: self.api_key.take(),
                };
            }
            self.api_key = Some(key);
        }

        if let Some(model) = lookup("UNITRADE_MODEL") {
            debug!(model = %model, "Overriding assist model from environment");
            self.model = model;
        }

        if let Some(url) = lookup("UNITRADE_ASSIST_URL") {
            debug!(url = %url, "Overriding assist base URL from environment");
            self.base_url = url;
        }

        if let Some(timeout) = lookup("UNITRADE_ASSIST_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.timeout_secs = secs,
                Err(_) => warn!(value = %timeout, "Ignoring invalid UNITRADE_ASSIST_TIMEOUT_SECS"),
            }
        }
    }
}
