//! # Configuration State
//!
//! Settings loaded once at start-up.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--user`, `--no-seed`)
//! 2. Environment variables (`UNITRADE_*`, `API_KEY`)
//! 3. Config file (`market.toml`, or `--config` / `UNITRADE_CONFIG`)
//! 4. Defaults (this file)
//!
//! ## Config File Locations
//! - Linux: `~/.config/market/market.toml`
//! - macOS: `~/Library/Application Support/com.unitrade.market/market.toml`
//! - Windows: `%APPDATA%\unitrade\market\config\market.toml`
//!
//! ```toml
//! [market]
//! current_user_id = 101
//! seed_demo_data = true
//! default_location = "校内自提"
//!
//! [log]
//! max_entries = 500
//!
//! [assist]
//! model = "gemini-2.5-flash"
//! timeout_secs = 20
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use unitrade_assist::AssistConfig;
use unitrade_core::seed::CURRENT_USER_ID;
use unitrade_core::DEFAULT_LOCATION;

use crate::error::{ShellError, ShellResult};

pub const CONFIG_FILE_NAME: &str = "market.toml";

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketSettings {
    /// The signed-in user.
    #[serde(default = "default_user_id")]
    pub current_user_id: i64,

    /// Load the three demo listings at start-up.
    #[serde(default = "default_true")]
    pub seed_demo_data: bool,

    /// Used when the sell form leaves the location blank.
    #[serde(default = "default_location")]
    pub default_location: String,
}

fn default_user_id() -> i64 {
    CURRENT_USER_ID
}

fn default_true() -> bool {
    true
}

fn default_location() -> String {
    DEFAULT_LOCATION.to_string()
}

impl Default for MarketSettings {
    fn default() -> Self {
        MarketSettings {
            current_user_id: default_user_id(),
            seed_demo_data: true,
            default_location: default_location(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSettings {
    /// Oldest simulated queries are dropped past this. Unbounded when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_entries: Option<usize>,
}

// =============================================================================
// Shell Configuration
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellConfig {
    #[serde(default)]
    pub market: MarketSettings,

    #[serde(default)]
    pub log: LogSettings,

    #[serde(default)]
    pub assist: AssistConfig,
}

impl ShellConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ShellResult<Self> {
        let mut config = match config_path.or_else(Self::default_config_path) {
            Some(path) if path.exists() => Self::from_file(&path)?,
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns defaults (plus environment) if loading fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load market config: {}. Using defaults.", e);
            let mut config = Self::default();
            config.apply_env_overrides();
            config
        })
    }

    /// Reads one TOML file without applying overrides.
    pub fn from_file(path: &Path) -> ShellResult<Self> {
        info!(?path, "Loading market config from file");
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Writes the configuration as TOML, creating parent directories.
    ///
    /// An API key taken from the environment is not written.
    pub fn save(&self, path: &Path) -> ShellResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let persisted = ShellConfig {
            assist: self.assist.to_persisted(),
            ..self.clone()
        };
        std::fs::write(path, persisted.to_toml()?)?;
        info!(?path, "Market config saved");
        Ok(())
    }

    pub fn to_toml(&self) -> ShellResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Same as [`ShellConfig::to_toml`] with the API key masked.
    pub fn to_redacted_toml(&self) -> ShellResult<String> {
        let mut copy = self.clone();
        if copy.assist.has_credentials() {
            copy.assist.api_key = Some("********".to_string());
        }
        copy.to_toml()
    }

    pub fn validate(&self) -> ShellResult<()> {
        if self.market.current_user_id <= 0 {
            return Err(ShellError::InvalidConfig(format!(
                "current_user_id must be positive, got {}",
                self.market.current_user_id
            )));
        }

        if self.market.default_location.trim().is_empty() {
            return Err(ShellError::InvalidConfig(
                "default_location must not be empty".into(),
            ));
        }

        if self.log.max_entries == Some(0) {
            return Err(ShellError::InvalidConfig(
                "log.max_entries must be greater than 0".into(),
            ));
        }

        self.assist
            .validate()
            .map_err(|e| ShellError::InvalidConfig(e.to_string()))
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Applies overrides from `lookup`, which maps a variable name to its value.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(id) = lookup("UNITRADE_USER_ID") {
            match id.parse::<i64>() {
                Ok(id) => {
                    debug!(user_id = id, "Overriding current user from environment");
                    self.market.current_user_id = id;
                }
                Err(_) => warn!(value = %id, "Ignoring invalid UNITRADE_USER_ID"),
            }
        }

        if let Some(max) = lookup("UNITRADE_LOG_MAX_ENTRIES") {
            match max.parse::<usize>() {
                Ok(max) => self.log.max_entries = Some(max),
                Err(_) => warn!(value = %max, "Ignoring invalid UNITRADE_LOG_MAX_ENTRIES"),
            }
        }

        self.assist.apply_overrides(lookup);
    }

    /// `--config`, then `UNITRADE_CONFIG`, then the platform config directory.
    pub fn resolve_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
        explicit
            .or_else(|| std::env::var_os("UNITRADE_CONFIG").map(PathBuf::from))
            .or_else(Self::default_config_path)
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "unitrade", "market")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ShellConfig::default();
        assert_eq!(config.market.current_user_id, 101);
        assert!(config.market.seed_demo_data);
        assert_eq!(config.market.default_location, "校内自提");
        assert_eq!(config.log.max_entries, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("market.toml");
        std::fs::write(
            &path,
            "[market]\ncurrent_user_id = 102\n\n[log]\nmax_entries = 50\n",
        )
        .unwrap();

        let config = ShellConfig::from_file(&path).unwrap();
        assert_eq!(config.market.current_user_id, 102);
        assert!(config.market.seed_demo_data);
        assert_eq!(config.log.max_entries, Some(50));
        assert_eq!(config.assist.model, "gemini-2.5-flash");
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config = ShellConfig::default();
        config.apply_overrides(env(&[
            ("UNITRADE_USER_ID", "103"),
            ("UNITRADE_LOG_MAX_ENTRIES", "not-a-number"),
            ("API_KEY", "secret"),
        ]));

        assert_eq!(config.market.current_user_id, 103);
        assert_eq!(config.log.max_entries, None);
        assert!(config.assist.has_credentials());
    }

    #[test]
    fn test_validation() {
        let mut config = ShellConfig::default();
        config.log.max_entries = Some(0);
        assert!(matches!(config.validate(), Err(ShellError::InvalidConfig(_))));

        config.log.max_entries = Some(10);
        config.market.current_user_id = -1;
        assert!(config.validate().is_err());

        config.market.current_user_id = 101;
        config.assist.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("market.toml");
        std::fs::write(&path, "[market\ncurrent_user_id = ").unwrap();
        assert!(matches!(
            ShellConfig::from_file(&path),
            Err(ShellError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_strict_load_rejects_broken_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("market.toml");
        let original = "[market]\ncurrent_user_id = 102\ndefault_location = \"东门\"\n\n\
                        [log]\nmax_entries = 50\n\n[assist]\nmodel = \"gemini-2.0-flash\"\n\
                        timeout_secs = = 5\n";
        std::fs::write(&path, original).unwrap();

        assert!(matches!(
            ShellConfig::load(Some(path.clone())),
            Err(ShellError::ConfigParse(_))
        ));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_env_only_key_is_not_saved() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("market.toml");

        let mut config = ShellConfig::default();
        config.apply_overrides(env(&[("API_KEY", "sk-live-secret")]));
        assert!(config.assist.has_credentials());
        config.save(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(!written.contains("sk-live-secret"));
        assert_eq!(ShellConfig::from_file(&path).unwrap().assist.api_key, None);
    }

    #[test]
    fn test_save_round_trip_and_redaction() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("market.toml");

        let mut config = ShellConfig::default();
        config.assist.api_key = Some("secret".into());
        config.save(&path).unwrap();

        let loaded = ShellConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);

        let shown = config.to_redacted_toml().unwrap();
        assert!(!shown.contains("secret"));
        assert!(shown.contains("[market]"));
    }
}
