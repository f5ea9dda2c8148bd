//! Configuration loading and management.
//!
//! Configuration is loaded from (highest to lowest precedence):
//!
//! 1. `.queryplan.toml` in the current directory
//! 2. `~/.config/queryplan/config.toml`
//! 3. Default values
//!
//! # Configuration File Format
//!
//! ```toml
//! [rules]
//! disabled = ["clause_missing_index"]
//!
//! [rules.severity]
//! where_clause_missing_index = "medium"
//! ```

use std::{collections::HashMap, env, fs, path::PathBuf};

use serde::Deserialize;

use crate::error::{AppResult, config_error};

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub rules: RulesConfig
}

/// Rules configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RulesConfig {
    /// Disabled rule IDs
    #[serde(default)]
    pub disabled: Vec<String>,
    /// Severity overrides (rule_id -> low/medium/high)
    #[serde(default)]
    pub severity: HashMap<String, String>
}

impl Config {
    /// Load configuration from the filesystem.
    ///
    /// A config file in the current directory overrides the one in the home
    /// directory; missing files fall back to defaults.
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(home) = env::var_os("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("queryplan")
                .join("config.toml");

            if home_config.exists() {
                let content = fs::read_to_string(&home_config)
                    .map_err(|e| config_error(format!("Failed to read config file: {}", e)))?;
                config = Self::from_toml(&content)?;
            }
        }

        let local_config = PathBuf::from(".queryplan.toml");
        if local_config.exists() {
            let content = fs::read_to_string(&local_config)
                .map_err(|e| config_error(format!("Failed to read config file: {}", e)))?;
            config = Self::from_toml(&content)?;
        }

        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> AppResult<Self> {
        toml::from_str(content).map_err(|e| config_error(format!("Invalid config file: {}", e)))
    }
}
