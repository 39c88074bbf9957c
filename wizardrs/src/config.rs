//! Configuration for the wizard's backend client.
//!
//! Supports TOML-based configuration with built-in defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WizardError};

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct WizardConfig {
    pub endpoint: EndpointConfig,
}

/// Backend endpoint settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Base URL of the query service API.
    pub base_url: String,
    /// Request timeout in milliseconds (0 = no timeout).
    pub timeout_ms: u64,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            timeout_ms: 0,
        }
    }
}

impl WizardConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| WizardError::Config(format!("failed to read config file: {e}")))?;
        toml::from_str(&contents)
            .map_err(|e| WizardError::Config(format!("failed to parse config: {e}")))
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str)
            .map_err(|e| WizardError::Config(format!("failed to parse config: {e}")))
    }

    /// Load from default locations (env var, cwd, user config dir, or defaults).
    ///
    /// Search order:
    /// 1. `SQLWIZARD_CONFIG` environment variable
    /// 2. `./sqlwizard.toml` (current directory)
    /// 3. `~/.config/sqlwizard/config.toml` (user config dir)
    /// 4. Built-in defaults
    pub fn load_default() -> Self {
        if let Ok(path) = std::env::var("SQLWIZARD_CONFIG") {
            if let Ok(cfg) = Self::from_file(&path) {
                tracing::info!(path = %path, "loaded config from SQLWIZARD_CONFIG");
                return cfg;
            }
        }

        if let Ok(cfg) = Self::from_file("sqlwizard.toml") {
            tracing::info!("loaded config from ./sqlwizard.toml");
            return cfg;
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("sqlwizard").join("config.toml");
            if let Ok(cfg) = Self::from_file(&user_config) {
                tracing::info!(path = %user_config.display(), "loaded config from user config dir");
                return cfg;
            }
        }

        tracing::debug!("no config file found, using defaults");
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = WizardConfig::default();
        assert_eq!(cfg.endpoint.base_url, "http://localhost:8000/api");
        assert_eq!(cfg.endpoint.timeout_ms, 0);
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
[endpoint]
base_url = "https://sql.example.com/api"
timeout_ms = 15000
"#;
        let cfg = WizardConfig::from_toml(toml).unwrap();
        assert_eq!(cfg.endpoint.base_url, "https://sql.example.com/api");
        assert_eq!(cfg.endpoint.timeout_ms, 15_000);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let cfg = WizardConfig::from_toml("[endpoint]\ntimeout_ms = 500\n").unwrap();
        assert_eq!(cfg.endpoint.timeout_ms, 500);
        assert_eq!(cfg.endpoint.base_url, "http://localhost:8000/api");
    }
}
