use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_PATH: &str = "opconsole.json";

/// Environment variable that overrides the stored app token.
pub const TOKEN_ENV: &str = "OPCONSOLE_TOKEN";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HostConfig {
    pub base_url: String,
    pub token: String,

    #[serde(default = "default_locale")]
    pub locale: String,

    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_locale() -> String {
    "en-US".to_string()
}

fn default_timezone() -> String {
    "UTC".to_string()
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8082".to_string(),
            token: "dev".to_string(),
            locale: default_locale(),
            timezone: default_timezone(),
        }
    }
}

impl HostConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let mut cfg: HostConfig = serde_json::from_str(&raw)
            .with_context(|| format!("parse config {}", path.display()))?;
        if let Ok(token) = std::env::var(TOKEN_ENV)
            && !token.is_empty()
        {
            cfg.token = token;
        }
        Ok(cfg)
    }

    /// Load the config if the file exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            let mut cfg = Self::default();
            if let Ok(token) = std::env::var(TOKEN_ENV)
                && !token.is_empty()
            {
                cfg.token = token;
            }
            Ok(cfg)
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let raw = serde_json::to_string_pretty(self).context("serialize config")?;
        fs::write(path, raw).with_context(|| format!("write config {}", path.display()))
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
