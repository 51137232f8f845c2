//! User settings for the `sqlsight` binary

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sqlsight_analyzer::AdvisorConfig;
use sqlsight_syntax::DialectChoice;
use std::path::{Path, PathBuf};

use crate::logging::LoggingConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Engine thresholds
    pub advisor: AdvisorConfig,
    /// Dialect used when `--dialect` is not given
    pub default_dialect: String,
    /// Log filter used when RUST_LOG is unset
    pub log_filter: String,
    pub json_logs: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            advisor: AdvisorConfig::default(),
            default_dialect: "auto".to_string(),
            log_filter: "warn".to_string(),
            json_logs: false,
        }
    }
}

impl Settings {
    /// Loads settings from `explicit`, or from the default location
    ///
    /// A missing default file yields the defaults; a missing explicit file is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => {
                let path = Self::settings_path()?;
                if !path.exists() {
                    return Ok(Self::default());
                }
                Self::load_from(&path)
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {:?}", path))?;
        Self::from_json(&content).with_context(|| format!("Invalid settings in {:?}", path))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let settings: Self =
            serde_json::from_str(content).context("Failed to parse settings JSON")?;
        settings
            .default_dialect
            .parse::<DialectChoice>()
            .context("Invalid default_dialect")?;
        Ok(settings)
    }

    pub fn settings_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not find config directory")?;
        Ok(config_dir.join("sqlsight").join("settings.json"))
    }

    /// Logging setup derived from these settings
    pub fn logging_config(&self, force_json: bool) -> LoggingConfig {
        LoggingConfig {
            default_filter: self.log_filter.clone(),
            json: self.json_logs || force_json,
            ..LoggingConfig::default()
        }
    }
}

#[cfg(test)]
mod tests;
