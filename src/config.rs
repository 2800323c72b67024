//! Application settings loaded from a YAML file.

use crate::database::DEFAULT_STORAGE_KEY;
use crate::export::json::EXPORT_FILE_NAME;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "flashcards.yaml";

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV_VAR: &str = "FLASHCARDS_CONFIG";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// SQLite file holding the persistence slot.
    pub database_path: PathBuf,
    pub storage_key: String,
    /// File name suggested in the export dialog.
    pub export_file_name: String,
    pub log_dir: PathBuf,
    pub debug: bool,
    pub console_log: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("db.sqlite3"),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            export_file_name: EXPORT_FILE_NAME.to_string(),
            log_dir: PathBuf::from("logs"),
            debug: false,
            console_log: true,
        }
    }
}

/// Where the loaded settings came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigOrigin {
    File,
    /// No file existed; the defaults were used.
    Defaults,
}

impl AppConfig {
    /// Path from `FLASHCARDS_CONFIG`, or `flashcards.yaml` in the working directory.
    pub fn default_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Loads settings from `path`. A missing file yields the defaults; unset keys
    /// keep their default values.
    ///
    /// Nothing is logged here since this runs before logging is configured;
    /// callers report the returned origin once the subscriber is installed.
    pub fn load(path: &Path) -> Result<(Self, ConfigOrigin)> {
        if !path.exists() {
            return Ok((Self::default(), ConfigOrigin::Defaults));
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: AppConfig = serde_yaml_ng::from_str(&contents)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;

        Ok((config, ConfigOrigin::File))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let yaml = serde_yaml_ng::to_string(self).context("Failed to serialize config to YAML")?;
        fs::write(path, yaml)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}
