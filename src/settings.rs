use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{MetricsError, Result};

pub const CONFIG_DIR_ENV: &str = "ERP_METRICS_CONFIG_DIR";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_dataset_path_string")]
    pub dataset_path: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_dataset_path_string() -> String {
    default_dataset_path().to_string_lossy().to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dataset_path: default_dataset_path_string(),
            company_name: String::new(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

fn config_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("erp-metrics")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

fn default_dataset_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Documents")
        .join("erp-metrics")
        .join("dataset.json")
}

/// Loads settings, falling back to defaults when the file is missing or
/// unreadable.
pub fn load_settings() -> Settings {
    let path = settings_path();
    if !path.exists() {
        debug!(path = %path.display(), "no settings file, using defaults");
        return Settings::default();
    }
    let content = std::fs::read_to_string(&path).unwrap_or_default();
    serde_json::from_str(&content).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "ignoring malformed settings file");
        Settings::default()
    })
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir)?;
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| MetricsError::Settings(e.to_string()))?;
    std::fs::write(settings_path(), format!("{json}\n"))?;
    debug!(path = %settings_path().display(), "settings saved");
    Ok(())
}

/// Dataset to read: an explicit override wins over the configured path.
pub fn resolve_dataset_path(override_path: Option<&str>) -> PathBuf {
    match override_path {
        Some(p) => PathBuf::from(shellexpand_path(p)),
        None => PathBuf::from(shellexpand_path(&load_settings().dataset_path)),
    }
}

pub fn shellexpand_path(path: &str) -> String {
    if path.starts_with('~') {
        if let Some(home) = dirs::home_dir() {
            return path.replacen('~', &home.to_string_lossy(), 1);
        }
    }
    path.to_string()
}
