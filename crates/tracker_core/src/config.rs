use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;
use thiserror::Error;

use crate::share::DEFAULT_SHARE_BASE_URL;

pub const CONFIG_FILE_NAME: &str = "tracker.toml";
pub const CUSTOMERS_FILE_NAME: &str = "customers.toml";
const APP_DIR_NAME: &str = "cylinder_tracker";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub customers_file: Option<PathBuf>,
    pub share_base_url: String,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            customers_file: None,
            share_base_url: DEFAULT_SHARE_BASE_URL.into(),
            log_filter: "info".into(),
        }
    }
}

impl Settings {
    /// Explicit customers file, or `customers.toml` inside the data dir.
    pub fn customers_path(&self) -> PathBuf {
        self.customers_file
            .clone()
            .unwrap_or_else(|| self.data_dir.join(CUSTOMERS_FILE_NAME))
    }
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    data_dir: Option<PathBuf>,
    customers_file: Option<PathBuf>,
    share_base_url: Option<String>,
    log_filter: Option<String>,
}

fn default_data_dir() -> PathBuf {
    match dirs::data_local_dir() {
        Some(base) => base.join(APP_DIR_NAME),
        None => PathBuf::from("./data"),
    }
}

/// A config file that exists but does not parse. Loading continues with the
/// remaining layers; callers log this once their subscriber is installed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("ignoring unreadable config file '{}': {message}", path.display())]
pub struct ConfigFileError {
    pub path: PathBuf,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedSettings {
    pub settings: Settings,
    pub file_error: Option<ConfigFileError>,
}

/// Defaults, then the config file at `config_path`, then environment variables.
pub fn load_settings_from(
    config_path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> LoadedSettings {
    let mut settings = Settings::default();
    let mut file_error = None;

    if let Ok(raw) = fs::read_to_string(config_path) {
        match toml::from_str::<SettingsFile>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.data_dir {
                    settings.data_dir = v;
                }
                if let Some(v) = file_cfg.customers_file {
                    settings.customers_file = Some(v);
                }
                if let Some(v) = file_cfg.share_base_url {
                    settings.share_base_url = v;
                }
                if let Some(v) = file_cfg.log_filter {
                    settings.log_filter = v;
                }
            }
            Err(err) => {
                file_error = Some(ConfigFileError {
                    path: config_path.to_path_buf(),
                    message: err.to_string(),
                });
            }
        }
    }

    let non_empty = |name: &str| env(name).filter(|v| !v.trim().is_empty());

    if let Some(v) = non_empty("TRACKER_DATA_DIR") {
        settings.data_dir = PathBuf::from(v);
    }
    if let Some(v) = non_empty("APP__DATA_DIR") {
        settings.data_dir = PathBuf::from(v);
    }

    if let Some(v) = non_empty("TRACKER_CUSTOMERS_FILE") {
        settings.customers_file = Some(PathBuf::from(v));
    }
    if let Some(v) = non_empty("APP__CUSTOMERS_FILE") {
        settings.customers_file = Some(PathBuf::from(v));
    }

    if let Some(v) = non_empty("TRACKER_SHARE_BASE_URL") {
        settings.share_base_url = v;
    }
    if let Some(v) = non_empty("APP__SHARE_BASE_URL") {
        settings.share_base_url = v;
    }

    if let Some(v) = non_empty("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    LoadedSettings {
        settings,
        file_error,
    }
}

pub fn prepare_data_dir(data_dir: &Path) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(data_dir).with_context(|| {
        format!("failed to create data directory '{}'", data_dir.display())
    })?;
    Ok(data_dir.to_path_buf())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
