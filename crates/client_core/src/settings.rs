use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;
use tracing::warn;

use crate::timer::DEFAULT_BREAK_SECONDS;

pub const SETTINGS_FILE: &str = "ableed.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    /// Directory, or `memory:` / `unavailable:`.
    pub storage_location: String,
    pub origin: String,
    pub break_timer_seconds: u32,
    pub log_filter: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            storage_location: "./data/origin-storage".into(),
            origin: "http://localhost:8080".into(),
            break_timer_seconds: DEFAULT_BREAK_SECONDS,
            log_filter: "info".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsFile {
    storage_location: Option<String>,
    origin: Option<String>,
    break_timer_seconds: Option<u32>,
    log_filter: Option<String>,
}

pub fn load_settings() -> ClientSettings {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

/// Defaults, then `path` if it exists, then `APP__*` variables from `env`.
pub fn load_settings_from(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> ClientSettings {
    let mut settings = ClientSettings::default();

    match read_settings_file(path) {
        Ok(Some(file_cfg)) => {
            if let Some(v) = file_cfg.storage_location {
                settings.storage_location = v;
            }
            if let Some(v) = file_cfg.origin {
                settings.origin = v;
            }
            match file_cfg.break_timer_seconds {
                Some(0) => warn!("ignoring break_timer_seconds = 0 in settings file"),
                Some(v) => settings.break_timer_seconds = v,
                None => {}
            }
            if let Some(v) = file_cfg.log_filter {
                settings.log_filter = v;
            }
        }
        Ok(None) => {}
        Err(err) => warn!(error = %format!("{err:#}"), "ignoring settings file"),
    }

    if let Some(v) = env("APP__STORAGE_LOCATION") {
        settings.storage_location = v;
    }
    if let Some(v) = env("APP__ORIGIN") {
        settings.origin = v;
    }
    if let Some(v) = env("APP__BREAK_TIMER_SECONDS") {
        match v.trim().parse::<u32>() {
            Ok(0) => warn!(value = %v, "APP__BREAK_TIMER_SECONDS must be positive"),
            Ok(parsed) => settings.break_timer_seconds = parsed,
            Err(err) => warn!(value = %v, error = %err, "invalid APP__BREAK_TIMER_SECONDS"),
        }
    }
    if let Some(v) = env("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    settings
}

fn read_settings_file(path: &Path) -> anyhow::Result<Option<SettingsFile>> {
    if !path.exists() {
        return Ok(None);
    }

    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
    let parsed = toml::from_str(&raw)
        .with_context(|| format!("failed to parse settings file '{}'", path.display()))?;
    Ok(Some(parsed))
}

impl ClientSettings {
    pub fn storage_path(&self) -> Option<PathBuf> {
        match self.storage_location.trim() {
            storage::MEMORY_LOCATION | storage::UNAVAILABLE_LOCATION | "" => None,
            dir => Some(PathBuf::from(dir)),
        }
    }
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
