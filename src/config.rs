//! Application configuration.

use crate::consts::cli_consts::{
    APP_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_DAILY_GOAL, LOG_FILE_NAME, PREFS_FILE_NAME,
};
use crate::pedometer::{ChartPolicy, RollbackPolicy};
use crate::sensor::SensorDelay;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Steps needed to fill the goal gauge.
    pub daily_goal: u64,
    /// How often the activity chart gains a point.
    pub chart_policy: ChartPolicy,
    /// Rate at which the step counter is read.
    pub sensor_delay: SensorDelay,
    /// What happens when the counter drops below the stored baseline.
    pub rollback_policy: RollbackPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            daily_goal: DEFAULT_DAILY_GOAL,
            chart_policy: ChartPolicy::default(),
            sensor_delay: SensorDelay::default(),
            rollback_policy: RollbackPolicy::default(),
        }
    }
}

impl Config {
    /// Loads configuration from a JSON file at the given path.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if reading from file fails or JSON is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, std::io::Error> {
        let buf = fs::read(path)?;
        let config: Config = serde_json::from_slice(&buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(config)
    }

    /// Loads the configuration, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!(
                    "Ignoring config file {}: {}; using defaults",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Saves the configuration to a JSON file at the given path.
    ///
    /// Directories will be created if they don't exist. This method overwrites existing files.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if writing to file fails or serialization fails.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization failed: {}", e),
            )
        })?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// Directory holding the config, preferences and log file.
pub fn get_app_dir() -> Result<PathBuf, std::io::Error> {
    let home = home::home_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Unable to determine the home directory",
        )
    })?;
    Ok(home.join(APP_DIR_NAME))
}

pub fn get_config_path() -> Result<PathBuf, std::io::Error> {
    Ok(get_app_dir()?.join(CONFIG_FILE_NAME))
}

pub fn get_prefs_path() -> Result<PathBuf, std::io::Error> {
    Ok(get_app_dir()?.join(PREFS_FILE_NAME))
}

pub fn get_log_path() -> Result<PathBuf, std::io::Error> {
    Ok(get_app_dir()?.join(LOG_FILE_NAME))
}
