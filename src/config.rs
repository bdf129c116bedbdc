//! Configuration management for zecharge
//!
//! This module handles loading, validation, and management of the
//! configuration from YAML files.

mod defaults;

use crate::error::{Result, ZeChargeError};
use crate::logging::parse_log_level;
use crate::timezone::{TimezoneOffset, UserZone, current_offset};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Zone the user reads and types schedule times in (`local` = system zone)
    pub timezone: String,

    /// Schedule editing preferences
    pub schedule: ScheduleConfig,

    /// Which vehicle to address and where
    pub vehicle: VehicleConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    pub level: String,

    /// Optional override for console output level
    pub console_level: Option<String>,

    /// Optional override for file output level
    pub file_level: Option<String>,

    /// Path to log file (its directory holds the rotated files)
    pub file: String,

    /// Number of rotated files to keep
    pub backup_count: u32,

    /// Whether to log to console
    pub console_output: bool,

    /// Whether to use JSON format
    pub json_format: bool,
}

/// Schedule editing preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Schedule edited when none is named
    pub default_schedule_id: u32,

    /// Treat all times as vehicle times and skip timezone correction
    pub use_utc: bool,
}

/// Vehicle addressing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleConfig {
    /// VIN of the vehicle (first vehicle of the account when unset)
    pub vin: Option<String>,

    /// Account id on the commerce API
    pub account_id: Option<String>,

    /// Country code sent with every request
    pub country: String,

    /// Base URL of the vehicle API
    pub api_url: String,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Candidate locations, most specific first
    pub fn default_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("zecharge_config.yaml")];
        if let Some(home) = std::env::var_os("HOME") {
            paths.push(PathBuf::from(home).join(".config/zecharge/config.yaml"));
        }
        paths.push(PathBuf::from("/etc/zecharge/config.yaml"));
        paths
    }

    /// Load from the first existing default location, else defaults
    pub fn load() -> Result<Self> {
        for path in Self::default_paths() {
            if path.exists() {
                return Self::from_file(path);
            }
        }
        Ok(Config::default())
    }

    /// Save configuration to a YAML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if parse_log_level(&self.logging.level).is_err() {
            return Err(ZeChargeError::validation(
                "logging.level".to_string(),
                format!("Unknown level {}", self.logging.level),
            ));
        }

        UserZone::resolve(&self.timezone)?;

        if self.schedule.default_schedule_id == 0 {
            return Err(ZeChargeError::validation(
                "schedule.default_schedule_id",
                "Schedule ids start at 1",
            ));
        }

        if self.vehicle.country.trim().is_empty() {
            return Err(ZeChargeError::validation(
                "vehicle.country",
                "Country cannot be empty",
            ));
        }

        if !(self.vehicle.api_url.starts_with("https://")
            || self.vehicle.api_url.starts_with("http://"))
        {
            return Err(ZeChargeError::validation(
                "vehicle.api_url",
                "Must be an http(s) URL",
            ));
        }

        Ok(())
    }

    /// Offset used to show and read schedule times, `None` under `use_utc`
    pub fn display_offset(&self) -> Result<Option<TimezoneOffset>> {
        if self.schedule.use_utc {
            return Ok(None);
        }
        current_offset(&self.timezone).map(Some)
    }
}
