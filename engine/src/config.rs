//! Configuration management for the maintenance engine
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with VMR_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Due-status thresholds
    #[serde(default)]
    pub engine: EngineSettings,

    /// Command-line output defaults
    pub output: OutputConfig,
}

/// Thresholds used by the due calculator and prioritizer
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EngineSettings {
    /// Reminder offset for tasks that do not set one
    pub default_reminder_offset_days: u32,

    /// A time-based task is "due" once its due date is this close
    pub due_soon_days: u32,

    /// A mileage-based task is "due" within this fraction of its interval
    pub mileage_due_fraction: f64,

    /// Overdue beyond this fraction of the mileage interval is critical
    pub critical_mileage_fraction: f64,

    /// Overdue beyond this many days is critical
    pub critical_overdue_days: u32,

    /// Usage rate when no better estimate exists
    pub default_miles_per_day: f64,

    /// Interval used for the synthetic baseline of tasks without a mileage interval
    pub fallback_mileage_interval: u32,

    /// Round due mileage up to a multiple of this value (e.g. 1000)
    pub due_mileage_rounding: Option<u32>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            default_reminder_offset_days: 7,
            due_soon_days: 7,
            mileage_due_fraction: 0.1,
            critical_mileage_fraction: 0.1,
            critical_overdue_days: 30,
            default_miles_per_day: 35.0,
            fallback_mileage_interval: 5000,
            due_mileage_rounding: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    /// json, csv or markdown
    pub format: String,

    /// Maximum reminders printed per snapshot (0 = all)
    pub limit: usize,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("VMR_ENVIRONMENT").unwrap_or_else(|_| "development".into());
        Self::load_for(&environment)
    }

    /// Load configuration for an explicit environment name
    pub fn load_for(environment: &str) -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment)?
            .set_default("output.format", "json")?
            .set_default("output.limit", 0)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (VMR_ prefix)
            .add_source(
                Environment::with_prefix("VMR")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = EngineSettings::default();
        assert_eq!(settings.default_reminder_offset_days, 7);
        assert_eq!(settings.due_soon_days, 7);
        assert_eq!(settings.critical_overdue_days, 30);
        assert_eq!(settings.default_miles_per_day, 35.0);
        assert!(settings.due_mileage_rounding.is_none());
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let config = Config::load_for("test-no-such-environment").unwrap();
        assert_eq!(config.environment, "test-no-such-environment");
        assert_eq!(config.output.format, "json");
        assert_eq!(config.engine.fallback_mileage_interval, 5000);
    }

    #[test]
    fn test_partial_engine_section_keeps_other_defaults() {
        let settings: EngineSettings =
            serde_json::from_str(r#"{"due_soon_days": 14, "due_mileage_rounding": 1000}"#).unwrap();
        assert_eq!(settings.due_soon_days, 14);
        assert_eq!(settings.due_mileage_rounding, Some(1000));
        assert_eq!(settings.mileage_due_fraction, 0.1);
    }
}
