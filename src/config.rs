//! Configuration management for powderday
//!
//! Handles loading configuration from files and environment variables,
//! and validates every setting before it reaches the library.

use crate::PowderdayError;
use crate::forecast::{AccumulationChain, parse_time_zone};
use anyhow::{Context, Result};
use chrono_tz::Tz;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PowderdayConfig {
    /// Daily aggregation settings
    #[serde(default)]
    pub forecast: ForecastConfig,
    /// Zone lookup settings
    #[serde(default)]
    pub regions: RegionsConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Daily aggregation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// IANA zone used when the caller names none
    #[serde(default = "default_time_zone")]
    pub default_time_zone: String,
    /// Inches of snow per inch of liquid when snowfall is missing
    #[serde(default = "default_snow_to_liquid_ratio")]
    pub snow_to_liquid_ratio: f64,
}

/// Zone lookup settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionsConfig {
    /// Boundary distance cut-off for nearby zones
    #[serde(default = "default_nearby_max_distance")]
    pub nearby_max_distance_miles: f64,
    /// Maximum number of nearby zones returned
    #[serde(default = "default_nearby_limit")]
    pub nearby_limit: usize,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_time_zone() -> String {
    "America/Denver".to_string()
}

fn default_snow_to_liquid_ratio() -> f64 {
    crate::forecast::fallback::DEFAULT_SNOW_TO_LIQUID_RATIO
}

fn default_nearby_max_distance() -> f64 {
    50.0
}

fn default_nearby_limit() -> usize {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            default_time_zone: default_time_zone(),
            snow_to_liquid_ratio: default_snow_to_liquid_ratio(),
        }
    }
}

impl Default for RegionsConfig {
    fn default() -> Self {
        Self {
            nearby_max_distance_miles: default_nearby_max_distance(),
            nearby_limit: default_nearby_limit(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl PowderdayConfig {
    /// Load configuration from the default file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    ///
    /// Environment variables such as `POWDERDAY_REGIONS__NEARBY_LIMIT=3`
    /// override file values.
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("powderday.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        builder = builder.add_source(
            Environment::with_prefix("POWDERDAY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: PowderdayConfig = settings
            .try_deserialize()
            .with_context(|| {
                format!(
                    "Failed to deserialize configuration from {}",
                    config_file.display()
                )
            })?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("powderday").join("config.toml"))
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.forecast.default_time_zone.trim().is_empty() {
            self.forecast.default_time_zone = default_time_zone();
        }
        if self.forecast.snow_to_liquid_ratio == 0.0 {
            self.forecast.snow_to_liquid_ratio = default_snow_to_liquid_ratio();
        }
        if self.regions.nearby_max_distance_miles == 0.0 {
            self.regions.nearby_max_distance_miles = default_nearby_max_distance();
        }
        if self.regions.nearby_limit == 0 {
            self.regions.nearby_limit = default_nearby_limit();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_forecast()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_forecast(&self) -> Result<()> {
        parse_time_zone(&self.forecast.default_time_zone).map_err(|_| {
            PowderdayError::config(format!(
                "Unknown default time zone '{}'. Use an IANA name such as America/Denver.",
                self.forecast.default_time_zone
            ))
        })?;

        let ratio = self.forecast.snow_to_liquid_ratio;
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(PowderdayError::config(
                "Snow-to-liquid ratio must be a positive number"
            ).into());
        }

        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        let radius = self.regions.nearby_max_distance_miles;
        if !radius.is_finite() || radius <= 0.0 {
            return Err(PowderdayError::config(
                "Nearby zone distance must be a positive number of miles"
            ).into());
        }

        if radius > 500.0 {
            return Err(PowderdayError::config(
                "Nearby zone distance cannot exceed 500 miles"
            ).into());
        }

        if self.regions.nearby_limit == 0 || self.regions.nearby_limit > 100 {
            return Err(PowderdayError::config(
                "Nearby zone limit must be between 1 and 100"
            ).into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(PowderdayError::config(
                format!("Invalid log level '{}'. Must be one of: {}",
                    self.logging.level,
                    valid_log_levels.join(", ")
                )
            ).into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(PowderdayError::config(
                format!("Invalid log format '{}'. Must be one of: {}",
                    self.logging.format,
                    valid_log_formats.join(", ")
                )
            ).into());
        }

        Ok(())
    }

    /// The configured default zone, already validated by [`Self::validate`]
    pub fn time_zone(&self) -> crate::Result<Tz> {
        parse_time_zone(&self.forecast.default_time_zone)
    }

    /// Accumulation chain honoring the configured snow-to-liquid ratio
    #[must_use]
    pub fn accumulation_chain(&self) -> AccumulationChain {
        AccumulationChain::standard(self.forecast.snow_to_liquid_ratio)
    }
}
