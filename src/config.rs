//! Configuration management for the rule evaluators

use crate::types::alert::RiskLevelThresholds;
use anyhow::{ensure, Context, Result};
use config::{Config, File};
use chrono::Duration;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub fraud: FraudRulesConfig,
    pub flight: FlightPricingConfig,
    pub risk_levels: RiskLevelThresholds,
    pub logging: LoggingConfig,
}

/// Thresholds, windows and score contributions of the fraud rules
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FraudRulesConfig {
    /// Fixed score of a transaction from a blacklisted location
    pub blacklist_score: u32,
    /// Amounts strictly above this are high value
    pub high_value_threshold: Decimal,
    pub high_value_score: u32,
    /// Prior transactions at most this old count towards the frequency rule
    pub frequency_window_minutes: i64,
    /// Blocks when the recent count is strictly above this
    pub frequency_limit: usize,
    pub frequency_score: u32,
    /// A location change is suspicious when the last transaction is younger than this
    pub location_window_minutes: i64,
    pub location_change_score: u32,
}

impl Default for FraudRulesConfig {
    fn default() -> Self {
        Self {
            blacklist_score: 100,
            high_value_threshold: dec!(10000),
            high_value_score: 50,
            frequency_window_minutes: 60,
            frequency_limit: 10,
            frequency_score: 30,
            location_window_minutes: 30,
            location_change_score: 20,
        }
    }
}

impl FraudRulesConfig {
    /// Reject windows that are empty or too long to express as a duration
    pub fn validate(&self) -> Result<()> {
        for (name, minutes) in [
            ("frequency_window_minutes", self.frequency_window_minutes),
            ("location_window_minutes", self.location_window_minutes),
        ] {
            ensure!(
                minutes > 0 && Duration::try_minutes(minutes).is_some(),
                "fraud.{name} must be a positive number of minutes, got {minutes}"
            );
        }
        Ok(())
    }
}

/// Constants of the flight booking price adjustments
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FlightPricingConfig {
    /// Multiplier applied to `previous_sales / 100`
    pub demand_factor: Decimal,
    /// Flat fee added when departure is close
    pub last_minute_fee: Decimal,
    pub last_minute_hours: i64,
    /// Groups strictly larger than this get the discount
    pub group_size: u32,
    /// Multiplier applied to group bookings
    pub group_multiplier: Decimal,
    /// Currency value of one reward point
    pub point_value: Decimal,
    /// Cancellations at least this far ahead are refunded in full
    pub full_refund_hours: i64,
    /// Share of the price refunded on late cancellations
    pub late_refund_rate: Decimal,
}

impl Default for FlightPricingConfig {
    fn default() -> Self {
        Self {
            demand_factor: dec!(0.8),
            last_minute_fee: dec!(100),
            last_minute_hours: 24,
            group_size: 4,
            group_multiplier: dec!(0.95),
            point_value: dec!(0.01),
            full_refund_hours: 48,
            late_refund_rate: dec!(0.5),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (json, pretty)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from_path("config/config.toml")
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .context("Failed to build configuration")?;

        Self::from_config(config)
    }

    /// Deserialize and validate an already built configuration
    pub fn from_config(config: Config) -> Result<Self> {
        let app: Self = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        app.fraud.validate().context("Invalid fraud rule configuration")?;
        Ok(app)
    }

    /// Load configuration from a path when it exists, defaults otherwise
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load_from_path(path)
        } else {
            Ok(Self::default())
        }
    }
}
