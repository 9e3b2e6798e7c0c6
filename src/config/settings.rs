//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub scheduler: SchedulerConfig,
    pub quotas: QuotaConfig,
    pub logging: LoggingConfig,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Lifecycle scheduler configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SchedulerConfig {
    /// Interval of the fallback reconciliation pass, in seconds.
    pub fallback_interval_secs: u64,
    /// Longest delay a one-shot timer may be armed with, in milliseconds.
    /// Transitions further out are left to the fallback pass.
    pub max_timer_delay_ms: u64,
}

/// Subscription tier quotas
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QuotaConfig {
    /// Lifetime event allowance on the trial tier.
    pub trial_events: i32,
    /// Events per billing period on the basic tier.
    pub basic_events_per_period: i32,
    /// Saved venues allowed on the basic tier.
    pub basic_max_venues: i32,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("DECKMATCH").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::DeckMatchError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: "postgresql://localhost/deckmatch".to_string(),
                max_connections: 10,
                min_connections: 1,
            },
            scheduler: SchedulerConfig {
                fallback_interval_secs: 600,
                max_timer_delay_ms: i32::MAX as u64,
            },
            quotas: QuotaConfig {
                trial_events: 1,
                basic_events_per_period: 4,
                basic_max_venues: 1,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "/var/log/deckmatch".to_string(),
            },
        }
    }
}
