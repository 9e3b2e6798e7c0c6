//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{DeckMatchError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_database_config(&settings.database)?;
    validate_scheduler_config(&settings.scheduler)?;
    validate_quota_config(&settings.quotas)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(DeckMatchError::Config(
            "Database URL is required".to_string()
        ));
    }

    if config.max_connections == 0 {
        return Err(DeckMatchError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(DeckMatchError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    Ok(())
}

/// Validate scheduler configuration
fn validate_scheduler_config(config: &super::SchedulerConfig) -> Result<()> {
    if config.fallback_interval_secs == 0 {
        return Err(DeckMatchError::Config(
            "Fallback interval must be greater than 0".to_string()
        ));
    }

    if config.max_timer_delay_ms == 0 {
        return Err(DeckMatchError::Config(
            "Max timer delay must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate quota configuration
fn validate_quota_config(config: &super::QuotaConfig) -> Result<()> {
    if config.trial_events < 0 || config.basic_events_per_period < 0 || config.basic_max_venues < 0 {
        return Err(DeckMatchError::Config(
            "Quota limits cannot be negative".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(DeckMatchError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(DeckMatchError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
