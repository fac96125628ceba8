//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use super::Settings;
use crate::utils::errors::{EventForgeError, Result};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_database_config(&settings.database)?;
    validate_auth_config(&settings.auth)?;
    validate_text_analysis_config(&settings.text_analysis)?;
    validate_query_config(&settings.query)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(EventForgeError::Config("Database URL is required".to_string()));
    }

    if config.max_connections == 0 {
        return Err(EventForgeError::Config(
            "Max connections must be greater than 0".to_string(),
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(EventForgeError::Config(
            "Min connections cannot be greater than max connections".to_string(),
        ));
    }

    Ok(())
}

/// Validate bearer token configuration
fn validate_auth_config(config: &super::AuthConfig) -> Result<()> {
    if config.jwt_secret.is_empty() {
        return Err(EventForgeError::Config("JWT secret is required".to_string()));
    }

    Ok(())
}

/// Validate text analysis API configuration
fn validate_text_analysis_config(config: &super::TextAnalysisConfig) -> Result<()> {
    if config.api_url.is_empty() {
        return Err(EventForgeError::Config(
            "Text analysis API URL is required".to_string(),
        ));
    }

    if config.timeout_seconds == 0 {
        return Err(EventForgeError::Config(
            "Text analysis timeout must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate query limits configuration
fn validate_query_config(config: &super::QueryConfig) -> Result<()> {
    if config.list_limit == 0 {
        return Err(EventForgeError::Config(
            "List limit must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(EventForgeError::Config("Log level is required".to_string()));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(EventForgeError::Config(format!(
            "Invalid log level: {}. Valid levels: {:?}",
            config.level, valid_levels
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_settings() -> Settings {
        let mut settings = Settings::default();
        settings.auth.jwt_secret = "test-secret".to_string();
        settings
    }

    #[test]
    fn test_valid_settings_pass() {
        assert!(validate_settings(&valid_settings()).is_ok());
    }

    #[test]
    fn test_missing_jwt_secret_rejected() {
        let mut settings = valid_settings();
        settings.auth.jwt_secret = String::new();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let mut settings = valid_settings();
        settings.logging.level = "verbose".to_string();
        assert!(validate_settings(&settings).is_err());
    }
}
