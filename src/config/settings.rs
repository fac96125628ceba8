//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub text_analysis: TextAnalysisConfig,
    pub query: QueryConfig,
    pub logging: LoggingConfig,
}

/// Database configuration for the Postgres document store backend
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Bearer token verification configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub issuer: Option<String>,
}

/// Text analysis API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TextAnalysisConfig {
    pub api_url: String,
    pub timeout_seconds: u64,
}

/// Query limits configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueryConfig {
    pub list_limit: u64,
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
            .add_source(config::Environment::with_prefix("EVENTFORGE").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::EventForgeError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: "postgresql://localhost/eventforge".to_string(),
                max_connections: 10,
                min_connections: 1,
            },
            auth: AuthConfig {
                jwt_secret: String::new(),
                issuer: None,
            },
            text_analysis: TextAnalysisConfig {
                api_url: "http://localhost:8090".to_string(),
                timeout_seconds: 5,
            },
            query: QueryConfig { list_limit: 100 },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "/var/log/eventforge".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.database.max_connections, 10);
        assert_eq!(settings.query.list_limit, 100);
        assert!(settings.database.url.contains("postgresql://"));
    }
}
