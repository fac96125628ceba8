//! Error handling for eventforge
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for the eventforge backend
#[derive(Error, Debug)]
pub enum EventForgeError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Text analysis API error: {0}")]
    TextAnalysis(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Count assertion failed on '{collection}': expected {expected}, got {actual}")]
    CountAssertion {
        collection: String,
        expected: String,
        actual: u64,
    },

    #[error("Data integrity violation: {0}")]
    IntegrityViolation(String),

    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: String },

    #[error("Organization not found: {organization_id}")]
    OrganizationNotFound { organization_id: String },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl From<jsonwebtoken::errors::Error> for EventForgeError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        EventForgeError::Authentication(err.to_string())
    }
}

impl From<config::ConfigError> for EventForgeError {
    fn from(err: config::ConfigError) -> Self {
        EventForgeError::Config(err.to_string())
    }
}

/// Result type alias for eventforge operations
pub type Result<T> = std::result::Result<T, EventForgeError>;

impl EventForgeError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            EventForgeError::Database(_) => false,
            EventForgeError::Migration(_) => false,
            EventForgeError::TextAnalysis(_) => true,
            EventForgeError::Config(_) => false,
            EventForgeError::Validation(_) => false,
            EventForgeError::CountAssertion { .. } => false,
            EventForgeError::IntegrityViolation(_) => false,
            EventForgeError::EventNotFound { .. } => false,
            EventForgeError::OrganizationNotFound { .. } => false,
            EventForgeError::Http(_) => true,
            EventForgeError::Serialization(_) => false,
            EventForgeError::Io(_) => true,
            EventForgeError::Authentication(_) => false,
            EventForgeError::ServiceUnavailable(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            EventForgeError::Database(_) => ErrorSeverity::Critical,
            EventForgeError::Migration(_) => ErrorSeverity::Critical,
            EventForgeError::Config(_) => ErrorSeverity::Critical,
            EventForgeError::IntegrityViolation(_) => ErrorSeverity::Warning,
            EventForgeError::Authentication(_) => ErrorSeverity::Warning,
            EventForgeError::Validation(_) => ErrorSeverity::Info,
            EventForgeError::EventNotFound { .. } => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
