//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the eventforge backend.

use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration
///
/// The returned guard flushes the file writer on drop; the caller must hold
/// it for the lifetime of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "eventforge.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log event lifecycle actions with structured data
pub fn log_event_action(event_id: &str, action: &str, uid: &str, details: Option<&str>) {
    info!(
        event_id = event_id,
        action = action,
        uid = uid,
        details = details,
        "Event action performed"
    );
}

/// Log data integrity violations detected at runtime
pub fn log_integrity_violation(collection: &str, doc_id: &str, details: &str) {
    warn!(
        collection = collection,
        doc_id = doc_id,
        details = details,
        "Data integrity violation detected"
    );
}

/// Log failures of detached background tasks
pub fn log_background_failure(task: &str, error: &str) {
    error!(task = task, error = error, "Background task failed");
}

/// Log document store operations
pub fn log_store_operation(operation: &str, collection: &str, affected: u64) {
    tracing::debug!(
        operation = operation,
        collection = collection,
        affected = affected,
        "Document store operation completed"
    );
}
