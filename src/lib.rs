//! eventforge
//!
//! Backend core for a template-driven event management platform.
//! Organizations fill reusable templates of heterogeneous design fields;
//! this library decomposes them into a normalized event record plus
//! independently stored design documents, keeps the projection consistent as
//! designs are edited, and garbage-collects the fan-out on deletion.

pub mod config;
pub mod models;
pub mod services;
pub mod store;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{EventForgeError, Result};

// Re-export main components for easy access
pub use services::ServiceFactory;
pub use store::{DocumentStore, MemoryStore, PostgresStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
