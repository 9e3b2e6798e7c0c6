//! DeckMatch organizer backend
//!
//! Backend service for an event-matchmaking product. Organizers create
//! timed events at venues; this library keeps event statuses in step with
//! the clock, aggregates attendance analytics, and enforces
//! subscription-tier quotas.

#![allow(non_snake_case)]

pub mod analytics;
pub mod config;
pub mod database;
pub mod lifecycle;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{DeckMatchError, Result};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use lifecycle::{LifecycleEngine, derive_status};
pub use services::ServiceFactory;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
