//! Error handling for DeckMatch
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;
use uuid::Uuid;

/// Main error type for the DeckMatch application
#[derive(Error, Debug)]
pub enum DeckMatchError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Organizer not found: {organizer_id}")]
    OrganizerNotFound { organizer_id: Uuid },

    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: Uuid },

    #[error("Venue not found: {venue_id}")]
    VenueNotFound { venue_id: Uuid },

    #[error("Tier limit: {0}")]
    TierLimit(String),

    #[error("Subscription expired")]
    SubscriptionExpired,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for DeckMatch operations
pub type Result<T> = std::result::Result<T, DeckMatchError>;

impl DeckMatchError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            DeckMatchError::Database(_) => true,
            DeckMatchError::Migration(_) => false,
            DeckMatchError::Config(_) => false,
            DeckMatchError::OrganizerNotFound { .. } => false,
            DeckMatchError::EventNotFound { .. } => false,
            DeckMatchError::VenueNotFound { .. } => false,
            DeckMatchError::TierLimit(_) => false,
            DeckMatchError::SubscriptionExpired => false,
            DeckMatchError::InvalidInput(_) => false,
            DeckMatchError::Serialization(_) => false,
            DeckMatchError::Io(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            DeckMatchError::Migration(_) => ErrorSeverity::Critical,
            DeckMatchError::Config(_) => ErrorSeverity::Critical,
            DeckMatchError::Database(_) => ErrorSeverity::Error,
            DeckMatchError::TierLimit(_) => ErrorSeverity::Warning,
            DeckMatchError::SubscriptionExpired => ErrorSeverity::Warning,
            DeckMatchError::InvalidInput(_) => ErrorSeverity::Info,
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_limit_is_a_warning_and_not_recoverable() {
        let err = DeckMatchError::TierLimit("free accounts cannot create events".to_string());
        assert_eq!(err.severity(), ErrorSeverity::Warning);
        assert!(!err.is_recoverable());
    }
}
