//! Error types for the rating service
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the application.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific rating scenarios
#[derive(Debug, thiserror::Error)]
pub enum RatingError {
    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Contest data unavailable for {contest_id}: {reason}")]
    ContestDataUnavailable { contest_id: String, reason: String },

    #[error("Invalid contest outcome: {reason}")]
    InvalidOutcome { reason: String },

    #[error("Failed to write rating history: {message}")]
    HistoryWriteFailed { message: String },

    #[error("Internal service error: {message}")]
    InternalError { message: String },
}
