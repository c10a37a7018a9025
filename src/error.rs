//! Error types for the routine tracker.

/// Top-level error type for the tracker.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Feedback error: {0}")]
    Feedback(#[from] FeedbackError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Persistence errors.
///
/// Only writes surface errors; corrupt or missing bucket contents on read
/// are recovered as empty collections by the store helpers.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Bucket IO failed: {0}")]
    Io(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),
}

/// Feedback provider errors.
///
/// These never reach the caller of the feedback requester — they are logged
/// and converted into a fixed fallback message.
#[derive(Debug, thiserror::Error)]
pub enum FeedbackError {
    #[error("Provider {provider} request failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },
}

/// Result type alias for the tracker.
pub type Result<T> = std::result::Result<T, Error>;
