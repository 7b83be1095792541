//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Request timeout of {request_secs}s does not cover outbound calls; need at least {required_secs}s")]
    RequestTimeoutTooShort { request_secs: u64, required_secs: u64 },

    #[error("Invalid socket address: {0}")]
    InvalidSocketAddr(String),

    #[error("JWT secret must be at least 32 bytes")]
    WeakJwtSecret,

    #[error("Invalid PayPal environment: {0}")]
    InvalidPayPalEnvironment(String),

    #[error("Invalid URL for {field}: {value}")]
    InvalidUrl { field: &'static str, value: String },

    #[error("{0} must use HTTPS in production")]
    MustBeHttps(&'static str),

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,
}
