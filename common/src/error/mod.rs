//! Error types for the pricing platform
//!
//! This module provides a unified error handling system for all pricing
//! crates. Calculation errors fall into two classes: `InvalidInput` for bad
//! caller data and `ConfigurationError` for missing or malformed pricing
//! constants. Neither is retryable.

use std::fmt::Display;
use thiserror::Error;

/// Pricing platform error type
#[derive(Debug, Error)]
pub enum Error {
    /// Caller supplied an invalid weight, route, value or option list
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Required rate/fee constants missing or malformed
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Requested resource (e.g. a rate table for a service) does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Database migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Decimal conversion error
    #[error("Decimal conversion error: {0}")]
    DecimalError(String),
}

impl Error {
    /// Whether the error was caused by the caller rather than the platform
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::InvalidInput(_) | Error::NotFound(_))
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait to add context to error results
pub trait ErrorExt<T> {
    /// Add context information to an error
    fn with_context<C, F>(self, context_fn: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Display;
}

impl<T> ErrorExt<T> for Result<T> {
    fn with_context<C, F>(self, context_fn: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Display,
    {
        self.map_err(|e| {
            let context = context_fn().to_string();
            match e {
                Error::InvalidInput(msg) => Error::InvalidInput(format!("{}: {}", context, msg)),
                Error::ConfigurationError(msg) => Error::ConfigurationError(format!("{}: {}", context, msg)),
                Error::NotFound(msg) => Error::NotFound(format!("{}: {}", context, msg)),
                Error::Internal(msg) => Error::Internal(format!("{}: {}", context, msg)),
                Error::DecimalError(msg) => Error::DecimalError(format!("{}: {}", context, msg)),
                Error::Database(e) => Error::Database(e),
                Error::Migration(e) => Error::Migration(e),
                Error::Serialization(e) => Error::Serialization(e),
            }
        })
    }
}

/// From rust_decimal::Error
impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::DecimalError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_keeps_variant() {
        let result: Result<()> = Err(Error::ConfigurationError("markup.min is missing".to_string()));
        let err = result.with_context(|| "loading pricing settings").unwrap_err();

        match err {
            Error::ConfigurationError(msg) => {
                assert_eq!(msg, "loading pricing settings: markup.min is missing");
            }
            other => panic!("unexpected variant: {:?}", other),
        }
    }

    #[test]
    fn test_client_errors() {
        assert!(Error::InvalidInput("weight".into()).is_client_error());
        assert!(Error::NotFound("service".into()).is_client_error());
        assert!(!Error::ConfigurationError("rates".into()).is_client_error());
    }
}
