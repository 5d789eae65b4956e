//! Error types for the event registration server.
//!
//! This module defines custom error types using `thiserror` for precise error handling.
//! Field validation problems are not errors in this sense; they are collected as
//! [`ValidationError`](crate::domain::ValidationError) values and returned as data.

use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Errors raised by the registration spreadsheet store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SheetError {
    /// The tab has not been created
    #[error("Worksheet not found: {0}")]
    TabNotFound(String),

    /// The tab has no room for another row
    #[error("Worksheet {title} is full ({capacity} rows)")]
    TabFull { title: String, capacity: usize },

    /// Backend-specific failure
    #[error("Sheet backend error: {0}")]
    Backend(String),
}

/// Errors that can occur when sending a confirmation email.
#[derive(Error, Debug)]
pub enum NotifyError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Mail API returned an error status code
    #[error("Mail API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Authentication failed
    #[error("Mail API authentication failed")]
    Unauthorized,

    /// Rate limit exceeded
    #[error("Mail API rate limit exceeded")]
    RateLimited,

    /// Failed to serialize the request body
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that abort a registration submission.
#[derive(Error, Debug)]
pub enum RegistrationError {
    /// Storing the row failed
    #[error("Failed to store registration: {0}")]
    Sheet(#[from] SheetError),
}

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with SheetError
pub type SheetResult<T> = Result<T, SheetError>;

/// Convenience type alias for Results with NotifyError
pub type NotifyResult<T> = Result<T, NotifyError>;

/// Convenience type alias for Results with RegistrationError
pub type RegistrationResult<T> = Result<T, RegistrationError>;
