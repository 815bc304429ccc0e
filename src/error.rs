//! Error types for ChatClone
//!
//! This module defines the error types used throughout the client,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for ChatClone operations
///
/// The chat flows only ever produce [`ChatCloneError::RequestFailed`]; the
/// remaining variants cover configuration, user input and local I/O.
#[derive(Error, Debug)]
pub enum ChatCloneError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Rejected user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A request to the chat server failed (network error, non-2xx status,
    /// or an unreadable response body)
    #[error("Request to {endpoint} failed: {reason}")]
    RequestFailed {
        /// Endpoint path that was called, e.g. `/api/chat`
        endpoint: String,
        /// Short description of what went wrong
        reason: String,
    },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The HTTP client could not be built
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ChatCloneError {
    /// Build a `RequestFailed` error for the given endpoint
    pub fn request_failed(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::RequestFailed {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for ChatClone operations
///
/// Uses `anyhow::Error` so callers can attach context while the typed
/// [`ChatCloneError`] stays recoverable through `downcast_ref`.
pub type Result<T> = anyhow::Result<T>;
