//! Error types for the zroster plugin.
//!
//! This module defines the centralized error type [`RosterError`] and a type alias
//! [`Result`] used throughout the plugin. HTTP failures are carried as
//! [`ApiError`] values, which already hold the user-facing message produced by
//! the request interceptor.

use crate::http::ApiError;
use thiserror::Error;

/// The main error type for zroster operations.
///
/// Most variants wrap underlying errors from external crates using `#[from]`
/// for automatic conversion.
///
/// # Examples
///
/// ```
/// use zroster::RosterError;
///
/// fn require_token(token: Option<String>) -> Result<String, RosterError> {
///     token.ok_or(RosterError::MissingToken)
/// }
///
/// assert!(require_token(None).is_err());
/// ```
#[derive(Debug, Error)]
pub enum RosterError {
    /// Reading or writing persisted plugin state failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An authenticated request was built while no token is stored.
    #[error("Authentication token not found")]
    MissingToken,

    /// User input failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The server rejected a request or could not be reached.
    #[error("{}", .0.user_message)]
    Api(#[from] ApiError),
}

/// A specialized `Result` type for zroster operations.
pub type Result<T> = std::result::Result<T, RosterError>;
