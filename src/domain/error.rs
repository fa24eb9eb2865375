//! Error types for the OctoPanel front-end.
//!
//! This module defines the centralized error type [`PanelError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! # Taxonomy
//!
//! Talking to the printer server can fail in three distinct ways:
//!
//! - [`PanelError::ConnectionFailed`]: the request never produced an HTTP response
//! - [`PanelError::ServerError`]: a status query answered with something other than 200
//! - [`PanelError::Rejected`]: a command was answered with a non-2xx status
//!
//! None of these are fatal. The poller logs them and keeps the last-known
//! printer state; the runtime logs failed commands and carries on.

use thiserror::Error;

/// The main error type for OctoPanel operations.
///
/// # Examples
///
/// ```
/// use octopanel::PanelError;
///
/// let err = PanelError::ConnectionFailed("connection refused".to_string());
/// assert!(err.is_connection_failure());
/// ```
#[derive(Debug, Error)]
pub enum PanelError {
    /// The transport failed before any HTTP status was received.
    ///
    /// Covers refused connections, DNS failures, timeouts and I/O errors while
    /// reading a response body.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// A status request returned an unexpected HTTP status.
    #[error("Server error: {endpoint} returned HTTP {status}")]
    ServerError {
        /// Path of the endpoint that was queried.
        endpoint: String,
        /// HTTP status code returned by the server.
        status: u16,
    },

    /// The server refused a command.
    #[error("Command rejected: {endpoint} returned HTTP {status}: {body}")]
    Rejected {
        /// Path of the endpoint the command was posted to.
        endpoint: String,
        /// HTTP status code returned by the server.
        status: u16,
        /// Response body, usually an error description from the server.
        body: String,
    },

    /// A successful response carried a body that does not match the expected schema.
    #[error("Failed to decode response from {endpoint}: {reason}")]
    Decode {
        /// Path of the endpoint that produced the body.
        endpoint: String,
        /// Parser error message.
        reason: String,
    },

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A view was registered twice under the same name.
    #[error("A view named '{0}' is already registered")]
    DuplicateView(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PanelError {
    /// Returns `true` when the error came from the transport layer rather than
    /// from an HTTP response.
    #[must_use]
    pub const fn is_connection_failure(&self) -> bool {
        matches!(self, Self::ConnectionFailed(_))
    }
}

/// A specialized `Result` type for OctoPanel operations.
pub type Result<T> = std::result::Result<T, PanelError>;
