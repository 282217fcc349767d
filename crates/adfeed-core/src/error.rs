//! Error types for adfeed.
//!
//! Transport failures and payload decode failures are kept apart here. The
//! feed controllers flatten both into a display message; anything that wants
//! to branch on the kind has to do it at or below the repository.

use thiserror::Error;

/// The unified error type for adfeed operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (connection, timeout, non-2xx status).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The payload did not match the expected shape.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Input validation errors (base URLs, configuration values).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns true if this error came from a cancelled subscription.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Transport(TransportError::Cancelled))
    }

    /// Returns the HTTP status for non-2xx responses.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Transport(TransportError::Status { status, .. }) => Some(*status),
            _ => None,
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}{}", status_suffix(.message))]
    Status { status: u16, message: Option<String> },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },

    /// The request was cancelled before it produced a value.
    #[error("request cancelled")]
    Cancelled,
}

fn status_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

/// Payload decode errors.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The JSON body did not match the expected record shape.
    #[error("invalid payload: {message}")]
    Json { message: String },
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        DecodeError::Json {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(DecodeError::from(err))
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid base URL.
    #[error("invalid base URL '{value}': {reason}")]
    BaseUrl { value: String, reason: String },

    /// Unknown environment name.
    #[error("unknown environment '{value}' (expected 'prod' or 'staging')")]
    Environment { value: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}
