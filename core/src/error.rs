//! Unified error type for the Baruwa API client.
//!
//! # Design
//! Every failure a call can end in is one `ApiError`. Transport faults and
//! API-level faults are told apart at the transport boundary and carried as
//! distinct variants; `code()` and `message()` flatten any variant into the
//! `{code, message}` shape callers of the remote API expect.

use serde::Serialize;
use thiserror::Error;

/// Code reported for failures that never produced an HTTP response
/// (connection refused, DNS failure, timeout, interrupted read).
pub const TRANSPORT_FAILURE_CODE: u16 = 520;

/// Code reported for requests rejected before anything was sent.
pub const MALFORMED_REQUEST_CODE: u16 = 400;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Every way a call can fail, reducible to `{code, message}`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No HTTP response was received.
    #[error("transport failure: {message}")]
    Transport { message: String },

    /// The remote API answered with a status outside 200/201/204.
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Path arguments did not fit the endpoint template, or the body could not
    /// be serialized.
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// A success status arrived with a body that is not JSON.
    #[error("invalid response (status {status}): {message}")]
    InvalidResponse { status: u16, message: String },

    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Serializable `{code, message}` view of an [`ApiError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorPayload {
    pub code: u16,
    pub message: String,
}

impl ApiError {
    pub(crate) fn transport(err: impl std::fmt::Display) -> Self {
        let message = err.to_string();
        let message = if message.trim().is_empty() {
            "connection failed".to_string()
        } else {
            message
        };
        Self::Transport { message }
    }

    pub fn code(&self) -> u16 {
        match self {
            Self::Transport { .. } => TRANSPORT_FAILURE_CODE,
            Self::Api { status, .. } | Self::InvalidResponse { status, .. } => *status,
            Self::MalformedRequest(_) | Self::Config(_) => MALFORMED_REQUEST_CODE,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Transport { message }
            | Self::Api { message, .. }
            | Self::InvalidResponse { message, .. } => message,
            Self::MalformedRequest(message) | Self::Config(message) => message,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    pub fn to_payload(&self) -> ErrorPayload {
        ErrorPayload {
            code: self.code(),
            message: self.message().to_string(),
        }
    }
}
